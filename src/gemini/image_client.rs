use crate::{
    config::GeminiConfig,
    error::{Result, TryOnError},
    models::{
        gemini::{
            Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
            ImageConfig, InlineData, RequestPart,
        },
        GeneratedImage, InputImage,
    },
};
use base64::{engine::general_purpose::STANDARD, Engine};

const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    aspect_ratio: String,
    image_size: String,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, config: &GeminiConfig) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            aspect_ratio: config.aspect_ratio.clone(),
            image_size: config.image_size.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model to dress `person` in `garment`.
    ///
    /// Returns `Ok(None)` when the model answered but produced no image part.
    pub async fn generate_try_on(
        &self,
        prompt: &str,
        person: &InputImage,
        garment: &InputImage,
    ) -> Result<Option<GeneratedImage>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = self.build_request(prompt, person, garment);

        log::info!("Calling image model: {}", self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TryOnError::ExternalService(format!(
                "{} - {}",
                status.as_u16(),
                truncate(&text)
            )));
        }

        let response: GenerateContentResponse = response.json().await?;
        log::info!("Image model call successful");

        extract_image(response)
    }

    fn build_request(
        &self,
        prompt: &str,
        person: &InputImage,
        garment: &InputImage,
    ) -> GenerateContentRequest {
        let inline = |image: &InputImage| RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.to_string(),
                data: STANDARD.encode(&image.data),
            },
        };

        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text {
                        text: prompt.to_string(),
                    },
                    inline(person),
                    inline(garment),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: self.aspect_ratio.clone(),
                    image_size: self.image_size.clone(),
                },
            },
        }
    }
}

/// Takes the first inline image part in response order; text parts are only logged.
fn extract_image(response: GenerateContentResponse) -> Result<Option<GeneratedImage>> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            let message = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| reason.clone());
            return Err(TryOnError::ExternalService(format!(
                "prompt blocked: {}",
                message
            )));
        }
    }

    for part in response.parts() {
        if let Some(text) = &part.text {
            log::info!("Model response text: {}", text);
        } else if let Some(inline) = &part.inline_data {
            let data = STANDARD.decode(inline.data.trim()).map_err(|e| {
                TryOnError::ExternalService(format!("undecodable image payload: {}", e))
            })?;
            log::info!("Image found in response ({} bytes)", data.len());
            return Ok(Some(GeneratedImage::from_model(
                data,
                inline.mime_type.clone(),
            )));
        }
    }

    if let Some(reason) = response
        .candidates
        .iter()
        .find_map(|c| c.finish_reason.as_deref())
    {
        log::warn!("No image in model response, finish reason: {}", reason);
    }

    Ok(None)
}

fn truncate(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
