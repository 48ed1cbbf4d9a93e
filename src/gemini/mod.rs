pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::{Result, TryOnError},
    models::{GeneratedImage, InputImage},
    service::ImageGenerator,
};
use async_trait::async_trait;

pub use image_client::ImageClient;

/// Shared handle to the Gemini API. Cloning reuses the same connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| TryOnError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            image_client: ImageClient::new(http, api_key, config),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_try_on(
        &self,
        prompt: &str,
        person: &InputImage,
        garment: &InputImage,
    ) -> Result<Option<GeneratedImage>> {
        self.image_client
            .generate_try_on(prompt, person, garment)
            .await
    }

    fn name(&self) -> &str {
        self.image_client.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let err = GeminiClient::new(&GeminiConfig::new()).err().unwrap();
        assert!(matches!(err, TryOnError::Config(_)));
    }

    #[test]
    fn test_client_uses_configured_model() {
        let config = GeminiConfig::new()
            .with_api_key("key")
            .with_model("gemini-2.5-flash-image");
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.name(), "gemini-2.5-flash-image");
        assert_eq!(client.image().model(), "gemini-2.5-flash-image");
    }
}
