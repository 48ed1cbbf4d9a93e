pub mod prompt;
pub mod traits;

use crate::{
    config::Config,
    error::{Result, TryOnError},
    logger,
    models::{mime_type_of, GeneratedImage, ImageSource, InputImage, TryOnRequest, TryOnResult},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::PathBuf;
use std::sync::Arc;

pub use prompt::TRY_ON_PROMPT;
pub use traits::ImageGenerator;

/// Runs one try-on request end to end: decode, generate, fall back, encode.
///
/// Holds no per-request state, so a single instance is shared by every
/// worker.
#[derive(Clone)]
pub struct TryOnService {
    generator: Arc<dyn ImageGenerator>,
    fallback_image_path: PathBuf,
    debug_output_path: Option<PathBuf>,
}

impl TryOnService {
    pub fn new(generator: Arc<dyn ImageGenerator>, fallback_image_path: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            fallback_image_path: fallback_image_path.into(),
            debug_output_path: None,
        }
    }

    pub fn from_config(config: &Config, generator: Arc<dyn ImageGenerator>) -> Self {
        Self::new(generator, config.fallback_image_path.clone())
            .with_debug_output(config.debug_output_path.clone())
    }

    pub fn with_debug_output(mut self, path: Option<PathBuf>) -> Self {
        self.debug_output_path = path;
        self
    }

    pub async fn try_on(&self, request: TryOnRequest) -> Result<TryOnResult> {
        let _timer = logger::timer("virtual try-on");

        let person = decode_input("user_image", &request.user_image)?;
        let garment = decode_input("clothing_image", &request.clothing_image)?;
        log::debug!(
            "User image: {}x{} {}, clothing image: {}x{} {}",
            person.width,
            person.height,
            person.mime_type,
            garment.width,
            garment.height,
            garment.mime_type
        );

        let image = self.generate_or_fallback(&person, &garment).await?;
        self.save_debug_copy(&image).await;

        Ok(TryOnResult {
            generated_image: STANDARD.encode(&image.data),
        })
    }

    async fn generate_or_fallback(
        &self,
        person: &InputImage,
        garment: &InputImage,
    ) -> Result<GeneratedImage> {
        let reason = match self
            .generator
            .generate_try_on(TRY_ON_PROMPT, person, garment)
            .await
        {
            Ok(Some(image)) => return Ok(image),
            Ok(None) => {
                log::warn!("No image generated by {}", self.generator.name());
                "No image data in model response".to_string()
            }
            Err(e) => {
                log::error!("Image generation via {} failed: {}", self.generator.name(), e);
                e.to_string()
            }
        };

        self.load_fallback(reason).await
    }

    async fn load_fallback(&self, reason: String) -> Result<GeneratedImage> {
        match tokio::fs::read(&self.fallback_image_path).await {
            Ok(data) => {
                log::warn!(
                    "Using fallback image {}",
                    self.fallback_image_path.display()
                );
                Ok(GeneratedImage::from_fallback(data))
            }
            Err(e) => {
                log::error!(
                    "Fallback image {} unavailable: {}",
                    self.fallback_image_path.display(),
                    e
                );
                Err(TryOnError::GenerationUnavailable(reason))
            }
        }
    }

    /// Best effort; concurrent requests may overwrite each other's copy.
    async fn save_debug_copy(&self, image: &GeneratedImage) {
        let Some(path) = &self.debug_output_path else {
            return;
        };
        match tokio::fs::write(path, &image.data).await {
            Ok(()) => log::debug!(
                "Saved {} image ({}) to {}",
                match image.source {
                    ImageSource::Model => "generated",
                    ImageSource::Fallback => "fallback",
                },
                image.mime_type,
                path.display()
            ),
            Err(e) => log::warn!("Could not save debug image to {}: {}", path.display(), e),
        }
    }
}

/// Decodes one base64 field and checks that it holds a readable image.
///
/// Accepts an optional `data:<mime>;base64,` prefix and line-wrapped input.
pub fn decode_input(field: &'static str, encoded: &str) -> Result<InputImage> {
    let encoded = encoded.trim();
    let encoded = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    let compact: String = encoded.split_ascii_whitespace().collect();

    let data = STANDARD
        .decode(compact)
        .map_err(|e| TryOnError::Decode {
            field,
            message: e.to_string(),
        })?;

    let image = image::load_from_memory(&data).map_err(|e| TryOnError::ImageFormat {
        field,
        message: e.to_string(),
    })?;

    Ok(InputImage {
        mime_type: mime_type_of(&data),
        width: image.width(),
        height: image.height(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, EchoGenerator, EmptyGenerator, FailingGenerator};

    fn request(person: &[u8], garment: &[u8]) -> TryOnRequest {
        TryOnRequest {
            user_image: STANDARD.encode(person),
            clothing_image: STANDARD.encode(garment),
        }
    }

    fn fallback_file(dir: &tempfile::TempDir) -> (PathBuf, Vec<u8>) {
        let path = dir.path().join("fallback-try-on.png");
        let bytes = test_support::png([10, 200, 30]);
        std::fs::write(&path, &bytes).unwrap();
        (path, bytes)
    }

    #[test]
    fn test_decode_input_png_and_jpeg() {
        let png = decode_input("user_image", &STANDARD.encode(test_support::png([1, 2, 3]))).unwrap();
        assert_eq!((png.width, png.height), (4, 5));
        assert_eq!(png.mime_type, "image/png");

        let jpeg =
            decode_input("clothing_image", &STANDARD.encode(test_support::jpeg([9, 9, 9]))).unwrap();
        assert_eq!((jpeg.width, jpeg.height), (8, 10));
        assert_eq!(jpeg.mime_type, "image/jpeg");
    }

    #[test]
    fn test_decode_input_accepts_data_url() {
        let encoded = format!(
            "data:image/png;base64,{}\n",
            STANDARD.encode(test_support::png([1, 2, 3]))
        );
        assert!(decode_input("user_image", &encoded).is_ok());
    }

    #[test]
    fn test_decode_input_accepts_line_wrapped_base64() {
        let bytes = test_support::png([40, 50, 60]);
        let encoded = STANDARD.encode(&bytes);
        let wrapped = encoded
            .as_bytes()
            .chunks(76)
            .map(|line| std::str::from_utf8(line).unwrap())
            .collect::<Vec<_>>()
            .join("\r\n");
        assert!(wrapped.contains('\n'));

        let image = decode_input("user_image", &wrapped).unwrap();
        assert_eq!(image.data, bytes);
        assert_eq!((image.width, image.height), (4, 5));
    }

    #[test]
    fn test_decode_input_rejects_bad_base64() {
        let err = decode_input("user_image", "not*base64!").unwrap_err();
        assert!(matches!(err, TryOnError::Decode { field: "user_image", .. }));
    }

    #[test]
    fn test_decode_input_rejects_non_images() {
        let err = decode_input("clothing_image", &STANDARD.encode(b"plain text")).unwrap_err();
        assert!(matches!(
            err,
            TryOnError::ImageFormat {
                field: "clothing_image",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_generated_image_is_returned_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let debug_path = dir.path().join("test.png");
        let service = TryOnService::new(Arc::new(EchoGenerator), dir.path().join("missing.png"))
            .with_debug_output(Some(debug_path.clone()));

        let person = test_support::png([255, 0, 0]);
        let result = service
            .try_on(request(&person, &test_support::jpeg([0, 0, 255])))
            .await
            .unwrap();

        let returned = STANDARD.decode(&result.generated_image).unwrap();
        assert_eq!(returned, person);
        assert!(image::load_from_memory(&returned).is_ok());
        assert_eq!(std::fs::read(&debug_path).unwrap(), person);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let (fallback, bytes) = fallback_file(&dir);
        let service = TryOnService::new(Arc::new(FailingGenerator), fallback);

        let result = service
            .try_on(request(&test_support::png([1, 1, 1]), &test_support::png([2, 2, 2])))
            .await
            .unwrap();

        assert_eq!(STANDARD.decode(result.generated_image).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_missing_image_part_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let (fallback, bytes) = fallback_file(&dir);
        let service = TryOnService::new(Arc::new(EmptyGenerator), fallback);

        let result = service
            .try_on(request(&test_support::png([1, 1, 1]), &test_support::png([2, 2, 2])))
            .await
            .unwrap();

        assert_eq!(STANDARD.decode(result.generated_image).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_failure_without_fallback_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let service = TryOnService::new(Arc::new(FailingGenerator), dir.path().join("missing.png"));

        let err = service
            .try_on(request(&test_support::png([1, 1, 1]), &test_support::png([2, 2, 2])))
            .await
            .unwrap_err();

        assert!(matches!(err, TryOnError::GenerationUnavailable(_)));
        assert!(err.to_string().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_generator_or_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let (fallback, _) = fallback_file(&dir);
        let service = TryOnService::new(Arc::new(FailingGenerator), fallback);

        let err = service
            .try_on(TryOnRequest {
                user_image: STANDARD.encode(test_support::png([1, 1, 1])),
                clothing_image: "%%%".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TryOnError::Decode { field: "clothing_image", .. }));
    }

    #[tokio::test]
    async fn test_unwritable_debug_path_does_not_fail_request() {
        let dir = tempfile::tempdir().unwrap();
        let service = TryOnService::new(Arc::new(EchoGenerator), dir.path().join("missing.png"))
            .with_debug_output(Some(dir.path().join("no-such-dir").join("test.png")));

        let result = service
            .try_on(request(&test_support::png([5, 5, 5]), &test_support::png([6, 6, 6])))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_requests_do_not_interfere() {
        let dir = tempfile::tempdir().unwrap();
        let service = TryOnService::new(Arc::new(EchoGenerator), dir.path().join("missing.png"))
            .with_debug_output(Some(dir.path().join("test.png")));

        let red = test_support::png([255, 0, 0]);
        let blue = test_support::jpeg([0, 0, 255]);
        let garment = test_support::png([0, 255, 0]);

        let (a, b) = futures::future::join(
            service.try_on(request(&red, &garment)),
            service.try_on(request(&blue, &garment)),
        )
        .await;

        assert_eq!(STANDARD.decode(a.unwrap().generated_image).unwrap(), red);
        assert_eq!(STANDARD.decode(b.unwrap().generated_image).unwrap(), blue);
    }
}
