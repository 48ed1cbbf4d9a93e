use crate::{
    error::Result,
    models::{GeneratedImage, InputImage},
};
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// `Ok(None)` means the backend answered without an image.
    async fn generate_try_on(
        &self,
        prompt: &str,
        person: &InputImage,
        garment: &InputImage,
    ) -> Result<Option<GeneratedImage>>;

    fn name(&self) -> &str;
}
