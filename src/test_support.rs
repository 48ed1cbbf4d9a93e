//! Shared fixtures for unit tests.

use crate::{
    error::{Result, TryOnError},
    models::{GeneratedImage, InputImage},
    service::ImageGenerator,
};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub fn encode_solid(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

pub fn png(color: [u8; 3]) -> Vec<u8> {
    encode_solid(4, 5, color, ImageFormat::Png)
}

pub fn jpeg(color: [u8; 3]) -> Vec<u8> {
    encode_solid(8, 10, color, ImageFormat::Jpeg)
}

/// Simulates a remote outage.
pub struct FailingGenerator;

#[async_trait]
impl ImageGenerator for FailingGenerator {
    async fn generate_try_on(
        &self,
        _prompt: &str,
        _person: &InputImage,
        _garment: &InputImage,
    ) -> Result<Option<GeneratedImage>> {
        Err(TryOnError::ExternalService("503 - model overloaded".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Answers with text only.
pub struct EmptyGenerator;

#[async_trait]
impl ImageGenerator for EmptyGenerator {
    async fn generate_try_on(
        &self,
        _prompt: &str,
        _person: &InputImage,
        _garment: &InputImage,
    ) -> Result<Option<GeneratedImage>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "empty"
    }
}

/// Returns the person photo unchanged, so each result can be traced back
/// to the request that produced it.
pub struct EchoGenerator;

#[async_trait]
impl ImageGenerator for EchoGenerator {
    async fn generate_try_on(
        &self,
        _prompt: &str,
        person: &InputImage,
        _garment: &InputImage,
    ) -> Result<Option<GeneratedImage>> {
        tokio::task::yield_now().await;
        Ok(Some(GeneratedImage::from_model(
            person.data.clone(),
            person.mime_type,
        )))
    }

    fn name(&self) -> &str {
        "echo"
    }
}
