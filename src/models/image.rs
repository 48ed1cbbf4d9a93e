use ::image::ImageFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Model,
    Fallback,
}

/// An image ready to be returned to the caller, kept as the exact bytes
/// received from the model or read from disk.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub source: ImageSource,
}

impl GeneratedImage {
    pub fn from_model(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            source: ImageSource::Model,
        }
    }

    pub fn from_fallback(data: Vec<u8>) -> Self {
        let mime_type = mime_type_of(&data).to_string();
        Self {
            data,
            mime_type,
            source: ImageSource::Fallback,
        }
    }
}

/// An input photo that has already been checked to decode as an image.
#[derive(Debug, Clone)]
pub struct InputImage {
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Sniffs the MIME type from magic bytes, defaulting to PNG.
pub fn mime_type_of(data: &[u8]) -> &'static str {
    match ::image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Gif) => "image/gif",
        _ => "image/png",
    }
}
