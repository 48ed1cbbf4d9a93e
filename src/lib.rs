pub mod codec;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod server;
pub mod service;

#[cfg(test)]
mod test_support;

pub use config::{Config, GeminiConfig};
pub use error::{Result, TryOnError};
pub use gemini::{GeminiClient, ImageClient};
pub use models::{GeneratedImage, ImageSource, InputImage, TryOnRequest, TryOnResult};
pub use service::{ImageGenerator, TryOnService, TRY_ON_PROMPT};
