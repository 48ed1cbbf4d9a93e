use crate::error::{Result, TryOnError};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub aspect_ratio: String,
    pub image_size: String,
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            aspect_ratio: "4:5".to_string(),
            image_size: "1K".to_string(),
            timeout: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        GeminiConfig {
            api_key: env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            aspect_ratio: env::var("GEMINI_ASPECT_RATIO").unwrap_or(defaults.aspect_ratio),
            image_size: env::var("GEMINI_IMAGE_SIZE").unwrap_or(defaults.image_size),
            timeout: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_config(
        mut self,
        aspect_ratio: impl Into<String>,
        image_size: impl Into<String>,
    ) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self.image_size = image_size.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The key is the one setting the process cannot start without.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            TryOnError::Config(
                "GOOGLE_API_KEY not found. Add it to the environment or a .env file.".into(),
            )
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub fallback_image_path: PathBuf,
    pub debug_output_path: Option<PathBuf>,
    pub gemini: GeminiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8001,
            max_body_bytes: 20 * 1024 * 1024,
            fallback_image_path: PathBuf::from("fallback-try-on.png"),
            debug_output_path: Some(PathBuf::from("test.png")),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        // An empty DEBUG_OUTPUT_PATH turns the debug copy off.
        let debug_output_path = match env::var("DEBUG_OUTPUT_PATH") {
            Ok(path) if path.is_empty() => None,
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => defaults.debug_output_path,
        };

        Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            fallback_image_path: env::var("FALLBACK_IMAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.fallback_image_path),
            debug_output_path,
            gemini: GeminiConfig::from_env(),
        }
    }

    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_fallback_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_image_path = path.into();
        self
    }

    pub fn with_debug_output(mut self, path: Option<PathBuf>) -> Self {
        self.debug_output_path = path;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn with_gemini(mut self, gemini: GeminiConfig) -> Self {
        self.gemini = gemini;
        self
    }
}
