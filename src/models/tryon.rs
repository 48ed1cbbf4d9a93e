use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnRequest {
    pub user_image: String,     // Base64 encoded
    pub clothing_image: String, // Base64 encoded
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryOnResult {
    pub generated_image: String, // Base64 encoded
}
