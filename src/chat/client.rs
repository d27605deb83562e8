//! Chat client configuration

use serde::{Deserialize, Serialize};

/// Configuration for a Responses API chat client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatClientConfig {
    /// Model name sent with every request
    pub model: String,

    /// API base URL; `/responses` is appended
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Timeout for a whole streamed response in seconds
    pub timeout_secs: u64,
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 300,
        }
    }
}

impl ChatClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the responses endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}
