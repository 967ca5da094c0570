//! Service configuration shapes, loaded from `config.toml` by `solace-infra`.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the service.
///
/// Every field has a default so a missing or malformed `config.toml`
/// degrades to a fully working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub gateway: GatewayConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
        }
    }
}

/// Completion provider settings for the reply gateway.
///
/// Sampling parameters are fixed per request; the provider/model pair is the
/// only thing operators commonly change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Provider name: "groq" or "openai".
    pub provider: String,
    /// Override the provider's default base URL.
    pub base_url: Option<String>,
    /// Model identifier sent with every completion.
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            base_url: None,
            model: "llama3-70b-8192".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}
