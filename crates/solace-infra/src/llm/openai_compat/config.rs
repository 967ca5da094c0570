//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! Groq and OpenAI both speak the OpenAI chat completions protocol; each gets
//! a factory returning an [`OpenAiCompatConfig`] with the right base URL.

use secrecy::SecretString;
use solace_types::config::GatewayConfig;

/// Configuration for an OpenAI-compatible completion provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.groq.com/openai/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "llama3-70b-8192").
    pub model: String,
}

/// Groq default configuration.
///
/// Base URL: `https://api.groq.com/openai/v1`
pub fn groq_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "groq".into(),
        base_url: "https://api.groq.com/openai/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// Build a provider config from the gateway section of `config.toml`.
///
/// Unrecognized provider names fall back to the Groq endpoint; an explicit
/// `base_url` in the config overrides the provider default either way.
pub fn from_gateway_config(gateway: &GatewayConfig, api_key: SecretString) -> OpenAiCompatConfig {
    let mut config = match gateway.provider.as_str() {
        "openai" => openai_defaults(api_key, &gateway.model),
        _ => groq_defaults(api_key, &gateway.model),
    };
    if let Some(base_url) = &gateway.base_url {
        config.base_url = base_url.clone();
    }
    config
}
