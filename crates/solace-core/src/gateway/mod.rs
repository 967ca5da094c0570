//! Response-generation gateway.
//!
//! Accepts a user-authored message and a tone, forwards a role-tagged prompt
//! pair to the completion provider with fixed sampling parameters, and parses
//! the raw output through the fallback chain in [`parse`]. Malformed provider
//! output never escapes this module as an error; only empty input and
//! upstream transport failures do.

pub mod parse;
pub mod prompt;

use solace_types::config::GatewayConfig;
use solace_types::error::GatewayError;
use solace_types::llm::{CompletionRequest, Message, MessageRole};
use solace_types::tone::Tone;
use tracing::{debug, warn};

use crate::llm::provider::LlmProvider;

pub use self::parse::BotReply;

/// Gateway from user text to an emotion-tagged bot reply.
pub struct ReplyGateway<P: LlmProvider> {
    provider: P,
    config: GatewayConfig,
}

impl<P: LlmProvider> ReplyGateway<P> {
    pub fn new(provider: P, config: GatewayConfig) -> Self {
        Self { provider, config }
    }

    /// Generate a reply for `message` in the given tone.
    ///
    /// Rejects blank input before any provider call. Upstream failures are
    /// returned as [`GatewayError::Upstream`]; malformed payloads are
    /// absorbed by the parse chain and always yield a usable reply.
    #[tracing::instrument(name = "generate_reply", skip(self, message), fields(tone = %tone))]
    pub async fn generate(&self, message: &str, tone: Tone) -> Result<BotReply, GatewayError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GatewayError::EmptyMessage);
        }

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: message.to_string(),
            }],
            system: Some(prompt::system_prompt(tone)),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
        };

        let response = self.provider.complete(&request).await.inspect_err(|e| {
            warn!(provider = self.provider.name(), error = %e, "Completion failed");
        })?;

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Completion received"
        );

        Ok(parse::parse_reply(&response.content))
    }
}
