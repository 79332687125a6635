use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

use crate::config::ProviderConfig;

/// Ways a single provider round-trip can fail. Every variant maps to the
/// same user-facing policy upstream; the distinction matters for the
/// server log.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("could not reach the model provider: {0}")]
    Network(reqwest::Error),
    #[error("the model provider did not answer in time")]
    Timeout,
    #[error("the model provider rejected the request: {0}")]
    Status(String),
    #[error("the model provider returned no completion text")]
    EmptyCompletion,
    #[error("provider call failed: {0}")]
    Other(String),
}

impl From<OpenAIError> for ProviderError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(err) if err.is_timeout() => ProviderError::Timeout,
            OpenAIError::Reqwest(err) => ProviderError::Network(err),
            OpenAIError::ApiError(err) => ProviderError::Status(err.message),
            other => ProviderError::Other(other.to_string()),
        }
    }
}

/// Anything that can turn an ingredient prompt into recipe text.
///
/// The web handlers only see this trait, so tests can substitute a scripted
/// generator and count its invocations.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Request a single non-streaming completion for the given system
    /// instruction and user prompt.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// The production generator: an OpenAI-compatible chat client pointed at
/// OpenRouter.
pub struct OpenRouterGenerator {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
}

impl OpenRouterGenerator {
    /// Build the client once at startup. The request deadline lives on the
    /// reqwest client underneath, and the retry window is pinned to zero so
    /// a failed call is reported rather than replayed.
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let no_retry = backoff::ExponentialBackoff {
            max_elapsed_time: Some(std::time::Duration::ZERO),
            ..Default::default()
        };
        let client = async_openai::Client::build(
            http_client,
            OpenAIConfig::new()
                .with_api_base(config.api_base.as_str())
                .with_api_key(config.api_key.clone().unwrap_or_default()),
            no_retry,
        );
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl RecipeGenerator for OpenRouterGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        tracing::debug!("Prompt: {}", prompt);
        let req_args = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: system.into(),
                    name: None,
                }),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: prompt.into(),
                    name: None,
                }),
            ])
            .build()?;
        let text = self
            .client
            .chat()
            .create(req_args)
            .await?
            .choices
            .first()
            .ok_or(ProviderError::EmptyCompletion)?
            .clone()
            .message
            .content
            .ok_or(ProviderError::EmptyCompletion)?;
        Ok(text)
    }
}
