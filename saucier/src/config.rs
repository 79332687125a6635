use std::time::Duration;

use anyhow::Context;

/// OpenRouter's OpenAI-compatible endpoint.
pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

/// The hosted model that writes the recipes.
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp:free";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide provider settings, read once at startup and shared
/// read-only with every request.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// Secret for the provider. The process starts without it, but recipe
    /// generation refuses to call out until it is set.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Deadline for a single provider round-trip.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Load the configuration from the environment, honoring `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = dotenvy::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let api_base =
            dotenvy::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = dotenvy::var("RECIPE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = match dotenvy::var("PROVIDER_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse()
                    .context("Parsing PROVIDER_TIMEOUT_SECS as whole seconds")?,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };
        Ok(Self {
            api_key,
            api_base,
            model,
            timeout,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
