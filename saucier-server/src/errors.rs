use axum::{
    http,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type WebResult<T> = std::result::Result<T, WebError>;

/// Fixed detail returned for provider failures. The real error goes to the
/// server log, never to the client.
pub const CHEF_IS_BUSY: &str = "The chef is busy right now. Please try again in a moment.";

#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Missing configuration: OPENROUTER_API_KEY is not set")]
    MissingApiKey,
    #[error("Recipe generation failed: {0}")]
    Provider(#[from] saucier::ProviderError),
    #[error("No ingredients were provided")]
    NoIngredients,
    #[error("Internal Server Error: {0}")]
    Internal(#[from] anyhow::Error),
    // Potentially more error types in the future
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        match self {
            WebError::MissingApiKey => {
                tracing::error!("{}", detail);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": detail })),
                )
                    .into_response()
            }
            WebError::Provider(err) => {
                // Full provider detail is server-side only
                tracing::error!("Recipe generation failed: {}", err);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": CHEF_IS_BUSY })),
                )
                    .into_response()
            }
            WebError::NoIngredients => (
                http::StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            WebError::Internal(_) => (
                http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
        }
    }
}
