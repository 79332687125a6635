use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use saucier::{
    models::{HealthResponse, IngredientsRequest, RecipeResponse},
    prompt, ProviderConfig, RecipeGenerator,
};

use crate::errors::{WebError, WebResult};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: ProviderConfig,
    pub generator: Arc<dyn RecipeGenerator>,
}

/// Build the router. Split out of `main` so tests can drive it in-process.
pub fn app(state: AppState) -> Router {
    Router::new()
        // `POST /api/recipe` goes to `generate_recipe`
        .route("/api/recipe", post(generate_recipe))
        // `GET /api/health` goes to `health`
        .route("/api/health", get(health))
        .layer(
            tower_http::compression::CompressionLayer::new()
                .quality(tower_http::CompressionLevel::Fastest),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn the posted ingredient list into a generated recipe.
///
/// An empty list is rejected before anything else happens, and a missing
/// API key is reported without attempting the network call.
async fn generate_recipe(
    State(state): State<AppState>,
    Json(request): Json<IngredientsRequest>,
) -> WebResult<Json<RecipeResponse>> {
    if request.ingredients.is_empty() {
        return Err(WebError::NoIngredients);
    }
    if !state.config.has_api_key() {
        return Err(WebError::MissingApiKey);
    }
    tracing::info!(
        "Generating a recipe from {} ingredients",
        request.ingredients.len()
    );
    let prompt = prompt::ingredients_prompt(&request.ingredients);
    let recipe = state
        .generator
        .generate(prompt::GOURMET_CHEF_PERSONA, &prompt)
        .await?;
    Ok(Json(RecipeResponse { recipe }))
}

// Report process status and whether the provider secret is configured
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        has_api_key: state.config.has_api_key(),
    })
}
