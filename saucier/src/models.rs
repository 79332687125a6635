use serde::{Deserialize, Serialize};

/// Body of `POST /api/recipe`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IngredientsRequest {
    pub ingredients: Vec<String>,
}

/// A generated recipe. The fancy name and the instructions are both part of
/// the single text blob, there is no further structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecipeResponse {
    pub recipe: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub has_api_key: bool,
}
