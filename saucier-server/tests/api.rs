use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use saucier::{ProviderConfig, ProviderError, RecipeGenerator};
use saucier_server::{app, errors::CHEF_IS_BUSY, AppState};
use tower::ServiceExt;

/// Scripted generator that counts how many times the handler called it.
struct RecordingGenerator {
    calls: AtomicUsize,
    reply: Option<String>,
}

impl RecordingGenerator {
    fn succeeding(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: Some(reply.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: None,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeGenerator for RecordingGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::Status("the model fell over".to_string())),
        }
    }
}

fn test_state(api_key: Option<&str>, generator: Arc<RecordingGenerator>) -> AppState {
    AppState {
        config: ProviderConfig {
            api_key: api_key.map(str::to_string),
            api_base: "http://localhost:0".to_string(),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(5),
        },
        generator,
    }
}

async fn post_recipe(state: AppState, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/recipe")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections have plain text bodies, so fall back to null
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn generates_a_recipe_from_ingredients() {
    let generator =
        RecordingGenerator::succeeding("Golden Soufflé: whisk the eggs, fold in flour and sugar, bake.");
    let (status, body) = post_recipe(
        test_state(Some("test-key"), generator.clone()),
        serde_json::json!({"ingredients": ["egg", "flour", "sugar"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["recipe"],
        "Golden Soufflé: whisk the eggs, fold in flour and sugar, bake."
    );
    assert!(!body["recipe"].as_str().unwrap().is_empty());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn missing_api_key_fails_without_calling_the_provider() {
    let generator = RecordingGenerator::succeeding("unused");
    let (status, body) = post_recipe(
        test_state(None, generator.clone()),
        serde_json::json!({"ingredients": ["egg"]}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("OPENROUTER_API_KEY"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn provider_failures_are_replaced_with_a_safe_message() {
    let generator = RecordingGenerator::failing();
    let (status, body) = post_recipe(
        test_state(Some("test-key"), generator.clone()),
        serde_json::json!({"ingredients": ["egg"]}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], CHEF_IS_BUSY);
    assert!(!body["detail"].as_str().unwrap().contains("fell over"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn empty_ingredient_lists_are_rejected() {
    let generator = RecordingGenerator::succeeding("unused");
    let (status, _body) = post_recipe(
        test_state(Some("test-key"), generator.clone()),
        serde_json::json!({"ingredients": []}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn mistyped_ingredients_are_rejected_by_the_extractor() {
    let generator = RecordingGenerator::succeeding("unused");
    let (status, _body) = post_recipe(
        test_state(Some("test-key"), generator.clone()),
        serde_json::json!({"ingredients": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn health_reports_the_api_key_state() {
    for (api_key, expected) in [(Some("test-key"), true), (None, false)] {
        let response = app(test_state(api_key, RecordingGenerator::succeeding("unused")))
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["has_api_key"], expected);
    }
}
