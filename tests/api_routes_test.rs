// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use recipe_scout::app::{create_router, AppState};
use recipe_scout::models::api::{CreateSessionResponse, SessionSnapshot};
use recipe_scout::models::recipe::{IngredientMatch, RecipeDetail, RecipeSummary};
use recipe_scout::models::search::SearchState;
use recipe_scout::services::fake_source::FakeRecipeSource;
use recipe_scout::services::recipe_api::{ApiError, RecipeSource};
use recipe_scout::services::search_controller::SearchOptions;
use recipe_scout::services::sessions::SessionRegistry;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

// HTTP surface of the search session service, backed by the in-memory source.
// Run with: cargo test --test api_routes_test

fn test_app(source: Arc<FakeRecipeSource>, options: SearchOptions, max_sessions: usize) -> Router {
    let source: Arc<dyn RecipeSource> = source;
    create_router(AppState {
        sessions: Arc::new(SessionRegistry::new(source.clone(), options, max_sessions)),
        source,
    })
}

fn default_app() -> Router {
    test_app(
        Arc::new(FakeRecipeSource::numbered("Pasta", 42)),
        SearchOptions::default(),
        16,
    )
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_ok<T: DeserializeOwned>(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> T {
    let (status, bytes) = send(app, method, uri, body).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    serde_json::from_slice(&bytes).unwrap()
}

async fn open_session(app: &Router) -> Uuid {
    let created: CreateSessionResponse = send_ok(app, "POST", "/sessions", None).await;
    created.session_id
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let app = default_app();

    let cuisines: Vec<String> = send_ok(&app, "GET", "/catalog/cuisines", None).await;
    assert_eq!(cuisines.len(), 26);
    assert!(cuisines.contains(&"Italian".to_string()));

    let diets: Vec<String> = send_ok(&app, "GET", "/catalog/diets", None).await;
    assert!(diets.contains(&"Vegan".to_string()));

    let meal_types: Vec<String> = send_ok(&app, "GET", "/catalog/meal-types", None).await;
    assert_eq!(meal_types[0], "main course");

    let popular: Vec<String> = send_ok(&app, "GET", "/catalog/popular", None).await;
    assert_eq!(popular.len(), 8);
}

#[tokio::test]
async fn test_health_reports_source_state() {
    let app = default_app();
    let health: serde_json::Value = send_ok(&app, "GET", "/health", None).await;
    assert_eq!(health["healthy"], true);
}

#[tokio::test]
async fn test_recipe_detail_and_random() {
    let app = default_app();

    let detail: RecipeDetail = send_ok(&app, "GET", "/recipes/7", None).await;
    assert_eq!(detail.summary.id, 7);
    assert_eq!(detail.summary.title, "Pasta #7");

    let random: Vec<RecipeSummary> = send_ok(&app, "GET", "/recipes/random", None).await;
    assert_eq!(random.len(), 6);

    let random: Vec<RecipeSummary> = send_ok(&app, "GET", "/recipes/random?number=0", None).await;
    assert_eq!(random.len(), 1);
}

#[tokio::test]
async fn test_recipes_by_ingredients() {
    let app = default_app();

    let matches: Vec<IngredientMatch> = send_ok(
        &app,
        "GET",
        "/recipes/by-ingredients?ingredients=pasta,%20basil&number=3",
        None,
    )
    .await;
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].used_ingredient_count, 1);

    let (status, _) = send(&app, "GET", "/recipes/by-ingredients?ingredients=%20,", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = default_app();
    let id = open_session(&app).await;

    let snapshot: SessionSnapshot = send_ok(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert!(snapshot.recipes.is_empty());
    assert_eq!(snapshot.state, SearchState::Idle);

    let (status, _) = send(&app, "DELETE", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_limit_returns_503() {
    let app = test_app(
        Arc::new(FakeRecipeSource::numbered("Pasta", 42)),
        SearchOptions::default(),
        1,
    );
    open_session(&app).await;

    let (status, _) = send(&app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_search_paginates_and_clears() {
    let app = default_app();
    let id = open_session(&app).await;

    let snapshot: SessionSnapshot = send_ok(
        &app,
        "POST",
        &format!("/sessions/{id}/search"),
        Some(json!({"query": "pasta", "page_size": 20})),
    )
    .await;
    assert_eq!(snapshot.recipes.len(), 20);
    assert_eq!(snapshot.offset, 20);
    assert!(snapshot.has_more);

    let snapshot: SessionSnapshot = send_ok(&app, "POST", &format!("/sessions/{id}/more"), None).await;
    assert_eq!(snapshot.recipes.len(), 40);

    let snapshot: SessionSnapshot = send_ok(&app, "POST", &format!("/sessions/{id}/more"), None).await;
    assert_eq!(snapshot.recipes.len(), 42);
    assert!(!snapshot.has_more);

    let snapshot: SessionSnapshot = send_ok(&app, "POST", &format!("/sessions/{id}/clear"), None).await;
    assert!(snapshot.recipes.is_empty());
    assert!(snapshot.last_query.is_none());
}

#[tokio::test]
async fn test_append_search_extends_results() {
    let app = default_app();
    let id = open_session(&app).await;

    send_ok::<SessionSnapshot>(
        &app,
        "POST",
        &format!("/sessions/{id}/search"),
        Some(json!({"query": "pasta"})),
    )
    .await;

    let snapshot: SessionSnapshot = send_ok(
        &app,
        "POST",
        &format!("/sessions/{id}/search"),
        Some(json!({"query": "pasta", "append": true})),
    )
    .await;
    assert_eq!(snapshot.recipes.len(), 18);
}

#[tokio::test]
async fn test_error_is_reported_and_cleared() {
    let source = Arc::new(FakeRecipeSource::numbered("Pasta", 42));
    source.push_failure(ApiError::QuotaExceeded);
    let app = test_app(source, SearchOptions::default(), 4);
    let id = open_session(&app).await;

    let snapshot: SessionSnapshot = send_ok(
        &app,
        "POST",
        &format!("/sessions/{id}/search"),
        Some(json!({"query": "pasta"})),
    )
    .await;
    assert_eq!(snapshot.state, SearchState::Error);
    assert!(snapshot.error.unwrap().contains("quota"));

    let snapshot: SessionSnapshot = send_ok(&app, "DELETE", &format!("/sessions/{id}/error"), None).await;
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.state, SearchState::Idle);
}

#[tokio::test]
async fn test_suggestions_endpoint() {
    let source = Arc::new(FakeRecipeSource::default());
    source.set_suggestions(Ok(vec!["pasta bake".to_string(), "pasta salad".to_string()]));
    let app = test_app(source.clone(), SearchOptions::default(), 4);
    let id = open_session(&app).await;

    let snapshot: SessionSnapshot = send_ok(
        &app,
        "POST",
        &format!("/sessions/{id}/suggestions"),
        Some(json!({"term": "pas"})),
    )
    .await;
    assert_eq!(snapshot.suggestions, vec!["pasta bake", "pasta salad"]);

    let snapshot: SessionSnapshot = send_ok(
        &app,
        "POST",
        &format!("/sessions/{id}/suggestions"),
        Some(json!({"term": "p"})),
    )
    .await;
    assert!(snapshot.suggestions.is_empty());
    assert_eq!(source.suggestion_calls(), vec!["pas"]);
}

#[tokio::test(start_paused = true)]
async fn test_input_triggers_debounced_search() {
    let source = Arc::new(FakeRecipeSource::numbered("Pasta", 42));
    let options = SearchOptions {
        auto_search: true,
        ..SearchOptions::default()
    };
    let app = test_app(source.clone(), options, 4);
    let id = open_session(&app).await;

    for term in ["pa", "pas", "past", "pasta"] {
        let snapshot: SessionSnapshot = send_ok(
            &app,
            "POST",
            &format!("/sessions/{id}/input"),
            Some(json!({"term": term})),
        )
        .await;
        assert!(snapshot.recipes.is_empty());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    tokio::time::sleep(Duration::from_millis(500)).await;

    let snapshot: SessionSnapshot = send_ok(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(snapshot.recipes.len(), 9);
    assert_eq!(source.search_calls().len(), 1);
    assert_eq!(source.search_calls()[0].term, "pasta");
}

#[tokio::test]
async fn test_search_page_size_is_capped() {
    let source = Arc::new(FakeRecipeSource::numbered("Pasta", 42));
    let app = test_app(source.clone(), SearchOptions::default(), 4);
    let id = open_session(&app).await;

    let snapshot: SessionSnapshot = send_ok(
        &app,
        "POST",
        &format!("/sessions/{id}/search"),
        Some(json!({"query": "pasta", "page_size": 4294967295u32})),
    )
    .await;

    assert_eq!(snapshot.recipes.len(), 42);
    assert_eq!(source.search_calls()[0].page_size, 100);
}
