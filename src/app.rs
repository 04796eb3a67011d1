// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::api::{
    CreateSessionResponse, HealthResponse, IngredientSearchParams, RandomRecipesParams,
    SessionSearchRequest, SessionSnapshot, TermRequest, VersionResponse,
};
use crate::models::recipe::{IngredientMatch, RecipeDetail, RecipeSummary};
use crate::models::search::MAX_PAGE_SIZE;
use crate::services::catalog::{self, CUISINES, DIETS, MEAL_TYPES, POPULAR_SEARCHES};
use crate::services::recipe_api::{ApiError, RecipeSource};
use crate::services::search_controller::SearchController;
use crate::services::sessions::SessionRegistry;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `SCOUT_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("SCOUT_VERSION");

const DEFAULT_RANDOM_COUNT: u32 = 6;
const DEFAULT_INGREDIENT_MATCHES: u32 = 12;
const MAX_BATCH: u32 = MAX_PAGE_SIZE;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecipeSource>,
    pub sessions: Arc<SessionRegistry>,
}

type HandlerError = (StatusCode, String);

/// Map a recipe service failure onto the status returned to our own clients
fn upstream_error(e: ApiError) -> HandlerError {
    match e {
        ApiError::NotFound => (StatusCode::NOT_FOUND, "Recipe not found".to_string()),
        other => (StatusCode::BAD_GATEWAY, format!("Recipe service error: {other}")),
    }
}

fn find_session(state: &AppState, id: &Uuid) -> Result<Arc<SearchController>, HandlerError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Search session {id} not found")))
}

fn snapshot_of(controller: &SearchController) -> Json<SessionSnapshot> {
    Json(SessionSnapshot::from(&controller.snapshot()))
}

// ---------------------------------------------------------------------------
// Service and catalog handlers
// ---------------------------------------------------------------------------

pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "recipe-scout".to_string(),
        version: VERSION.to_string(),
    })
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: state.source.health_check().await,
    })
}

pub async fn cuisines_handler() -> Json<Vec<String>> {
    Json(catalog::to_owned_list(CUISINES))
}

pub async fn diets_handler() -> Json<Vec<String>> {
    Json(catalog::to_owned_list(DIETS))
}

pub async fn meal_types_handler() -> Json<Vec<String>> {
    Json(catalog::to_owned_list(MEAL_TYPES))
}

pub async fn popular_handler() -> Json<Vec<String>> {
    Json(catalog::to_owned_list(POPULAR_SEARCHES))
}

// ---------------------------------------------------------------------------
// Recipe handlers
// ---------------------------------------------------------------------------

pub async fn recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<RecipeDetail>, HandlerError> {
    state
        .source
        .recipe_by_id(id)
        .await
        .map(Json)
        .map_err(upstream_error)
}

pub async fn random_recipes_handler(
    State(state): State<AppState>,
    Query(params): Query<RandomRecipesParams>,
) -> Result<Json<Vec<RecipeSummary>>, HandlerError> {
    let number = params
        .number
        .unwrap_or(DEFAULT_RANDOM_COUNT)
        .clamp(1, MAX_BATCH);

    state
        .source
        .random_recipes(number, params.tags.as_deref())
        .await
        .map(Json)
        .map_err(upstream_error)
}

pub async fn recipes_by_ingredients_handler(
    State(state): State<AppState>,
    Query(params): Query<IngredientSearchParams>,
) -> Result<Json<Vec<IngredientMatch>>, HandlerError> {
    let ingredients = params.ingredient_list();
    if ingredients.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "At least one ingredient is required".to_string(),
        ));
    }

    let number = params
        .number
        .unwrap_or(DEFAULT_INGREDIENT_MATCHES)
        .clamp(1, MAX_BATCH);

    state
        .source
        .recipes_by_ingredients(&ingredients, number)
        .await
        .map(Json)
        .map_err(upstream_error)
}

// ---------------------------------------------------------------------------
// Search session handlers
// ---------------------------------------------------------------------------

pub async fn create_session_handler(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, HandlerError> {
    let session_id = state
        .sessions
        .create()
        .map_err(|e| (StatusCode::SERVICE_UNAVAILABLE, e.to_string()))?;

    Ok(Json(CreateSessionResponse { session_id }))
}

pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;
    Ok(snapshot_of(&controller))
}

pub async fn delete_session_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("Search session {id} not found"),
        ))
    }
}

pub async fn session_search_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SessionSearchRequest>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;

    if !payload.append && payload.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Search query cannot be empty".to_string(),
        ));
    }

    controller.search(payload.to_query(), payload.append).await;
    Ok(snapshot_of(&controller))
}

pub async fn load_more_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;
    controller.load_more().await;
    Ok(snapshot_of(&controller))
}

pub async fn suggestions_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TermRequest>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;
    controller.get_suggestions(&payload.term).await;
    Ok(snapshot_of(&controller))
}

pub async fn input_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TermRequest>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;

    if !controller.options().auto_search {
        return Err((
            StatusCode::CONFLICT,
            "Auto-search is disabled for this service".to_string(),
        ));
    }

    controller.set_query(&payload.term);
    Ok(snapshot_of(&controller))
}

pub async fn clear_results_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;
    controller.clear_results();
    Ok(snapshot_of(&controller))
}

pub async fn clear_error_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, HandlerError> {
    let controller = find_session(&state, &id)?;
    controller.clear_error();
    Ok(snapshot_of(&controller))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/health", get(health_handler))
        .route("/catalog/cuisines", get(cuisines_handler))
        .route("/catalog/diets", get(diets_handler))
        .route("/catalog/meal-types", get(meal_types_handler))
        .route("/catalog/popular", get(popular_handler))
        .route("/recipes/random", get(random_recipes_handler))
        .route("/recipes/by-ingredients", get(recipes_by_ingredients_handler))
        .route("/recipes/{id}", get(recipe_handler))
        .route("/sessions", post(create_session_handler))
        .route(
            "/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/sessions/{id}/search", post(session_search_handler))
        .route("/sessions/{id}/more", post(load_more_handler))
        .route("/sessions/{id}/suggestions", post(suggestions_handler))
        .route("/sessions/{id}/input", post(input_handler))
        .route("/sessions/{id}/clear", post(clear_results_handler))
        .route("/sessions/{id}/error", delete(clear_error_handler))
        .with_state(state)
}
