// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::recipe::RecipeSummary;
use crate::models::search::{SearchQuery, SearchSession, SearchState, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response after opening a search session
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// Request to run a search inside a session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intolerances: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ready_time: Option<u32>,
    /// Falls back to the configured page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Extend the current results instead of replacing them
    #[serde(default)]
    pub append: bool,
}

impl SessionSearchRequest {
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            term: self.query.clone(),
            cuisine: self.cuisine.clone(),
            diet: self.diet.clone(),
            dish_type: self.dish_type.clone(),
            intolerances: self.intolerances.clone(),
            max_ready_time: self.max_ready_time,
            page_size: self
                .page_size
                .map(|size| size.clamp(1, MAX_PAGE_SIZE))
                .unwrap_or(0),
            offset: 0,
        }
    }
}

/// Request carrying partial user input (suggestions, auto-search)
#[derive(Debug, Serialize, Deserialize)]
pub struct TermRequest {
    pub term: String,
}

/// Read-only view of a session handed to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub recipes: Vec<RecipeSummary>,
    pub suggestions: Vec<String>,
    pub is_loading: bool,
    pub is_loading_suggestions: bool,
    pub error: Option<String>,
    pub total_results: u32,
    pub has_more: bool,
    pub offset: u32,
    pub state: SearchState,
    pub last_query: Option<SearchQuery>,
}

impl From<&SearchSession> for SessionSnapshot {
    fn from(session: &SearchSession) -> Self {
        Self {
            recipes: session.recipes.clone(),
            suggestions: session.suggestions.clone(),
            is_loading: session.is_loading,
            is_loading_suggestions: session.is_loading_suggestions,
            error: session.error.clone(),
            total_results: session.total_results,
            has_more: session.has_more,
            offset: session.offset(),
            state: session.state(),
            last_query: session.last_query.clone(),
        }
    }
}

/// Query string of `GET /recipes/random`
#[derive(Debug, Deserialize)]
pub struct RandomRecipesParams {
    pub number: Option<u32>,
    pub tags: Option<String>,
}

/// Query string of `GET /recipes/by-ingredients`
#[derive(Debug, Deserialize)]
pub struct IngredientSearchParams {
    /// Comma separated ingredient names
    pub ingredients: String,
    pub number: Option<u32>,
}

impl IngredientSearchParams {
    pub fn ingredient_list(&self) -> Vec<String> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Response for the version endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub agent: String,
    pub version: String,
}

/// Response for the health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
}
