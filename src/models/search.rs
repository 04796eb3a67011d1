// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::recipe::RecipeSummary;
use serde::{Deserialize, Serialize};

/// Number of recipes requested per page when the caller does not say otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Largest page the recipe API serves in one request
pub const MAX_PAGE_SIZE: u32 = 100;

/// A recipe search request: free text plus optional filters and a page window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    /// Spoonacular calls this `type` (main course, dessert, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_type: Option<String>,
    /// Comma separated list, e.g. "gluten,peanut"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intolerances: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ready_time: Option<u32>,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub offset: u32,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page_size: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    pub fn with_dish_type(mut self, dish_type: impl Into<String>) -> Self {
        self.dish_type = Some(dish_type.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn at_offset(&self, offset: u32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// Canonical form of the query for a new logical search: trimmed term,
    /// blank filters dropped, page size defaulted and capped at
    /// `MAX_PAGE_SIZE`, offset rewound to zero.
    pub fn normalized(self, default_page_size: u32) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            term: self.term.trim().to_string(),
            cuisine: non_blank(self.cuisine),
            diet: non_blank(self.diet),
            dish_type: non_blank(self.dish_type),
            intolerances: non_blank(self.intolerances),
            max_ready_time: self.max_ready_time,
            page_size: if self.page_size == 0 {
                default_page_size
            } else {
                self.page_size
            }
            .clamp(1, MAX_PAGE_SIZE),
            offset: 0,
        }
    }
}

/// One page of search results from the recipe collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub records: Vec<RecipeSummary>,
    /// Total number of matches the remote side knows about for this query
    pub total_results: u32,
    pub offset: u32,
}

/// Coarse phase of a search session, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    Searching,
    Error,
}

/// Search state owned by one `SearchController`.
///
/// `recipes` is kept in arrival order and never holds two records with the
/// same id. The offset of the next page is always `recipes.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    pub recipes: Vec<RecipeSummary>,
    pub suggestions: Vec<String>,
    pub is_loading: bool,
    pub is_loading_suggestions: bool,
    pub error: Option<String>,
    pub total_results: u32,
    pub has_more: bool,
    /// Query of the last successful search, offset stripped
    pub last_query: Option<SearchQuery>,
    pub(crate) generation: u64,
    /// Bumped by every search request, fresh or appended
    pub(crate) search_ticket: u64,
    pub(crate) suggestion_generation: u64,
}

impl SearchSession {
    /// Offset the next page request will use
    pub fn offset(&self) -> u32 {
        self.recipes.len() as u32
    }

    pub fn state(&self) -> SearchState {
        if self.is_loading {
            SearchState::Searching
        } else if self.error.is_some() {
            SearchState::Error
        } else {
            SearchState::Idle
        }
    }
}
