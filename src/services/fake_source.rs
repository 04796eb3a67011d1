// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! In-memory `RecipeSource` for tests and offline demos.
//!
//! Searches slice a fixed catalog of recipes by title match. Individual
//! responses can be scripted ahead of time to simulate overlapping pages or
//! remote failures, and every request is recorded for later inspection.

use crate::models::recipe::{IngredientMatch, RecipeDetail, RecipeSummary};
use crate::models::search::{SearchPage, SearchQuery};
use crate::services::recipe_api::{ApiError, RecipeSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

pub struct FakeRecipeSource {
    catalog: Mutex<Vec<RecipeSummary>>,
    scripted_pages: Mutex<VecDeque<Result<SearchPage, ApiError>>>,
    suggestions: Mutex<Result<Vec<String>, ApiError>>,
    search_calls: Mutex<Vec<SearchQuery>>,
    suggestion_calls: Mutex<Vec<String>>,
    delay: Mutex<Duration>,
}

impl Default for FakeRecipeSource {
    fn default() -> Self {
        Self {
            catalog: Mutex::new(Vec::new()),
            scripted_pages: Mutex::new(VecDeque::new()),
            suggestions: Mutex::new(Ok(Vec::new())),
            search_calls: Mutex::new(Vec::new()),
            suggestion_calls: Mutex::new(Vec::new()),
            delay: Mutex::new(Duration::ZERO),
        }
    }
}

impl FakeRecipeSource {
    pub fn with_catalog(recipes: Vec<RecipeSummary>) -> Self {
        let source = Self::default();
        *source.catalog.lock() = recipes;
        source
    }

    /// Catalog of `count` recipes titled "{prefix} #{n}", ids starting at 1
    pub fn numbered(prefix: &str, count: u64) -> Self {
        Self::with_catalog(
            (1..=count)
                .map(|id| RecipeSummary::new(id, format!("{} #{}", prefix, id)))
                .collect(),
        )
    }

    /// Answer the next search with `page` instead of slicing the catalog
    pub fn push_page(&self, page: SearchPage) {
        self.scripted_pages.lock().push_back(Ok(page));
    }

    /// Fail the next search with `error`
    pub fn push_failure(&self, error: ApiError) {
        self.scripted_pages.lock().push_back(Err(error));
    }

    pub fn set_suggestions(&self, suggestions: Result<Vec<String>, ApiError>) {
        *self.suggestions.lock() = suggestions;
    }

    /// Hold every response back for `delay`
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    pub fn search_calls(&self) -> Vec<SearchQuery> {
        self.search_calls.lock().clone()
    }

    pub fn suggestion_calls(&self) -> Vec<String> {
        self.suggestion_calls.lock().clone()
    }

    async fn wait(&self) {
        let delay = *self.delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn matching(&self, term: &str) -> Vec<RecipeSummary> {
        let term = term.to_lowercase();
        self.catalog
            .lock()
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&term))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecipeSource for FakeRecipeSource {
    async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        self.search_calls.lock().push(query.clone());
        self.wait().await;

        if let Some(scripted) = self.scripted_pages.lock().pop_front() {
            return scripted;
        }

        let matches = self.matching(&query.term);
        let records = matches
            .iter()
            .skip(query.offset as usize)
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(SearchPage {
            records,
            total_results: matches.len() as u32,
            offset: query.offset,
        })
    }

    async fn autocomplete(&self, partial: &str, limit: u32) -> Result<Vec<String>, ApiError> {
        self.suggestion_calls.lock().push(partial.to_string());
        self.wait().await;

        self.suggestions
            .lock()
            .clone()
            .map(|all| all.into_iter().take(limit as usize).collect())
    }

    async fn recipe_by_id(&self, id: u64) -> Result<RecipeDetail, ApiError> {
        let summary = self
            .catalog
            .lock()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)?;

        Ok(RecipeDetail {
            summary,
            description: None,
            instructions: None,
            ingredients: Vec::new(),
            occasions: Vec::new(),
            nutrition: None,
        })
    }

    async fn random_recipes(
        &self,
        number: u32,
        _tags: Option<&str>,
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        Ok(self
            .catalog
            .lock()
            .iter()
            .take(number as usize)
            .cloned()
            .collect())
    }

    async fn recipes_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<IngredientMatch>, ApiError> {
        let wanted: Vec<String> = ingredients.iter().map(|i| i.to_lowercase()).collect();
        Ok(self
            .catalog
            .lock()
            .iter()
            .filter_map(|r| {
                let title = r.title.to_lowercase();
                let used = wanted.iter().filter(|i| title.contains(i.as_str())).count() as u32;
                (used > 0).then(|| IngredientMatch {
                    id: r.id,
                    title: r.title.clone(),
                    image: r.image.clone(),
                    used_ingredient_count: used,
                    missed_ingredient_count: 0,
                    missed_ingredients: Vec::new(),
                    likes: r.likes,
                })
            })
            .take(number as usize)
            .collect())
    }
}
