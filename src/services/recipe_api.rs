// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::recipe::{IngredientMatch, RecipeDetail, RecipeSummary};
use crate::models::search::{SearchPage, SearchQuery};
use crate::models::spoonacular::{
    SpoonacularIngredientMatch, SpoonacularRandomResult, SpoonacularRecipe,
    SpoonacularSearchResult, SpoonacularSuggestion,
};
use crate::services::logging::redact_secret;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const PLACEHOLDER_API_KEY: &str = "your_spoonacular_api_key_here";
const MIN_API_KEY_LEN: usize = 32;

/// Failure talking to the recipe service.
///
/// The `Display` text is meant for end users and is what a search session
/// stores as its error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid API key. Please check your SPOONACULAR_API_KEY setting")]
    Unauthorized,
    #[error("API quota exceeded. Please upgrade your Spoonacular plan or wait for quota reset")]
    QuotaExceeded,
    #[error("API access forbidden. Please check your API key permissions")]
    Forbidden,
    #[error("API endpoint not found")]
    NotFound,
    #[error("API request failed with status {0}")]
    Status(u16),
    /// No response at all: connection failure or timeout
    #[error("Network error - please check your internet connection")]
    Network,
    #[error("Unexpected response from recipe service: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            402 => ApiError::QuotaExceeded,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            other => ApiError::Status(other),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            ApiError::Network
        } else {
            ApiError::Other(err.to_string())
        }
    }
}

/// The remote recipe service as seen by the rest of the application
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// One page of recipes matching `query`, starting at `query.offset`
    async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchPage, ApiError>;

    /// Recipe titles completing `partial`
    async fn autocomplete(&self, partial: &str, limit: u32) -> Result<Vec<String>, ApiError>;

    async fn recipe_by_id(&self, id: u64) -> Result<RecipeDetail, ApiError>;

    async fn random_recipes(
        &self,
        number: u32,
        tags: Option<&str>,
    ) -> Result<Vec<RecipeSummary>, ApiError>;

    async fn recipes_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<IngredientMatch>, ApiError>;

    /// Whether the service currently answers requests
    async fn health_check(&self) -> bool {
        self.random_recipes(1, None).await.is_ok()
    }
}

/// Configuration for the Spoonacular client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = var("SPOONACULAR_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("SPOONACULAR_API_KEY must be set (get a free key at https://spoonacular.com/food-api)")?;

        let base_url = var("SPOONACULAR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)
            .with_context(|| format!("SPOONACULAR_BASE_URL is not a valid URL: {}", base_url))?;

        let timeout_secs: u64 = var("SPOONACULAR_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .context("SPOONACULAR_TIMEOUT_SECS must be a valid number")?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Sanity check of the key shape; problems are worth a warning, not a failure
    pub fn key_warning(&self) -> Option<&'static str> {
        if self.api_key == PLACEHOLDER_API_KEY {
            Some("SPOONACULAR_API_KEY still holds the placeholder value")
        } else if self.api_key.len() < MIN_API_KEY_LEN {
            Some("SPOONACULAR_API_KEY seems too short, Spoonacular keys are usually 32+ characters")
        } else {
            None
        }
    }
}

/// HTTP client for the Spoonacular recipe API
pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        if let Some(warning) = config.key_warning() {
            warn!("{}", warning);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("recipe-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        info!(
            base_url = %config.base_url,
            api_key = %redact_secret(&config.api_key),
            "Using Spoonacular API"
        );

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// GET `{base_url}{endpoint}` with the API key appended and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, ?params, "Recipe API request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Recipe API request failed");
                ApiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "Recipe API returned an error status");
            return Err(ApiError::from_status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Query string for `/recipes/complexSearch`
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", query.term.clone()),
        ("number", query.page_size.to_string()),
        ("offset", query.offset.to_string()),
        ("addRecipeInformation", "true".to_string()),
        ("fillIngredients", "false".to_string()),
        ("sort", "popularity".to_string()),
        ("sortDirection", "desc".to_string()),
    ];

    let filters = [
        ("cuisine", &query.cuisine),
        ("diet", &query.diet),
        ("intolerances", &query.intolerances),
        ("type", &query.dish_type),
    ];
    for (name, value) in filters {
        if let Some(value) = value {
            params.push((name, value.clone()));
        }
    }

    if let Some(minutes) = query.max_ready_time {
        params.push(("maxReadyTime", minutes.to_string()));
    }

    params
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn search_recipes(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let data: SpoonacularSearchResult = self
            .get_json("/recipes/complexSearch", &search_params(query))
            .await?;

        Ok(SearchPage {
            records: data.results.iter().map(RecipeSummary::from).collect(),
            total_results: data.total_results,
            offset: data.offset,
        })
    }

    async fn autocomplete(&self, partial: &str, limit: u32) -> Result<Vec<String>, ApiError> {
        let data: Vec<SpoonacularSuggestion> = self
            .get_json(
                "/recipes/autocomplete",
                &[("query", partial.to_string()), ("number", limit.to_string())],
            )
            .await?;

        Ok(data.into_iter().map(|s| s.title).collect())
    }

    async fn recipe_by_id(&self, id: u64) -> Result<RecipeDetail, ApiError> {
        let data: SpoonacularRecipe = self
            .get_json(
                &format!("/recipes/{}/information", id),
                &[("includeNutrition", "true".to_string())],
            )
            .await?;

        Ok(RecipeDetail::from(&data))
    }

    async fn random_recipes(
        &self,
        number: u32,
        tags: Option<&str>,
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        let mut params = vec![("number", number.to_string())];
        if let Some(tags) = tags.filter(|t| !t.trim().is_empty()) {
            params.push(("tags", tags.to_string()));
        }

        let data: SpoonacularRandomResult = self.get_json("/recipes/random", &params).await?;

        Ok(data.recipes.iter().map(RecipeSummary::from).collect())
    }

    async fn recipes_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<IngredientMatch>, ApiError> {
        let data: Vec<SpoonacularIngredientMatch> = self
            .get_json(
                "/recipes/findByIngredients",
                &[
                    ("ingredients", ingredients.join(",")),
                    ("number", number.to_string()),
                    ("ranking", "1".to_string()),
                    ("ignorePantry", "true".to_string()),
                ],
            )
            .await?;

        Ok(data.iter().map(IngredientMatch::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from_status(401), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(402), ApiError::QuotaExceeded);
        assert_eq!(ApiError::from_status(403), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404), ApiError::NotFound);
        assert_eq!(ApiError::from_status(503), ApiError::Status(503));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            ApiError::Network.to_string(),
            "Network error - please check your internet connection"
        );
        assert_eq!(
            ApiError::Status(500).to_string(),
            "API request failed with status 500"
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = ApiConfig::from_vars(vars(&[("SPOONACULAR_API_KEY", "k")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_config_requires_api_key() {
        assert!(ApiConfig::from_vars(vars(&[])).is_err());
        assert!(ApiConfig::from_vars(vars(&[("SPOONACULAR_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_config_rejects_invalid_base_url() {
        let result = ApiConfig::from_vars(vars(&[
            ("SPOONACULAR_API_KEY", "k"),
            ("SPOONACULAR_BASE_URL", "not a url"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = ApiConfig::from_vars(vars(&[
            ("SPOONACULAR_API_KEY", "k"),
            ("SPOONACULAR_BASE_URL", "http://localhost:8080/"),
            ("SPOONACULAR_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_key_warnings() {
        let mut config = ApiConfig::from_vars(vars(&[(
            "SPOONACULAR_API_KEY",
            "your_spoonacular_api_key_here",
        )]))
        .unwrap();
        assert!(config.key_warning().unwrap().contains("placeholder"));

        config.api_key = "short".to_string();
        assert!(config.key_warning().unwrap().contains("too short"));

        config.api_key = "a".repeat(32);
        assert!(config.key_warning().is_none());
    }

    #[test]
    fn test_search_params_include_filters() {
        let query = SearchQuery::new("pasta")
            .with_cuisine("Italian")
            .with_dish_type("main course")
            .at_offset(18);
        let params = search_params(&query);

        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("query"), Some("pasta"));
        assert_eq!(get("number"), Some("9"));
        assert_eq!(get("offset"), Some("18"));
        assert_eq!(get("cuisine"), Some("Italian"));
        assert_eq!(get("type"), Some("main course"));
        assert_eq!(get("diet"), None);
        assert_eq!(get("maxReadyTime"), None);
    }
}
