// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use recipe_scout::models::search::SearchQuery;
use recipe_scout::services::recipe_api::{ApiConfig, RecipeSource, SpoonacularClient};
use recipe_scout::services::search_controller::{SearchController, SearchOptions};
use std::sync::Arc;

// Integration tests against the live Spoonacular API
// These tests require SPOONACULAR_API_KEY and spend API quota
// Run with: cargo test --test spoonacular_integration_test -- --ignored

fn live_source() -> Arc<SpoonacularClient> {
    let config = ApiConfig::from_env().expect("SPOONACULAR_API_KEY must be set");
    Arc::new(SpoonacularClient::new(config).expect("Failed to build client"))
}

#[tokio::test]
#[ignore]
async fn test_live_search_and_load_more() {
    let controller = SearchController::new(live_source(), SearchOptions::default());

    controller
        .search(SearchQuery::new("pasta").with_cuisine("Italian"), false)
        .await;
    let first = controller.snapshot();
    assert!(first.error.is_none(), "search failed: {:?}", first.error);
    assert!(!first.recipes.is_empty());

    if first.has_more {
        controller.load_more().await;
        let second = controller.snapshot();
        assert!(second.error.is_none(), "load more failed: {:?}", second.error);
        assert!(second.recipes.len() > first.recipes.len());
        assert_eq!(second.recipes[..first.recipes.len()], first.recipes[..]);
    }

    println!(
        "Loaded {} of {} results",
        controller.snapshot().recipes.len(),
        controller.snapshot().total_results
    );
}

#[tokio::test]
#[ignore]
async fn test_live_autocomplete_and_detail() {
    let source = live_source();

    let titles = source.autocomplete("chick", 5).await.expect("autocomplete failed");
    println!("Suggestions: {:?}", titles);
    assert!(titles.len() <= 5);

    let page = source
        .search_recipes(&SearchQuery::new("chicken"))
        .await
        .expect("search failed");
    let first = page.records.first().expect("no chicken recipes found");

    let detail = source.recipe_by_id(first.id).await.expect("detail failed");
    assert_eq!(detail.summary.id, first.id);
    assert!(!detail.ingredients.is_empty());
}
