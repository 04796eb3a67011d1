// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Wire types returned by the Spoonacular food API.
//!
//! Only the fields the application reads are declared; everything else in the
//! payload is ignored by serde. Most fields are optional upstream, so they
//! default instead of failing deserialization.

use serde::Deserialize;

/// Recipe object as returned by `complexSearch` (with `addRecipeInformation`),
/// `random` and `{id}/information`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularRecipe {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: Option<String>,
    pub spoonacular_source_url: Option<String>,
    pub aggregate_likes: Option<u32>,
    pub health_score: Option<f64>,
    pub price_per_serving: Option<f64>,
    pub cheap: Option<bool>,
    pub dairy_free: Option<bool>,
    pub gluten_free: Option<bool>,
    pub ketogenic: Option<bool>,
    pub low_fodmap: Option<bool>,
    pub sustainable: Option<bool>,
    pub vegan: Option<bool>,
    pub vegetarian: Option<bool>,
    pub very_healthy: Option<bool>,
    pub very_popular: Option<bool>,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    pub dish_types: Vec<String>,
    pub occasions: Vec<String>,
    pub summary: Option<String>,
    pub instructions: Option<String>,
    pub extended_ingredients: Vec<SpoonacularIngredient>,
    pub nutrition: Option<SpoonacularNutrition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularIngredient {
    pub id: Option<u64>,
    pub name: String,
    pub original: String,
    pub amount: f64,
    pub unit: String,
    pub aisle: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularNutrition {
    pub nutrients: Vec<SpoonacularNutrient>,
    pub caloric_breakdown: Option<SpoonacularCaloricBreakdown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularNutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub percent_of_daily_needs: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularCaloricBreakdown {
    pub percent_protein: f64,
    pub percent_fat: f64,
    pub percent_carbs: f64,
}

/// Envelope of `/recipes/complexSearch`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularSearchResult {
    pub results: Vec<SpoonacularRecipe>,
    pub offset: u32,
    pub number: u32,
    pub total_results: u32,
}

/// Item of `/recipes/autocomplete`
#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularSuggestion {
    pub title: String,
}

/// Envelope of `/recipes/random`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpoonacularRandomResult {
    pub recipes: Vec<SpoonacularRecipe>,
}

/// Item of `/recipes/findByIngredients`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpoonacularIngredientMatch {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub missed_ingredients: Vec<SpoonacularIngredient>,
    pub likes: u32,
}
