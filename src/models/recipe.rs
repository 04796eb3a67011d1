// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::spoonacular::{
    SpoonacularIngredient, SpoonacularIngredientMatch, SpoonacularNutrition, SpoonacularRecipe,
};
use serde::{Deserialize, Serialize};

/// Cuisine tag used when the upstream recipe lists none
pub const DEFAULT_CUISINE: &str = "International";

/// Rough effort classification derived from the total preparation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// More than an hour is Hard, more than half an hour is Medium
    pub fn from_ready_minutes(minutes: u32) -> Self {
        match minutes {
            m if m > 60 => Difficulty::Hard,
            m if m > 30 => Difficulty::Medium,
            _ => Difficulty::Easy,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Dietary and popularity badges reported by the recipe API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryFlags {
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub very_healthy: bool,
    pub cheap: bool,
    pub very_popular: bool,
    pub sustainable: bool,
    pub ketogenic: bool,
    pub low_fodmap: bool,
}

/// A recipe as shown in result lists.
///
/// `id` is the identity of the record: two summaries with the same id are the
/// same recipe regardless of the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    /// Estimated total time in minutes
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_serving: Option<f64>,
    pub likes: u32,
    pub dish_types: Vec<String>,
    pub diets: Vec<String>,
    pub flags: DietaryFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RecipeSummary {
    /// Minimal summary, used where only identity and title matter
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: None,
            cooking_time: 0,
            servings: 0,
            difficulty: Difficulty::Easy,
            cuisine: DEFAULT_CUISINE.to_string(),
            health_score: None,
            price_per_serving: None,
            likes: 0,
            dish_types: Vec::new(),
            diets: Vec::new(),
            flags: DietaryFlags::default(),
            source_url: None,
        }
    }
}

impl From<&SpoonacularRecipe> for RecipeSummary {
    fn from(recipe: &SpoonacularRecipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.ready_in_minutes,
            servings: recipe.servings,
            difficulty: Difficulty::from_ready_minutes(recipe.ready_in_minutes),
            cuisine: recipe
                .cuisines
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_CUISINE.to_string()),
            health_score: recipe.health_score,
            price_per_serving: recipe.price_per_serving,
            likes: recipe.aggregate_likes.unwrap_or(0),
            dish_types: recipe.dish_types.clone(),
            diets: recipe.diets.clone(),
            flags: DietaryFlags {
                vegan: recipe.vegan.unwrap_or(false),
                vegetarian: recipe.vegetarian.unwrap_or(false),
                gluten_free: recipe.gluten_free.unwrap_or(false),
                dairy_free: recipe.dairy_free.unwrap_or(false),
                very_healthy: recipe.very_healthy.unwrap_or(false),
                cheap: recipe.cheap.unwrap_or(false),
                very_popular: recipe.very_popular.unwrap_or(false),
                sustainable: recipe.sustainable.unwrap_or(false),
                ketogenic: recipe.ketogenic.unwrap_or(false),
                low_fodmap: recipe.low_fodmap.unwrap_or(false),
            },
            source_url: recipe
                .source_url
                .clone()
                .or_else(|| recipe.spoonacular_source_url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Option<u64>,
    pub name: String,
    /// Ingredient line as written by the recipe author
    pub original: String,
    pub amount: f64,
    pub unit: String,
    pub aisle: Option<String>,
}

impl From<&SpoonacularIngredient> for Ingredient {
    fn from(ingredient: &SpoonacularIngredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            original: ingredient.original.clone(),
            amount: ingredient.amount,
            unit: ingredient.unit.clone(),
            aisle: ingredient.aisle.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub percent_of_daily_needs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub nutrients: Vec<Nutrient>,
    pub percent_protein: Option<f64>,
    pub percent_fat: Option<f64>,
    pub percent_carbs: Option<f64>,
}

impl Nutrition {
    /// Look up a nutrient by name, case-insensitively ("Calories", "Protein", ...)
    pub fn nutrient(&self, name: &str) -> Option<&Nutrient> {
        self.nutrients
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
    }
}

impl From<&SpoonacularNutrition> for Nutrition {
    fn from(nutrition: &SpoonacularNutrition) -> Self {
        let breakdown = nutrition.caloric_breakdown.as_ref();
        Self {
            nutrients: nutrition
                .nutrients
                .iter()
                .map(|n| Nutrient {
                    name: n.name.clone(),
                    amount: n.amount,
                    unit: n.unit.clone(),
                    percent_of_daily_needs: n.percent_of_daily_needs,
                })
                .collect(),
            percent_protein: breakdown.map(|b| b.percent_protein),
            percent_fat: breakdown.map(|b| b.percent_fat),
            percent_carbs: breakdown.map(|b| b.percent_carbs),
        }
    }
}

/// Full recipe as shown on a detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    /// HTML blurb provided by the API
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub occasions: Vec<String>,
    pub nutrition: Option<Nutrition>,
}

impl From<&SpoonacularRecipe> for RecipeDetail {
    fn from(recipe: &SpoonacularRecipe) -> Self {
        Self {
            summary: RecipeSummary::from(recipe),
            description: recipe.summary.clone(),
            instructions: recipe.instructions.clone(),
            ingredients: recipe
                .extended_ingredients
                .iter()
                .map(Ingredient::from)
                .collect(),
            occasions: recipe.occasions.clone(),
            nutrition: recipe.nutrition.as_ref().map(Nutrition::from),
        }
    }
}

/// A recipe found from a list of pantry ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMatch {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    /// Names of the ingredients the caller would still need to buy
    pub missed_ingredients: Vec<String>,
    pub likes: u32,
}

impl From<&SpoonacularIngredientMatch> for IngredientMatch {
    fn from(found: &SpoonacularIngredientMatch) -> Self {
        Self {
            id: found.id,
            title: found.title.clone(),
            image: found.image.clone(),
            used_ingredient_count: found.used_ingredient_count,
            missed_ingredient_count: found.missed_ingredient_count,
            missed_ingredients: found
                .missed_ingredients
                .iter()
                .map(|i| i.name.clone())
                .collect(),
            likes: found.likes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::spoonacular::{SpoonacularCaloricBreakdown, SpoonacularNutrient};

    fn pasta() -> SpoonacularRecipe {
        SpoonacularRecipe {
            id: 716429,
            title: "Pasta with Garlic".to_string(),
            image: Some("https://img.spoonacular.com/recipes/716429-312x231.jpg".to_string()),
            ready_in_minutes: 45,
            servings: 2,
            aggregate_likes: Some(209),
            cuisines: vec!["Italian".to_string(), "European".to_string()],
            vegetarian: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_difficulty_thresholds() {
        assert_eq!(Difficulty::from_ready_minutes(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_ready_minutes(30), Difficulty::Easy);
        assert_eq!(Difficulty::from_ready_minutes(31), Difficulty::Medium);
        assert_eq!(Difficulty::from_ready_minutes(60), Difficulty::Medium);
        assert_eq!(Difficulty::from_ready_minutes(61), Difficulty::Hard);
    }

    #[test]
    fn test_summary_takes_first_cuisine() {
        let summary = RecipeSummary::from(&pasta());
        assert_eq!(summary.id, 716429);
        assert_eq!(summary.cuisine, "Italian");
        assert_eq!(summary.cooking_time, 45);
        assert_eq!(summary.difficulty, Difficulty::Medium);
        assert_eq!(summary.likes, 209);
        assert!(summary.flags.vegetarian);
        assert!(!summary.flags.vegan);
    }

    #[test]
    fn test_summary_defaults_cuisine_when_missing() {
        let recipe = SpoonacularRecipe {
            cuisines: Vec::new(),
            ..pasta()
        };
        assert_eq!(RecipeSummary::from(&recipe).cuisine, DEFAULT_CUISINE);
    }

    #[test]
    fn test_summary_falls_back_to_spoonacular_source_url() {
        let recipe = SpoonacularRecipe {
            spoonacular_source_url: Some("https://spoonacular.com/pasta-716429".to_string()),
            ..pasta()
        };
        assert_eq!(
            RecipeSummary::from(&recipe).source_url.as_deref(),
            Some("https://spoonacular.com/pasta-716429")
        );
    }

    #[test]
    fn test_detail_converts_nutrition() {
        let recipe = SpoonacularRecipe {
            nutrition: Some(SpoonacularNutrition {
                nutrients: vec![SpoonacularNutrient {
                    name: "Calories".to_string(),
                    amount: 584.46,
                    unit: "kcal".to_string(),
                    percent_of_daily_needs: Some(29.22),
                }],
                caloric_breakdown: Some(SpoonacularCaloricBreakdown {
                    percent_protein: 14.0,
                    percent_fat: 31.0,
                    percent_carbs: 55.0,
                }),
            }),
            ..pasta()
        };

        let detail = RecipeDetail::from(&recipe);
        let nutrition = detail.nutrition.unwrap();
        assert_eq!(nutrition.nutrient("calories").unwrap().unit, "kcal");
        assert_eq!(nutrition.percent_carbs, Some(55.0));
        assert!(nutrition.nutrient("Sugar").is_none());
    }

    #[test]
    fn test_wire_recipe_tolerates_missing_fields() {
        let recipe: SpoonacularRecipe =
            serde_json::from_str(r#"{"id": 1, "title": "Toast"}"#).unwrap();
        let summary = RecipeSummary::from(&recipe);
        assert_eq!(summary.title, "Toast");
        assert_eq!(summary.difficulty, Difficulty::Easy);
        assert_eq!(summary.cuisine, DEFAULT_CUISINE);
    }
}
