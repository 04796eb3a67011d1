// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Fixed filter vocabularies of the Spoonacular API.
//!
//! These lists are documented upstream and change rarely, so they are served
//! from memory instead of spending API quota on them.

pub const CUISINES: &[&str] = &[
    "African",
    "American",
    "British",
    "Cajun",
    "Caribbean",
    "Chinese",
    "Eastern European",
    "European",
    "French",
    "German",
    "Greek",
    "Indian",
    "Irish",
    "Italian",
    "Japanese",
    "Jewish",
    "Korean",
    "Latin American",
    "Mediterranean",
    "Mexican",
    "Middle Eastern",
    "Nordic",
    "Southern",
    "Spanish",
    "Thai",
    "Vietnamese",
];

pub const DIETS: &[&str] = &[
    "Gluten Free",
    "Ketogenic",
    "Vegetarian",
    "Lacto-Vegetarian",
    "Ovo-Vegetarian",
    "Vegan",
    "Pescetarian",
    "Paleo",
    "Primal",
    "Low FODMAP",
    "Whole30",
];

pub const MEAL_TYPES: &[&str] = &[
    "main course",
    "side dish",
    "dessert",
    "appetizer",
    "salad",
    "bread",
    "breakfast",
    "soup",
    "beverage",
    "sauce",
    "marinade",
    "fingerfood",
    "snack",
    "drink",
];

/// Curated starting points for the search box
pub const POPULAR_SEARCHES: &[&str] = &[
    "Italian Pasta",
    "Healthy Breakfast",
    "Quick Dinner",
    "Vegan Recipes",
    "Chicken Curry",
    "Chocolate Dessert",
    "Mediterranean",
    "Asian Stir Fry",
];

/// Case-insensitive lookup returning the canonical spelling
pub fn canonical<'a>(vocabulary: &'a [&'a str], value: &str) -> Option<&'a str> {
    let value = value.trim();
    vocabulary
        .iter()
        .copied()
        .find(|entry| entry.eq_ignore_ascii_case(value))
}

pub fn to_owned_list(vocabulary: &[&str]) -> Vec<String> {
    vocabulary.iter().map(|s| s.to_string()).collect()
}
