// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Recipe discovery backend: a Spoonacular client plus the search session
//! controller that views use for incremental, deduplicated recipe search.

pub mod app;
pub mod models;
pub mod services;
