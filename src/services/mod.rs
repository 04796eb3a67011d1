// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod catalog;
pub mod debounce;
pub mod fake_source;
pub mod logging;
pub mod recipe_api;
pub mod search_controller;
pub mod sessions;
