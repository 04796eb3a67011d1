// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::services::recipe_api::RecipeSource;
use crate::services::search_controller::{SearchController, SearchOptions};
use anyhow::{bail, Context, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Live search sessions of the HTTP service, one controller per client view.
///
/// A session lives from `create` until `remove`; dropping the last handle of
/// a controller also disarms its pending auto-search.
pub struct SessionRegistry {
    source: Arc<dyn RecipeSource>,
    options: SearchOptions,
    max_sessions: usize,
    sessions: RwLock<HashMap<Uuid, Arc<SearchController>>>,
}

impl SessionRegistry {
    pub fn new(source: Arc<dyn RecipeSource>, options: SearchOptions, max_sessions: usize) -> Self {
        Self {
            source,
            options,
            max_sessions,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Read `MAX_SESSIONS` from the environment
    pub fn max_sessions_from_env() -> Result<usize> {
        env::var("MAX_SESSIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_SESSIONS.to_string())
            .parse()
            .context("MAX_SESSIONS must be a valid number")
    }

    /// Open a new empty session
    pub fn create(&self) -> Result<Uuid> {
        let mut sessions = self.sessions.write();
        if sessions.len() >= self.max_sessions {
            bail!("Session limit of {} reached", self.max_sessions);
        }

        let id = Uuid::now_v7();
        let controller = SearchController::new(self.source.clone(), self.options.clone());
        sessions.insert(id, Arc::new(controller));
        info!(session = %id, open = sessions.len(), "Search session opened");
        Ok(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<SearchController>> {
        self.sessions.read().get(id).cloned()
    }

    /// Close a session. Returns false if it did not exist.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            info!(session = %id, "Search session closed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
