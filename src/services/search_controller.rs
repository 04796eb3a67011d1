// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Search session controller.
//!
//! A `SearchController` sits between a view and a `RecipeSource`. It owns a
//! single `SearchSession` and is the only thing that ever writes to it; views
//! read snapshots or subscribe to changes through a `watch` channel.
//!
//! Every state transition is applied with one `send_modify` /
//! `send_if_modified` call, so it is always computed from the state current at
//! that moment. The pagination offset is captured once, when a request is
//! issued.
//!
//! Remote failures never escape: they end up in `SearchSession::error`
//! (searches) or are swallowed (suggestions). Dropping an operation's future
//! before the response arrives clears its loading flag again, so a
//! cancelled request never blocks the session.

use crate::models::recipe::RecipeSummary;
use crate::models::search::{SearchPage, SearchQuery, SearchSession, DEFAULT_PAGE_SIZE};
use crate::services::debounce::Debouncer;
use crate::services::recipe_api::{ApiError, RecipeSource};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Tunables of a search session
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Quiet period before an auto-search fires
    pub debounce: Duration,
    /// Shorter input does not trigger suggestions or auto-search
    pub min_query_length: usize,
    pub page_size: u32,
    pub suggestion_limit: u32,
    /// Search automatically while the user types (see `set_query`)
    pub auto_search: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_length: 2,
            page_size: DEFAULT_PAGE_SIZE,
            suggestion_limit: 6,
            auto_search: false,
        }
    }
}

impl SearchOptions {
    /// Load options from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let debounce_ms: u64 = var("SEARCH_DEBOUNCE_MS")
            .map(|v| v.parse())
            .transpose()
            .context("SEARCH_DEBOUNCE_MS must be a valid number")?
            .unwrap_or(defaults.debounce.as_millis() as u64);

        let min_query_length: usize = var("SEARCH_MIN_QUERY_LENGTH")
            .map(|v| v.parse())
            .transpose()
            .context("SEARCH_MIN_QUERY_LENGTH must be a valid number")?
            .unwrap_or(defaults.min_query_length);

        let page_size: u32 = var("SEARCH_PAGE_SIZE")
            .map(|v| v.parse())
            .transpose()
            .context("SEARCH_PAGE_SIZE must be a valid number")?
            .filter(|size: &u32| *size > 0)
            .unwrap_or(defaults.page_size);

        let suggestion_limit: u32 = var("SEARCH_SUGGESTION_LIMIT")
            .map(|v| v.parse())
            .transpose()
            .context("SEARCH_SUGGESTION_LIMIT must be a valid number")?
            .unwrap_or(defaults.suggestion_limit);

        let auto_search = var("SEARCH_AUTO").map(|v| v == "true").unwrap_or(false);

        Ok(Self {
            debounce: Duration::from_millis(debounce_ms),
            min_query_length,
            page_size,
            suggestion_limit,
            auto_search,
        })
    }
}

/// What a request needs to remember between issue and completion
struct PendingSearch {
    generation: u64,
    ticket: u64,
    query: SearchQuery,
    offset: u32,
}

/// Releases a loading flag when a request future is dropped mid-flight.
///
/// `release` runs only while the guard is armed and must leave the session
/// untouched unless the flag still belongs to `ticket`.
struct InFlight<'a> {
    state: &'a watch::Sender<SearchSession>,
    ticket: u64,
    release: fn(&mut SearchSession, u64) -> bool,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(
        state: &'a watch::Sender<SearchSession>,
        ticket: u64,
        release: fn(&mut SearchSession, u64) -> bool,
    ) -> Self {
        Self {
            state,
            ticket,
            release,
            armed: true,
        }
    }

    /// The request completed normally
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let (release, ticket) = (self.release, self.ticket);
            if self.state.send_if_modified(|session| release(session, ticket)) {
                debug!(ticket, "Request cancelled before completion");
            }
        }
    }
}

fn release_search(session: &mut SearchSession, ticket: u64) -> bool {
    if session.search_ticket != ticket || !session.is_loading {
        return false;
    }
    session.is_loading = false;
    true
}

fn release_suggestions(session: &mut SearchSession, ticket: u64) -> bool {
    if session.suggestion_generation != ticket || !session.is_loading_suggestions {
        return false;
    }
    session.is_loading_suggestions = false;
    true
}

pub struct SearchController {
    source: Arc<dyn RecipeSource>,
    options: SearchOptions,
    state: watch::Sender<SearchSession>,
    debouncer: Debouncer,
}

impl SearchController {
    pub fn new(source: Arc<dyn RecipeSource>, options: SearchOptions) -> Self {
        let debouncer = Debouncer::new(options.debounce);
        Self {
            source,
            options,
            state: watch::Sender::new(SearchSession::default()),
            debouncer,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> SearchSession {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state transition
    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state.subscribe()
    }

    /// Run a search.
    ///
    /// With `append == false` this starts a new logical search: the current
    /// results are dropped before the request goes out and the request starts
    /// at offset 0. With `append == true` the next page is requested at an
    /// offset equal to the number of results accumulated so far.
    pub async fn search(&self, query: SearchQuery, append: bool) {
        let query = query.normalized(self.options.page_size);
        let mut pending = None;
        self.state.send_modify(|session| {
            pending = Some(begin_search(session, query, append));
        });

        if let Some(pending) = pending {
            self.execute(pending).await;
        }
    }

    /// Fetch the next page of the last search.
    ///
    /// Silently does nothing while a search is in flight, when the remote side
    /// reported no more results, or before any search succeeded.
    pub async fn load_more(&self) {
        let mut pending = None;
        self.state.send_if_modified(|session| {
            if session.is_loading || !session.has_more {
                return false;
            }
            let Some(query) = session.last_query.clone() else {
                return false;
            };
            pending = Some(begin_search(session, query, true));
            true
        });

        match pending {
            Some(pending) => self.execute(pending).await,
            None => debug!("load_more ignored: nothing to load or already loading"),
        }
    }

    async fn execute(&self, pending: PendingSearch) {
        let mut in_flight = InFlight::new(&self.state, pending.ticket, release_search);
        let request = pending.query.at_offset(pending.offset);
        debug!(
            term = %request.term,
            offset = request.offset,
            page_size = request.page_size,
            "Searching recipes"
        );

        let outcome = self.source.search_recipes(&request).await;
        in_flight.disarm();

        self.state.send_if_modified(|session| {
            if session.generation != pending.generation {
                debug!(term = %request.term, "Discarding response of a superseded search");
                return false;
            }
            complete_search(session, pending.query, outcome);
            true
        });
    }

    /// Refresh autocomplete suggestions for partial input.
    ///
    /// Input shorter than `min_query_length` clears the suggestions without a
    /// request. Failures clear the suggestions and are otherwise ignored.
    pub async fn get_suggestions(&self, partial: &str) {
        let partial = partial.trim();

        if partial.chars().count() < self.options.min_query_length {
            self.state.send_if_modified(|session| {
                let changed = !session.suggestions.is_empty() || session.is_loading_suggestions;
                session.suggestion_generation += 1;
                session.suggestions.clear();
                session.is_loading_suggestions = false;
                changed
            });
            return;
        }

        let mut generation = 0;
        self.state.send_modify(|session| {
            session.suggestion_generation += 1;
            session.is_loading_suggestions = true;
            generation = session.suggestion_generation;
        });

        let mut in_flight = InFlight::new(&self.state, generation, release_suggestions);
        let outcome = self
            .source
            .autocomplete(partial, self.options.suggestion_limit)
            .await;
        in_flight.disarm();

        self.state.send_if_modified(|session| {
            if session.suggestion_generation != generation {
                return false;
            }
            session.is_loading_suggestions = false;
            session.suggestions = outcome.unwrap_or_else(|e| {
                debug!(error = %e, "Suggestions unavailable");
                Vec::new()
            });
            true
        });
    }

    /// Reset the session to its initial empty state.
    ///
    /// Responses still in flight are discarded when they arrive, and a pending
    /// auto-search is cancelled.
    pub fn clear_results(&self) {
        self.debouncer.cancel();
        self.state.send_modify(|session| {
            *session = SearchSession {
                generation: session.generation + 1,
                search_ticket: session.search_ticket,
                suggestion_generation: session.suggestion_generation + 1,
                ..SearchSession::default()
            };
        });
    }

    /// Dismiss the last error, keeping everything else
    pub fn clear_error(&self) {
        self.state.send_if_modified(|session| session.error.take().is_some());
    }

    /// Track free-text input for auto-search.
    ///
    /// Only active when `SearchOptions::auto_search` is set. Input long
    /// enough arms the debounce timer; once the input stays unchanged for the
    /// quiet period a new search for it runs. Shorter input disarms the timer.
    /// Must be called from within a Tokio runtime.
    pub fn set_query(self: &Arc<Self>, input: &str) {
        if !self.options.auto_search {
            return;
        }

        let term = input.trim().to_string();
        if term.chars().count() < self.options.min_query_length {
            self.debouncer.cancel();
            return;
        }

        let controller = Arc::downgrade(self);
        let query = SearchQuery::new(term).with_page_size(self.options.page_size);
        self.debouncer.schedule(async move {
            if let Some(controller) = controller.upgrade() {
                controller.search(query, false).await;
            }
        });
    }

    /// Whether an auto-search is armed but has not fired yet
    pub fn has_pending_auto_search(&self) -> bool {
        self.debouncer.is_pending()
    }
}

/// Mark the session as loading and capture everything the request needs
fn begin_search(session: &mut SearchSession, query: SearchQuery, append: bool) -> PendingSearch {
    if !append {
        session.generation += 1;
        session.recipes.clear();
        session.total_results = 0;
        session.has_more = false;
    }
    session.search_ticket += 1;
    session.is_loading = true;
    session.error = None;

    PendingSearch {
        generation: session.generation,
        ticket: session.search_ticket,
        offset: session.offset(),
        query,
    }
}

fn complete_search(
    session: &mut SearchSession,
    query: SearchQuery,
    outcome: std::result::Result<SearchPage, ApiError>,
) {
    session.is_loading = false;

    match outcome {
        Ok(page) if page.records.is_empty() => {
            info!(term = %query.term, "Search reached the end of results");
            session.has_more = false;
            session.total_results = page.total_results;
            session.last_query = Some(query);
        }
        Ok(page) => {
            let received = page.records.len();
            let added = merge_unique(&mut session.recipes, page.records);
            session.total_results = page.total_results;
            session.has_more = session.offset() < page.total_results;
            debug!(
                term = %query.term,
                received,
                added,
                accumulated = session.recipes.len(),
                total = page.total_results,
                has_more = session.has_more,
                "Search succeeded"
            );
            session.last_query = Some(query);
        }
        Err(e) => {
            warn!(term = %query.term, error = %e, "Search failed");
            session.error = Some(e.to_string());
        }
    }
}

/// Append the records of `incoming` whose id is not in `existing` yet,
/// keeping arrival order. Returns how many were appended.
pub fn merge_unique(existing: &mut Vec<RecipeSummary>, incoming: Vec<RecipeSummary>) -> usize {
    let mut seen: HashSet<u64> = existing.iter().map(|r| r.id).collect();
    let before = existing.len();
    existing.extend(incoming.into_iter().filter(|r| seen.insert(r.id)));
    existing.len() - before
}
