// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recipe_scout::app::{create_router, AppState, VERSION};
use recipe_scout::models::search::{SearchQuery, SearchSession};
use recipe_scout::services::catalog::{self, CUISINES, DIETS, MEAL_TYPES};
use recipe_scout::services::logging::init_tracing;
use recipe_scout::services::recipe_api::{ApiConfig, RecipeSource, SpoonacularClient};
use recipe_scout::services::search_controller::{SearchController, SearchOptions};
use recipe_scout::services::sessions::SessionRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Recipe search against the Spoonacular API
#[derive(Parser)]
#[command(name = "recipe-scout")]
#[command(version = VERSION)]
#[command(about = "Paginated recipe search with suggestions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP search session service
    Serve {
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,
    },

    /// Search recipes and page through the results
    Search {
        term: String,

        #[arg(long)]
        cuisine: Option<String>,

        #[arg(long)]
        diet: Option<String>,

        /// Meal type, e.g. "main course"
        #[arg(long)]
        dish_type: Option<String>,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Print autocomplete suggestions for partial input
    Suggest { term: String },

    /// Show a single recipe
    Recipe { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let cli = Cli::parse();
    let source: Arc<dyn RecipeSource> = Arc::new(SpoonacularClient::new(ApiConfig::from_env()?)?);
    let options = SearchOptions::from_env()?;

    match cli.command {
        Commands::Serve { port } => serve(source, options, port).await,
        Commands::Search {
            term,
            cuisine,
            diet,
            dish_type,
            pages,
        } => {
            let mut query = SearchQuery::new(term);
            if let Some(cuisine) = cuisine {
                query = query.with_cuisine(vocabulary_value(CUISINES, "cuisine", &cuisine)?);
            }
            if let Some(diet) = diet {
                query = query.with_diet(vocabulary_value(DIETS, "diet", &diet)?);
            }
            if let Some(dish_type) = dish_type {
                let dish_type = vocabulary_value(MEAL_TYPES, "dish type", &dish_type)?;
                query = query.with_dish_type(dish_type);
            }
            search(source, options, query, pages.max(1)).await
        }
        Commands::Suggest { term } => {
            let controller = SearchController::new(source, options);
            controller.get_suggestions(&term).await;
            for suggestion in controller.snapshot().suggestions {
                println!("{}", suggestion);
            }
            Ok(())
        }
        Commands::Recipe { id } => {
            let recipe = source
                .recipe_by_id(id)
                .await
                .with_context(|| format!("Failed to fetch recipe {}", id))?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
    }
}

fn vocabulary_value(vocabulary: &[&str], kind: &str, value: &str) -> Result<String> {
    match catalog::canonical(vocabulary, value) {
        Some(canonical) => Ok(canonical.to_string()),
        None => bail!(
            "Unknown {} '{}', expected one of: {}",
            kind,
            value,
            vocabulary.join(", ")
        ),
    }
}

async fn search(
    source: Arc<dyn RecipeSource>,
    options: SearchOptions,
    query: SearchQuery,
    pages: u32,
) -> Result<()> {
    let controller = SearchController::new(source, options);

    controller.search(query, false).await;
    print_progress(&controller.snapshot());

    for _ in 1..pages {
        if !controller.snapshot().has_more {
            break;
        }
        controller.load_more().await;
        print_progress(&controller.snapshot());
    }

    let session = controller.snapshot();
    if let Some(error) = &session.error {
        bail!("Search failed: {}", error);
    }

    for recipe in &session.recipes {
        println!(
            "{:>8}  {}  ({} min, {}, {})",
            recipe.id, recipe.title, recipe.cooking_time, recipe.difficulty, recipe.cuisine
        );
    }
    println!(
        "{} of {} results{}",
        session.recipes.len(),
        session.total_results,
        if session.has_more { ", more available" } else { "" }
    );
    Ok(())
}

fn print_progress(session: &SearchSession) {
    match &session.error {
        Some(error) => warn!(error = %error, "Page failed"),
        None => info!(
            accumulated = session.recipes.len(),
            total = session.total_results,
            has_more = session.has_more,
            "Page loaded"
        ),
    }
}

async fn serve(source: Arc<dyn RecipeSource>, options: SearchOptions, port: u16) -> Result<()> {
    let max_sessions = SessionRegistry::max_sessions_from_env()?;
    let state = AppState {
        sessions: Arc::new(SessionRegistry::new(source.clone(), options, max_sessions)),
        source,
    };

    let app = create_router(state);

    // Bind to 0.0.0.0 to accept connections from any network interface (required for Docker)
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("recipe-scout v{} listening on {}", VERSION, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
