// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Tracing setup and secret redaction for log output.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_directive`.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Redact an API key for logging.
/// Shows the first four characters and hides the rest: "abcd***"
pub fn redact_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "***".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}***", visible)
}
