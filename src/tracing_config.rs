//! Tracing setup for following a sketch through the pipeline.
//!
//! Output format is chosen with `SKETCHC_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! SKETCHC_LOG=debug SKETCHC_LOG_FORMAT=tree sketchc sketch.pde --stdout
//! SKETCHC_LOG="sketchc_emitter=trace" sketchc sketch.pde
//! ```
//!
//! Nothing is installed unless `SKETCHC_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_ENV: &str = "SKETCHC_LOG";
const LOG_FORMAT_ENV: &str = "SKETCHC_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// `SKETCHC_LOG` wins over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, writing to stderr so generated code on
/// stdout stays clean.
pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
