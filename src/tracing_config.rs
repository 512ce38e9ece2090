//! Diagnostic output for resolution.
//!
//! The resolver crates log every scored candidate at `trace` and every
//! outcome at `debug`; query start/end records go to the
//! `viewmap::query_json` target. None of it is written anywhere until the
//! host calls [`init_tracing`] with a filter in `VIEWMAP_LOG`, or in
//! `RUST_LOG` when `VIEWMAP_LOG` is unset.
//!
//! `VIEWMAP_LOG_FORMAT` selects the stderr layout: `text` (the default),
//! `tree` (nested spans through `tracing-tree`) or `json` (one object per
//! line).
//!
//! ```bash
//! # Which candidate won each stage for this problem?
//! VIEWMAP_LOG=viewmap_resolver=trace VIEWMAP_LOG_FORMAT=tree my-app
//!
//! # Machine-readable query records
//! VIEWMAP_LOG=viewmap::query_json=trace VIEWMAP_LOG_FORMAT=json my-app
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};
use tracing_tree::HierarchicalLayer;

const FILTER_VAR: &str = "VIEWMAP_LOG";
const FORMAT_VAR: &str = "VIEWMAP_LOG_FORMAT";

/// Layout of the lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `viewmap_log` wins over `rust_log`; `None` means logging stays off.
fn select_filter(viewmap_log: Option<&str>, rust_log: Option<&str>) -> Option<EnvFilter> {
    viewmap_log
        .or(rust_log)
        .map(|directives| EnvFilter::builder().parse_lossy(directives))
}

/// Install a stderr subscriber configured from the environment.
///
/// A no-op without `VIEWMAP_LOG` or `RUST_LOG`. An already installed global
/// subscriber is kept.
pub fn init_tracing() {
    let viewmap_log = std::env::var(FILTER_VAR).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let Some(filter) = select_filter(viewmap_log.as_deref(), rust_log.as_deref()) else {
        return;
    };
    let format = LogFormat::parse(&std::env::var(FORMAT_VAR).unwrap_or_default());

    let registry = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Tree => registry
            .with(
                HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_targets(true)
                    .with_deferred_spans(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!(?format, "global subscriber already set, keeping it");
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
