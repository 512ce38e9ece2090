//! Structured query tracing for resolver entry points.
//!
//! Events use target `viewmap::query_json` and are intended to be consumed with:
//! `VIEWMAP_LOG=viewmap::query_json=trace VIEWMAP_LOG_FORMAT=json`.
//!
//! Environment:
//! - `VIEWMAP_QUERY_RUN_ID`: optional run identifier attached to every event.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};
use viewmap_common::VariantSet;
use viewmap_types::TypeId;

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "viewmap::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| {
            std::env::var("VIEWMAP_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string())
        })
        .as_str()
}

#[inline]
pub(crate) fn resolve_start(
    query_id: u64,
    op: &'static str,
    input: Option<TypeId>,
    variants: &VariantSet,
) {
    trace!(
        target: "viewmap::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        input_type_id = input.map(|ty| ty.0),
        variants = %variants
    );
}

#[inline]
pub(crate) fn resolve_end(query_id: u64, op: &'static str, outcome: &'static str, cache_hit: bool) {
    trace!(
        target: "viewmap::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        outcome,
        cache_hit
    );
}
