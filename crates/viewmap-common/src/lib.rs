//! Common types shared by the viewmap crates.
//!
//! This crate provides the vocabulary the resolver scores against:
//! - Variant algebra (`VariantGroup`, `Variant`, `VariantSet`)
//! - Scoring weights (`ScoreWeights`) with ordering validation

// Mutually exclusive presentation tags
pub mod variant;
pub use variant::{AmbiguousVariantsError, Variant, VariantGroup, VariantSet};

// Tunable scoring weights
pub mod weights;
pub use weights::{ScoreWeights, WeightsError};
