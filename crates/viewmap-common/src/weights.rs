//! Scoring weights for the resolver.
//!
//! Type scores start from `base_type_score` and lose points with inheritance
//! distance; variant scores add or subtract per requested variant. The relative
//! order of the variant weights is what makes resolution meaningful, so
//! configurations loaded from outside should go through
//! [`ScoreWeights::validate`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunable weights consumed by the score evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreWeights {
    /// Score of an exact type match before penalties.
    pub base_type_score: i32,
    /// Subtracted once per inheritance step between candidate and requested type.
    pub inheritance_depth_penalty: i32,
    /// Subtracted when the candidate source is an interface.
    pub interface_penalty: i32,
    pub explicit_variant_score: i32,
    pub implicit_variant_score: i32,
    pub explicit_fallback_variant_score: i32,
    pub implicit_fallback_variant_score: i32,
    /// Awarded when the candidate says nothing about a requested group.
    pub fallback_variant_score: i32,
    /// Subtracted when an implicit tag contradicts the request.
    pub incorrect_implicit_variant_penalty: i32,
    /// Subtracted per explicit candidate tag the request never asked for.
    pub excess_variant_penalty: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base_type_score: 1000,
            inheritance_depth_penalty: 10,
            interface_penalty: 5,
            explicit_variant_score: 100,
            implicit_variant_score: 80,
            explicit_fallback_variant_score: 60,
            implicit_fallback_variant_score: 40,
            fallback_variant_score: 20,
            incorrect_implicit_variant_penalty: 20,
            excess_variant_penalty: 30,
        }
    }
}

impl ScoreWeights {
    /// Check that the weights keep the variant preference order intact.
    ///
    /// Explicit match > implicit match > explicit fallback > implicit
    /// fallback > no opinion > incorrect implicit tag. Penalties may not be
    /// negative, and the excess penalty must be strictly positive so that a
    /// candidate without opinion beats one carrying an unrelated tag.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let penalties = [
            ("inheritanceDepthPenalty", self.inheritance_depth_penalty, 0),
            ("interfacePenalty", self.interface_penalty, 0),
            (
                "incorrectImplicitVariantPenalty",
                self.incorrect_implicit_variant_penalty,
                0,
            ),
            ("excessVariantPenalty", self.excess_variant_penalty, 1),
        ];
        for (field, value, min) in penalties {
            if value < min {
                return Err(WeightsError::PenaltyTooSmall { field, value, min });
            }
        }

        let ladder = [
            ("explicitVariantScore", self.explicit_variant_score),
            ("implicitVariantScore", self.implicit_variant_score),
            (
                "explicitFallbackVariantScore",
                self.explicit_fallback_variant_score,
            ),
            (
                "implicitFallbackVariantScore",
                self.implicit_fallback_variant_score,
            ),
            ("fallbackVariantScore", self.fallback_variant_score),
            (
                "-incorrectImplicitVariantPenalty",
                -self.incorrect_implicit_variant_penalty,
            ),
        ];
        for pair in ladder.windows(2) {
            let (higher, high) = pair[0];
            let (lower, low) = pair[1];
            if high <= low {
                return Err(WeightsError::Ordering { higher, lower });
            }
        }
        Ok(())
    }
}

/// A weight configuration that breaks the scoring contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WeightsError {
    /// `higher` must be strictly greater than `lower`.
    Ordering {
        higher: &'static str,
        lower: &'static str,
    },
    PenaltyTooSmall {
        field: &'static str,
        value: i32,
        min: i32,
    },
}

impl fmt::Display for WeightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordering { higher, lower } => {
                write!(f, "score weight `{higher}` must be greater than `{lower}`")
            }
            Self::PenaltyTooSmall { field, value, min } => {
                write!(f, "penalty `{field}` is {value}, expected at least {min}")
            }
        }
    }
}

impl std::error::Error for WeightsError {}

#[cfg(test)]
#[path = "../tests/weights_tests.rs"]
mod tests;
