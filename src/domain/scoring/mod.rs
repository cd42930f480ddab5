//! Scoring domain
//!
//! Converts a [`FeatureRecord`] into a deterministic, itemized [`ScoreBreakdown`].

mod breakdown;
mod engine;
mod features;
mod validation;

pub use breakdown::{ScoreBreakdown, ScoreCategory, ScoreEntry};
pub use engine::{score, RankedRecord, ScoreEngine};
pub use features::{
    ApplianceCondition, ApplianceKind, Appliances, BasementKind, FeatureRecord, PrivacyLevel,
};
pub use validation::{
    validate_bathrooms, validate_non_negative, FeatureValidationError, MAX_DECIMAL_FEATURE,
};
