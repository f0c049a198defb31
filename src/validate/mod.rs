//! Quality validation of rendered output.
//!
//! The validator re-reads font sizes from what a renderer actually produced
//! and scores them against target ranges for body, heading and title text.

mod artifact;
mod validator;

pub use artifact::{FontSamples, JsonArtifact, RenderedArtifact};
pub use validator::{
    FontDistribution, FontHistogram, QualityValidator, ScoreBreakdown, ValidationResult,
    ValidatorOptions,
};
