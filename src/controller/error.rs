//! Build errors for the gear controller.

use thiserror::Error;

/// Errors that can occur when assembling a controller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No legs defined. Add at least one leg with .leg(name)")]
    NoLegs,

    #[error("Leg names must not be empty")]
    EmptyLegName,

    #[error("Leg '{name}' is defined more than once")]
    DuplicateLeg { name: String },

    #[error("{field} must be positive and finite, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },
}
