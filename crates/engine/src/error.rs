//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidInput`] returned when an amount, a people count or a pattern
//!   parameter is missing, malformed or out of range.
//! - [`UnknownCalculationType`] returned when a pattern tag is not one of the
//!   supported split patterns.
//!
//! A pattern falling back to an equal split is **not** an error.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`UnknownCalculationType`]: EngineError::UnknownCalculationType
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown calculation type: \"{0}\"")]
    UnknownCalculationType(String),
}

impl EngineError {
    /// Returns `true` for validation failures the user can fix by re-entering
    /// values.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
