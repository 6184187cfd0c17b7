//! Engine error types.
//!
//! Generation and grading never fail: they interpret whatever they are given
//! and report low scores with feedback. These errors only surface at the
//! boundary helpers (plan lookup, configuration), where a collaborator has
//! asked for something that does not exist.

use thiserror::Error;

/// Errors returned by plan lookup and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessError {
    /// The section code is valid but absent from the regenerated plan.
    #[error("section not found in plan: {code}")]
    SectionNotFound { code: String },

    /// The string does not name any known section.
    #[error("unknown section code: {0}")]
    UnknownSectionCode(String),

    /// Grading was requested with the wrong plan variant.
    #[error("plan variant mismatch: expected {expected}, found {found}")]
    VariantMismatch { expected: String, found: String },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AssessError {
    /// Returns `true` if the caller sent a bad request (maps to a client-facing
    /// "not found" / "bad request" at the HTTP boundary).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AssessError::SectionNotFound { .. }
                | AssessError::UnknownSectionCode(_)
                | AssessError::VariantMismatch { .. }
        )
    }
}
