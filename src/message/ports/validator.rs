//! Validator port for envelope validation.
//!
//! Defines the abstract interface for checking that an envelope carries the
//! fields required for dispatch.

use crate::message::{domain::Message, error::ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Port for envelope validation.
///
/// Validation only checks presence of the routing and payload fields. It
/// does not inspect the routing grammar of `to` or the shape of the payload.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Collect all validation errors before returning (not fail-fast)
/// - Use `ValidationError::multiple` to combine errors
/// - Be stateless and thread-safe
pub trait EnvelopeValidator: Send + Sync {
    /// Validates an envelope against all rules.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any validation rule fails.
    /// Multiple failures are combined using `ValidationError::Multiple`.
    fn validate(&self, message: &Message) -> ValidationResult<()>;

    /// Returns `true` when [`EnvelopeValidator::validate`] succeeds.
    fn is_valid(&self, message: &Message) -> bool {
        self.validate(message).is_ok()
    }
}
