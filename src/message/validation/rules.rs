//! Individual envelope validation rules.
//!
//! Each rule treats a falsy value (`""`, `0`, `false`, `null`) the same as a
//! missing field.

use crate::message::{
    domain::{Message, is_present, is_truthy},
    error::ValidationError,
    ports::validator::ValidationResult,
};

/// Validates that the destination is present.
///
/// # Errors
///
/// Returns [`ValidationError::MissingDestination`] when `to` is absent or empty.
pub fn validate_destination(message: &Message) -> ValidationResult<()> {
    if is_present(message.to()) {
        Ok(())
    } else {
        Err(ValidationError::MissingDestination)
    }
}

/// Validates that the origin is present under either `from` or `frm`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingOrigin`] when the origin is absent or empty.
pub fn validate_origin(message: &Message) -> ValidationResult<()> {
    if is_present(message.origin()) {
        Ok(())
    } else {
        Err(ValidationError::MissingOrigin)
    }
}

/// Validates that the payload is present under either `body` or `bdy`.
///
/// # Errors
///
/// Returns [`ValidationError::MissingBody`] when the payload is absent or falsy.
pub fn validate_body(message: &Message) -> ValidationResult<()> {
    if message.body().is_some_and(is_truthy) {
        Ok(())
    } else {
        Err(ValidationError::MissingBody)
    }
}
