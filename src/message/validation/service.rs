//! Validation service implementation.
//!
//! Provides the default implementation of the `EnvelopeValidator` port,
//! combining individual validation rules into a single check.

use crate::message::{
    domain::Message,
    error::ValidationError,
    ports::validator::{EnvelopeValidator, ValidationResult},
    validation::rules,
};

/// Default implementation of the envelope validator.
///
/// Applies all validation rules in order, collecting errors to provide
/// comprehensive feedback rather than failing on the first error.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use umf::message::domain::{FieldForm, Message};
/// use umf::message::ports::validator::EnvelopeValidator;
/// use umf::message::validation::service::DefaultEnvelopeValidator;
///
/// let mut message = Message::empty(FieldForm::Long);
/// message.set_to("service:/");
/// message.set_origin("client:/");
/// message.set_body(json!({}));
///
/// let validator = DefaultEnvelopeValidator::new();
/// assert!(validator.validate(&message).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvelopeValidator;

impl DefaultEnvelopeValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EnvelopeValidator for DefaultEnvelopeValidator {
    fn validate(&self, message: &Message) -> ValidationResult<()> {
        let errors: Vec<ValidationError> = [
            rules::validate_destination(message),
            rules::validate_origin(message),
            rules::validate_body(message),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        ValidationError::multiple(errors).map_or(Ok(()), Err)
    }
}

/// Returns `true` when the envelope has a destination, an origin and a
/// payload.
///
/// Never fails; use [`DefaultEnvelopeValidator`] to learn which fields are
/// missing.
#[must_use]
pub fn validate_message(message: &Message) -> bool {
    DefaultEnvelopeValidator.is_valid(message)
}

// Note: Unit tests for DefaultEnvelopeValidator are located in
// src/message/tests/validation_tests.rs.
