//! Domain error types for envelope decoding and validation.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants
//! that can be inspected by callers.

use super::domain::Field;
use thiserror::Error;

/// Errors that can occur while assigning or decoding envelope fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// A string-typed field was given a non-string value.
    #[error("field '{field}' must be a string or null")]
    ExpectedString {
        /// The semantic field that rejected the value.
        field: Field,
    },

    /// A document or override set names one field under both its long and
    /// short name.
    #[error("field '{field}' appears under both its long and short name")]
    DuplicateField {
        /// The semantic field named twice.
        field: Field,
    },

    /// A decoded document or override set is not a JSON object.
    #[error("expected a JSON object")]
    NotAnObject,

    /// The input is not valid JSON.
    #[error("malformed envelope JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Errors that can occur during envelope validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `to` field is missing or falsy.
    #[error("envelope destination ('to') is required")]
    MissingDestination,

    /// Neither `from` nor `frm` holds a value.
    #[error("envelope origin ('from'/'frm') is required")]
    MissingOrigin,

    /// Neither `body` nor `bdy` holds a truthy value.
    #[error("envelope payload ('body'/'bdy') is required")]
    MissingBody,

    /// Multiple validation errors occurred.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Combines validation errors into a single error.
    ///
    /// A single error is returned as-is rather than wrapped. Returns `None`
    /// when `errors` is empty.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Option<Self> {
        if errors.len() > 1 {
            return Some(Self::Multiple(errors));
        }
        errors.into_iter().next()
    }

    /// Returns `true` if this error represents multiple validation failures.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns the individual errors if this is a `Multiple` variant.
    #[must_use]
    pub fn errors(&self) -> Option<&[Self]> {
        match self {
            Self::Multiple(errors) => Some(errors),
            _ => None,
        }
    }
}
