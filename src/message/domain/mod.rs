//! Domain types for the envelope subsystem.
//!
//! This module contains pure domain types with no infrastructure dependencies:
//! the semantic field set, the two wire records, and the [`Message`] accessor
//! layer with its form conversions.

mod codec;
mod envelope;
mod fields;

pub use codec::JSON_FALLBACK;
pub use envelope::{LongMessage, Message, PROTOCOL_VERSION, ShortMessage};
pub use fields::{
    Field, FieldForm, LONG_TO_SHORT, SHORT_TO_LONG, is_present, is_truthy, long_to_short,
    short_to_long,
};
