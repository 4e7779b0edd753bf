//! Conversion between long-form and short-form envelopes.
//!
//! Conversions copy only fields whose values are truthy (see
//! [`is_truthy`](super::is_truthy)); falsy fields are dropped rather than
//! written as empty values. Keys outside the semantic field set are not
//! carried across a conversion.

use super::envelope::Message;
use super::fields::{Field, FieldForm, is_present, is_truthy};
use serde_json::{Map, Value};
use tracing::warn;

/// JSON emitted by [`Message::to_json`] when serialization fails.
pub const JSON_FALLBACK: &str = "{}";

impl Message {
    /// Returns a short-form copy of this envelope.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use umf::message::domain::{FieldForm, Message};
    ///
    /// let mut message = Message::empty(FieldForm::Long);
    /// message.set_origin("client:/");
    /// message.set_body(json!({"ok": true}));
    ///
    /// let short = message.to_short();
    /// assert_eq!(short.form(), FieldForm::Short);
    /// assert_eq!(short.to_object().get("frm"), Some(&json!("client:/")));
    /// ```
    #[must_use]
    pub fn to_short(&self) -> Self {
        self.convert(FieldForm::Short)
    }

    /// Returns a long-form copy of this envelope.
    #[must_use]
    pub fn to_long(&self) -> Self {
        self.convert(FieldForm::Long)
    }

    /// Returns a copy in the requested form.
    #[must_use]
    pub fn convert(&self, form: FieldForm) -> Self {
        let mut converted = Self::empty(form);
        for field in Field::ALL {
            if field == Field::Body {
                if let Some(body) = self.body().filter(|body| is_truthy(body)) {
                    converted.set_body(body.clone());
                }
                continue;
            }
            let text = self.text(field);
            if is_present(text) {
                converted.set_text(field, text.map(str::to_owned));
            }
        }
        converted
    }

    /// Returns every stored field under its current name.
    ///
    /// No renaming happens; falsy values that are present are kept.
    #[must_use]
    pub fn to_object(&self) -> Map<String, Value> {
        let form = self.form();
        let mut object = Map::new();
        for field in Field::ALL {
            let value = if field == Field::Body {
                self.body().cloned()
            } else {
                self.text(field).map(|text| Value::String(text.to_owned()))
            };
            if let Some(value) = value {
                object.insert(field.name(form).to_owned(), value);
            }
        }
        for (name, value) in self.extra() {
            if Field::resolve(name).is_none() {
                object.insert(name.clone(), value.clone());
            }
        }
        object
    }

    /// Serializes [`Message::to_object`] to a JSON string.
    ///
    /// Falls back to [`JSON_FALLBACK`] rather than failing.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_object()).unwrap_or_else(|error| {
            warn!(%error, mid = ?self.mid(), "envelope JSON serialization failed");
            JSON_FALLBACK.to_owned()
        })
    }
}
