//! Semantic envelope fields and the fixed long/short name tables.
//!
//! Every semantic field has a long name and a short name. Several fields use
//! the same name in both forms (`mid`, `to`, ...), which is why the tables map
//! names rather than only the renamed ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Long-to-short name pairs for every semantic field.
pub const LONG_TO_SHORT: [(&str, &str); 9] = [
    ("mid", "mid"),
    ("rmid", "rmid"),
    ("timestamp", "ts"),
    ("version", "ver"),
    ("to", "to"),
    ("from", "frm"),
    ("via", "via"),
    ("for", "for"),
    ("body", "bdy"),
];

/// Short-to-long name pairs for every semantic field.
pub const SHORT_TO_LONG: [(&str, &str); 9] = [
    ("mid", "mid"),
    ("rmid", "rmid"),
    ("ts", "timestamp"),
    ("ver", "version"),
    ("to", "to"),
    ("frm", "from"),
    ("via", "via"),
    ("for", "for"),
    ("bdy", "body"),
];

/// Returns the short name for a long field name.
///
/// ```
/// use umf::message::domain::long_to_short;
///
/// assert_eq!(long_to_short("from"), Some("frm"));
/// assert_eq!(long_to_short("frm"), None);
/// ```
#[must_use]
pub fn long_to_short(name: &str) -> Option<&'static str> {
    LONG_TO_SHORT
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, short)| *short)
}

/// Returns the long name for a short field name.
#[must_use]
pub fn short_to_long(name: &str) -> Option<&'static str> {
    SHORT_TO_LONG
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, long)| *long)
}

/// The field-naming convention an envelope is stored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldForm {
    /// Verbose names (`timestamp`, `version`, `from`, `body`).
    #[default]
    Long,
    /// Compact names (`ts`, `ver`, `frm`, `bdy`).
    Short,
}

impl fmt::Display for FieldForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => f.write_str("long"),
            Self::Short => f.write_str("short"),
        }
    }
}

/// A semantic envelope field, independent of its naming form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Message identifier.
    Mid,
    /// Identifier of the message this one responds to.
    Rmid,
    /// Creation time.
    Timestamp,
    /// Protocol version.
    Version,
    /// Destination routing string.
    To,
    /// Origin routing string.
    From,
    /// Via-path.
    Via,
    /// Forwarding marker.
    For,
    /// Payload.
    Body,
}

impl Field {
    /// All semantic fields in wire order.
    pub const ALL: [Self; 9] = [
        Self::Mid,
        Self::Rmid,
        Self::Timestamp,
        Self::Version,
        Self::To,
        Self::From,
        Self::Via,
        Self::For,
        Self::Body,
    ];

    /// Returns the long-form name.
    #[must_use]
    pub const fn long_name(self) -> &'static str {
        match self {
            Self::Mid => "mid",
            Self::Rmid => "rmid",
            Self::Timestamp => "timestamp",
            Self::Version => "version",
            Self::To => "to",
            Self::From => "from",
            Self::Via => "via",
            Self::For => "for",
            Self::Body => "body",
        }
    }

    /// Returns the short-form name.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Timestamp => "ts",
            Self::Version => "ver",
            Self::From => "frm",
            Self::Body => "bdy",
            other => other.long_name(),
        }
    }

    /// Returns the name used by `form`.
    #[must_use]
    pub const fn name(self, form: FieldForm) -> &'static str {
        match form {
            FieldForm::Long => self.long_name(),
            FieldForm::Short => self.short_name(),
        }
    }

    /// Resolves either a long or a short name to its semantic field.
    ///
    /// ```
    /// use umf::message::domain::Field;
    ///
    /// assert_eq!(Field::resolve("frm"), Some(Field::From));
    /// assert_eq!(Field::resolve("from"), Some(Field::From));
    /// assert_eq!(Field::resolve("unknown"), None);
    /// ```
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.long_name() == name || field.short_name() == name)
    }

    /// Returns `true` when the long and short names differ.
    #[must_use]
    pub fn is_renamed(self) -> bool {
        self.long_name() != self.short_name()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// Reports whether a JSON value counts as present.
///
/// `null`, `false`, any zero number and the empty string are falsy. Arrays
/// and objects are truthy even when empty.
///
/// ```
/// use serde_json::json;
/// use umf::message::domain::is_truthy;
///
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!("")));
/// assert!(is_truthy(&json!({})));
/// ```
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| float.is_normal() || float.is_subnormal()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reports whether an optional string field counts as present.
#[must_use]
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.is_empty())
}
