//! The UMF envelope in its two wire shapes and the accessor layer over them.
//!
//! [`LongMessage`] and [`ShortMessage`] are plain records using the exact wire
//! names of each form. [`Message`] holds exactly one of them and resolves
//! field names from either form, so callers can read `from` on a short-form
//! envelope (or `frm` on a long-form one) without knowing which is stored.

use super::fields::{Field, FieldForm, is_truthy};
use crate::message::error::EnvelopeError;
use crate::route::{RouteResult, parse_route};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// Protocol version stamped on new envelopes.
pub const PROTOCOL_VERSION: &str = "UMF/1.4.3";

/// Keys that only exist in the short form.
const SHORT_ONLY_KEYS: [&str; 4] = ["ts", "ver", "frm", "bdy"];

/// A long-form envelope record.
///
/// Decoding assigns every key by long or short name, so a short key such as
/// `frm` lands in [`LongMessage::from`] rather than in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct LongMessage {
    /// Message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// Identifier of the message being responded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmid: Option<String>,
    /// Creation time as an ISO-8601 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Protocol version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Destination routing string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Origin routing string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Via-path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    /// Forwarding marker, `for` on the wire.
    #[serde(default, rename = "for", skip_serializing_if = "Option::is_none")]
    pub forward: Option<String>,
    /// Payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Keys outside the semantic field set.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A short-form envelope record.
///
/// Decoding assigns every key by long or short name, so a long key such as
/// `from` lands in [`ShortMessage::frm`] rather than in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ShortMessage {
    /// Message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// Identifier of the message being responded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmid: Option<String>,
    /// Creation time as an ISO-8601 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    /// Protocol version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    /// Destination routing string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Origin routing string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frm: Option<String>,
    /// Via-path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    /// Forwarding marker, `for` on the wire.
    #[serde(default, rename = "for", skip_serializing_if = "Option::is_none")]
    pub forward: Option<String>,
    /// Payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bdy: Option<Value>,
    /// Keys outside the semantic field set.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Slot access shared by the two wire records.
trait Slots: Default {
    fn text_slot(&self, field: Field) -> Option<&Option<String>>;

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>>;

    fn body_slot(&self) -> Option<&Value>;

    fn body_slot_mut(&mut self) -> &mut Option<Value>;

    fn extra_mut(&mut self) -> &mut Map<String, Value>;

    fn holds(&self, field: Field) -> bool {
        if field == Field::Body {
            self.body_slot().is_some()
        } else {
            self.text_slot(field).is_some_and(Option::is_some)
        }
    }
}

impl Slots for LongMessage {
    fn text_slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::Mid => Some(&self.mid),
            Field::Rmid => Some(&self.rmid),
            Field::Timestamp => Some(&self.timestamp),
            Field::Version => Some(&self.version),
            Field::To => Some(&self.to),
            Field::From => Some(&self.from),
            Field::Via => Some(&self.via),
            Field::For => Some(&self.forward),
            Field::Body => None,
        }
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::Mid => Some(&mut self.mid),
            Field::Rmid => Some(&mut self.rmid),
            Field::Timestamp => Some(&mut self.timestamp),
            Field::Version => Some(&mut self.version),
            Field::To => Some(&mut self.to),
            Field::From => Some(&mut self.from),
            Field::Via => Some(&mut self.via),
            Field::For => Some(&mut self.forward),
            Field::Body => None,
        }
    }

    fn body_slot(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn body_slot_mut(&mut self) -> &mut Option<Value> {
        &mut self.body
    }

    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

impl Slots for ShortMessage {
    fn text_slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::Mid => Some(&self.mid),
            Field::Rmid => Some(&self.rmid),
            Field::Timestamp => Some(&self.ts),
            Field::Version => Some(&self.ver),
            Field::To => Some(&self.to),
            Field::From => Some(&self.frm),
            Field::Via => Some(&self.via),
            Field::For => Some(&self.forward),
            Field::Body => None,
        }
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::Mid => Some(&mut self.mid),
            Field::Rmid => Some(&mut self.rmid),
            Field::Timestamp => Some(&mut self.ts),
            Field::Version => Some(&mut self.ver),
            Field::To => Some(&mut self.to),
            Field::From => Some(&mut self.frm),
            Field::Via => Some(&mut self.via),
            Field::For => Some(&mut self.forward),
            Field::Body => None,
        }
    }

    fn body_slot(&self) -> Option<&Value> {
        self.bdy.as_ref()
    }

    fn body_slot_mut(&mut self) -> &mut Option<Value> {
        &mut self.bdy
    }

    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }
}

/// Assigns `value` to the slot named by `name` in either form.
fn assign<R: Slots>(record: &mut R, name: &str, value: Value) -> Result<(), EnvelopeError> {
    match Field::resolve(name) {
        Some(Field::Body) => {
            *record.body_slot_mut() = match value {
                Value::Null => None,
                other => Some(other),
            };
        }
        Some(field) => {
            let text = match value {
                Value::Null => None,
                Value::String(text) => Some(text),
                _ => return Err(EnvelopeError::ExpectedString { field }),
            };
            if let Some(target) = record.text_slot_mut(field) {
                *target = text;
            }
        }
        None => {
            record.extra_mut().insert(name.to_owned(), value);
        }
    }
    Ok(())
}

/// Fails when `object` names a renamed field under both its long and short
/// name.
fn reject_duplicate_names(object: &Map<String, Value>) -> Result<(), EnvelopeError> {
    Field::ALL
        .into_iter()
        .filter(|field| field.is_renamed())
        .find(|field| {
            object.contains_key(field.long_name()) && object.contains_key(field.short_name())
        })
        .map_or(Ok(()), |field| Err(EnvelopeError::DuplicateField { field }))
}

fn decode<R: Slots>(object: Map<String, Value>) -> Result<R, EnvelopeError> {
    reject_duplicate_names(&object)?;
    let mut record = R::default();
    for (name, value) in object {
        assign(&mut record, &name, value)?;
    }
    Ok(record)
}

/// Moves semantic names out of `extra` into their slots.
///
/// A key whose slot already holds a value, or whose value has the wrong
/// type, is dropped.
fn normalize<R: Slots>(record: &mut R) {
    let extra = std::mem::take(record.extra_mut());
    for (name, value) in extra {
        let Some(field) = Field::resolve(&name) else {
            record.extra_mut().insert(name, value);
            continue;
        };
        if record.holds(field) {
            debug!(%field, key = %name, "dropping duplicate envelope key");
            continue;
        }
        if let Err(error) = assign(record, &name, value) {
            debug!(%error, key = %name, "dropping ill-typed envelope key");
        }
    }
}

impl TryFrom<Map<String, Value>> for LongMessage {
    type Error = EnvelopeError;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        decode(object)
    }
}

impl TryFrom<Map<String, Value>> for ShortMessage {
    type Error = EnvelopeError;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        decode(object)
    }
}

/// A UMF envelope stored in exactly one naming form.
///
/// Field access goes through the semantic accessors (`origin()`, `set_body()`,
/// ...) or the name-based [`Message::get`] and [`Message::set`], both of
/// which accept long and short names interchangeably.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use umf::message::domain::{FieldForm, Message};
///
/// let mut message = Message::empty(FieldForm::Short);
/// message.set("from", json!("client:/")).expect("string value");
///
/// assert_eq!(message.origin(), Some("client:/"));
/// assert_eq!(message.get("frm"), Some(json!("client:/")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Long-form storage.
    Long(LongMessage),
    /// Short-form storage.
    Short(ShortMessage),
}

impl Default for Message {
    fn default() -> Self {
        Self::empty(FieldForm::Long)
    }
}

impl From<LongMessage> for Message {
    fn from(mut message: LongMessage) -> Self {
        normalize(&mut message);
        Self::Long(message)
    }
}

impl From<ShortMessage> for Message {
    fn from(mut message: ShortMessage) -> Self {
        normalize(&mut message);
        Self::Short(message)
    }
}

impl Message {
    /// Creates an envelope with no fields set.
    #[must_use]
    pub fn empty(form: FieldForm) -> Self {
        match form {
            FieldForm::Long => Self::Long(LongMessage::default()),
            FieldForm::Short => Self::Short(ShortMessage::default()),
        }
    }

    /// Returns the naming form this envelope is stored in.
    #[must_use]
    pub const fn form(&self) -> FieldForm {
        match self {
            Self::Long(_) => FieldForm::Long,
            Self::Short(_) => FieldForm::Short,
        }
    }

    /// Decodes an envelope from a plain JSON object.
    ///
    /// The envelope is stored in short form when any short-only key (`ts`,
    /// `ver`, `frm`, `bdy`) is present and in long form otherwise. Every key
    /// is then assigned by long or short name as [`Message::set`] does.
    ///
    /// Routing and identity fields are typed: a wire envelope carrying
    /// `"rmid": 7` is rejected rather than stored as a number.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::DuplicateField`] when the object names one
    /// field under both its long and short name (`from` and `frm`), and
    /// [`EnvelopeError::ExpectedString`] when a string-typed field holds
    /// another kind of value.
    pub fn from_object(object: Map<String, Value>) -> Result<Self, EnvelopeError> {
        if SHORT_ONLY_KEYS.iter().any(|key| object.contains_key(*key)) {
            decode(object).map(Self::Short)
        } else {
            decode(object).map(Self::Long)
        }
    }

    /// Decodes an envelope from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Json`] on malformed input,
    /// [`EnvelopeError::NotAnObject`] when the document is not an object, and
    /// the errors of [`Message::from_object`] otherwise.
    pub fn from_json(json: &str) -> Result<Self, EnvelopeError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(object) => Self::from_object(object),
            _ => Err(EnvelopeError::NotAnObject),
        }
    }

    /// Reads a string-typed semantic field.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        let slot = match self {
            Self::Long(message) => message.text_slot(field),
            Self::Short(message) => message.text_slot(field),
        };
        slot.and_then(Option::as_deref)
    }

    /// Writes a string-typed semantic field. Writing to [`Field::Body`] is
    /// ignored; use [`Message::set_body`] for the payload.
    pub fn set_text(&mut self, field: Field, value: Option<String>) {
        let slot = match self {
            Self::Long(message) => message.text_slot_mut(field),
            Self::Short(message) => message.text_slot_mut(field),
        };
        if let Some(target) = slot {
            *target = value;
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub fn mid(&self) -> Option<&str> {
        self.text(Field::Mid)
    }

    /// Returns the response-to identifier.
    #[must_use]
    pub fn rmid(&self) -> Option<&str> {
        self.text(Field::Rmid)
    }

    /// Returns the creation timestamp (`timestamp` or `ts`).
    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.text(Field::Timestamp)
    }

    /// Returns the protocol version (`version` or `ver`).
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.text(Field::Version)
    }

    /// Returns the destination routing string.
    #[must_use]
    pub fn to(&self) -> Option<&str> {
        self.text(Field::To)
    }

    /// Returns the origin routing string (`from` or `frm`).
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.text(Field::From)
    }

    /// Returns the via-path.
    #[must_use]
    pub fn via(&self) -> Option<&str> {
        self.text(Field::Via)
    }

    /// Returns the forwarding marker.
    #[must_use]
    pub fn forward(&self) -> Option<&str> {
        self.text(Field::For)
    }

    /// Returns the payload (`body` or `bdy`).
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Long(message) => message.body.as_ref(),
            Self::Short(message) => message.bdy.as_ref(),
        }
    }

    /// Sets the response-to identifier.
    pub fn set_rmid(&mut self, rmid: impl Into<String>) {
        self.set_text(Field::Rmid, Some(rmid.into()));
    }

    /// Sets the destination routing string.
    pub fn set_to(&mut self, to: impl Into<String>) {
        self.set_text(Field::To, Some(to.into()));
    }

    /// Sets the origin routing string.
    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.set_text(Field::From, Some(origin.into()));
    }

    /// Sets the via-path.
    pub fn set_via(&mut self, via: impl Into<String>) {
        self.set_text(Field::Via, Some(via.into()));
    }

    /// Sets the forwarding marker.
    pub fn set_forward(&mut self, forward: impl Into<String>) {
        self.set_text(Field::For, Some(forward.into()));
    }

    /// Sets the payload.
    pub fn set_body(&mut self, body: Value) {
        *self.body_slot_mut() = Some(body);
    }

    const fn body_slot_mut(&mut self) -> &mut Option<Value> {
        match self {
            Self::Long(message) => &mut message.body,
            Self::Short(message) => &mut message.bdy,
        }
    }

    /// Returns keys outside the semantic field set.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        match self {
            Self::Long(message) => &message.extra,
            Self::Short(message) => &message.extra,
        }
    }

    const fn extra_mut(&mut self) -> &mut Map<String, Value> {
        match self {
            Self::Long(message) => &mut message.extra,
            Self::Short(message) => &mut message.extra,
        }
    }

    /// Reads a field by long or short name.
    ///
    /// Names outside the semantic field set are looked up verbatim.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match Field::resolve(name) {
            Some(Field::Body) => self.body().cloned(),
            Some(field) => self.text(field).map(|text| Value::String(text.to_owned())),
            None => self.extra().get(name).cloned(),
        }
    }

    /// Writes a field by long or short name.
    ///
    /// The value lands in the slot of the stored form whichever name is
    /// used. `null` clears a semantic field. Names outside the semantic field
    /// set are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::ExpectedString`] when a string-typed field is
    /// given a value that is neither a string nor `null`.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EnvelopeError> {
        match self {
            Self::Long(message) => assign(message, name, value),
            Self::Short(message) => assign(message, name, value),
        }
    }

    /// Assigns every key of `object` by long or short name.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::DuplicateField`] when `object` names one field
    /// under both its long and short name, leaving the envelope untouched,
    /// and the errors of [`Message::set`] otherwise.
    pub fn merge(&mut self, object: Map<String, Value>) -> Result<(), EnvelopeError> {
        reject_duplicate_names(&object)?;
        object
            .into_iter()
            .try_for_each(|(name, value)| self.set(&name, value))
    }

    /// Removes a field by long or short name, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        match Field::resolve(name) {
            Some(Field::Body) => self.body_slot_mut().take(),
            Some(field) => {
                let previous = self.text(field).map(|text| Value::String(text.to_owned()));
                self.set_text(field, None);
                previous
            }
            None => self.extra_mut().remove(name),
        }
    }

    /// Returns a copy of the payload, or an empty object when there is none.
    ///
    /// A falsy payload (`null`, `0`, `""`, `false`) is treated as absent.
    #[must_use]
    pub fn message_body(&self) -> Value {
        self.body()
            .filter(|body| is_truthy(body))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Parses the destination routing string.
    ///
    /// A missing `to` parses as the empty route.
    #[must_use]
    pub fn parse_to(&self) -> RouteResult {
        parse_route(self.to().unwrap_or_default())
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_object().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_object(object).map_err(serde::de::Error::custom)
    }
}
