//! Envelope factory.
//!
//! The `MessageFactory` stamps new envelopes with a generated identifier, the
//! current time and the protocol version, then merges caller overrides on top.

use std::sync::Arc;

use chrono::SecondsFormat;
use mockable::Clock;
use serde_json::Value;
use tracing::trace;

use crate::message::{
    domain::{Field, FieldForm, Message, PROTOCOL_VERSION},
    error::EnvelopeError,
    ports::IdGenerator,
};

/// Configuration for envelope creation.
///
/// # Examples
///
/// ```
/// use umf::message::domain::FieldForm;
/// use umf::message::services::FactoryConfig;
///
/// let config = FactoryConfig::default();
/// assert_eq!(config.protocol_version, "UMF/1.4.3");
/// assert_eq!(config.default_form, FieldForm::Long);
///
/// let compact = FactoryConfig::short();
/// assert_eq!(compact.default_form, FieldForm::Short);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Version string written to `version`/`ver`.
    pub protocol_version: String,
    /// Form used by [`MessageFactory::create`].
    pub default_form: FieldForm,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_owned(),
            default_form: FieldForm::Long,
        }
    }
}

impl FactoryConfig {
    /// Creates a configuration that produces short-form envelopes by default.
    #[must_use]
    pub fn short() -> Self {
        Self {
            default_form: FieldForm::Short,
            ..Self::default()
        }
    }

    /// Sets the protocol version.
    #[must_use]
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }
}

/// Builds new envelopes with generated identity fields.
///
/// The factory performs no validation; callers supply `to`, `from` and
/// `body` before handing the envelope to a validator.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use serde_json::json;
/// use umf::message::adapters::UuidIdGenerator;
/// use umf::message::domain::FieldForm;
/// use umf::message::services::MessageFactory;
///
/// let factory = MessageFactory::new(Arc::new(UuidIdGenerator), Arc::new(DefaultClock));
/// let message = factory
///     .create_message(json!({"to": "service:/", "from": "client:/"}), FieldForm::Short)
///     .expect("string routing fields");
///
/// assert_eq!(message.origin(), Some("client:/"));
/// assert_eq!(message.version(), Some("UMF/1.4.3"));
/// ```
#[derive(Clone)]
pub struct MessageFactory<G, K>
where
    G: IdGenerator,
    K: Clock + Send + Sync,
{
    ids: Arc<G>,
    clock: Arc<K>,
    config: FactoryConfig,
}

impl<G, K> MessageFactory<G, K>
where
    G: IdGenerator,
    K: Clock + Send + Sync,
{
    /// Creates a factory with the default configuration.
    #[must_use]
    pub fn new(ids: Arc<G>, clock: Arc<K>) -> Self {
        Self::with_config(ids, clock, FactoryConfig::default())
    }

    /// Creates a factory with a custom configuration.
    #[must_use]
    pub const fn with_config(ids: Arc<G>, clock: Arc<K>, config: FactoryConfig) -> Self {
        Self { ids, clock, config }
    }

    /// Returns the factory configuration.
    #[must_use]
    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Creates an envelope in the configured default form.
    ///
    /// # Errors
    ///
    /// See [`MessageFactory::create_message`].
    pub fn create(&self, overrides: Value) -> Result<Message, EnvelopeError> {
        self.create_message(overrides, self.config.default_form)
    }

    /// Creates an envelope in `form`.
    ///
    /// `mid`, the timestamp and the version are generated first. Every key of
    /// `overrides` is then assigned by long or short name, replacing any
    /// generated value. `null` overrides are treated as no overrides.
    ///
    /// No semantic validation happens here, but field types are enforced:
    /// routing and identity fields hold strings, so an override such as
    /// `{"via": 5}` fails instead of being stored as a number. Only the
    /// payload and unknown keys accept arbitrary JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::NotAnObject`] when `overrides` is neither an
    /// object nor `null`, [`EnvelopeError::ExpectedString`] when an override
    /// assigns a non-string value to a string field, and
    /// [`EnvelopeError::DuplicateField`] when `overrides` names one field
    /// under both its long and short name.
    pub fn create_message(
        &self,
        overrides: Value,
        form: FieldForm,
    ) -> Result<Message, EnvelopeError> {
        let mut message = self.stamped(form);
        apply_overrides(&mut message, overrides)?;
        trace!(mid = ?message.mid(), %form, "envelope created");
        Ok(message)
    }

    /// Creates a short-form envelope.
    ///
    /// # Errors
    ///
    /// See [`MessageFactory::create_message`].
    pub fn create_message_short(&self, overrides: Value) -> Result<Message, EnvelopeError> {
        self.create_message(overrides, FieldForm::Short)
    }

    /// Creates a response to `original`.
    ///
    /// The reply's `rmid` is the original `mid`, and its `to` and `from` are
    /// the original's `from` and `to`. Overrides are applied last.
    ///
    /// # Errors
    ///
    /// See [`MessageFactory::create_message`].
    pub fn create_reply(
        &self,
        original: &Message,
        overrides: Value,
        form: FieldForm,
    ) -> Result<Message, EnvelopeError> {
        let mut reply = self.stamped(form);
        if let Some(mid) = original.mid() {
            reply.set_rmid(mid);
        }
        if let Some(origin) = original.origin() {
            reply.set_to(origin);
        }
        if let Some(destination) = original.to() {
            reply.set_origin(destination);
        }
        apply_overrides(&mut reply, overrides)?;
        trace!(mid = ?reply.mid(), rmid = ?reply.rmid(), %form, "reply envelope created");
        Ok(reply)
    }

    /// Returns a full-length message identifier.
    #[must_use]
    pub fn create_message_id(&self) -> String {
        self.ids.long_id()
    }

    /// Returns a compact message identifier.
    #[must_use]
    pub fn create_short_message_id(&self) -> String {
        self.ids.short_id()
    }

    /// Returns the current time as an RFC 3339 UTC string with millisecond
    /// precision.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.clock.utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn stamped(&self, form: FieldForm) -> Message {
        let mid = match form {
            FieldForm::Long => self.create_message_id(),
            FieldForm::Short => self.create_short_message_id(),
        };

        let mut message = Message::empty(form);
        message.set_text(Field::Mid, Some(mid));
        message.set_text(Field::Timestamp, Some(self.timestamp()));
        message.set_text(Field::Version, Some(self.config.protocol_version.clone()));
        message
    }
}

fn apply_overrides(message: &mut Message, overrides: Value) -> Result<(), EnvelopeError> {
    match overrides {
        Value::Null => Ok(()),
        Value::Object(object) => message.merge(object),
        _ => Err(EnvelopeError::NotAnObject),
    }
}
