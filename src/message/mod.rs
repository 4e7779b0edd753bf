//! UMF envelope model, conversion, creation and validation.
//!
//! This module implements the versioned inter-service message envelope and
//! the operations services use to build, convert and check it.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Message`], [`domain::Field`], [`domain::FieldForm`])
//! - **Ports**: Abstract trait interfaces ([`ports::IdGenerator`], [`ports::EnvelopeValidator`])
//! - **Adapters**: Concrete implementations ([`adapters::UuidIdGenerator`])
//! - **Services**: Envelope creation ([`services::MessageFactory`])
//! - **Validation**: Presence checks before dispatch
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use serde_json::json;
//! use umf::message::adapters::UuidIdGenerator;
//! use umf::message::services::MessageFactory;
//! use umf::message::validation::validate_message;
//!
//! let factory = MessageFactory::new(Arc::new(UuidIdGenerator), Arc::new(DefaultClock));
//! let message = factory
//!     .create(json!({
//!         "to": "test-service:[GET]/v1/somedata",
//!         "from": "client:/",
//!         "body": {"query": "all"},
//!     }))
//!     .expect("valid overrides");
//!
//! assert!(validate_message(&message));
//! assert_eq!(message.parse_to().service_name, "test-service");
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
