//! UMF: a small, versioned inter-service message envelope.
//!
//! This crate provides the envelope data model with its long-form and
//! short-form field names, conversion between the two, envelope creation and
//! validation, and the parser for the compact routing strings carried in the
//! `to` field.
//!
//! # Modules
//!
//! - [`message`]: Envelope model, conversion, creation and validation
//! - [`route`]: Routing-string grammar

pub mod message;
pub mod route;
