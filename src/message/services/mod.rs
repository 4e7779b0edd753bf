//! Application services for the envelope subsystem.
//!
//! Services orchestrate domain operations and coordinate between ports.

mod factory;

pub use factory::{FactoryConfig, MessageFactory};
