//! Port trait definitions for the envelope subsystem.
//!
//! Ports define the abstract interfaces that the domain requires from
//! collaborators. Adapters implement these ports to connect the domain
//! to identifier sources and other infrastructure.

pub mod id_generator;
pub mod validator;

pub use id_generator::IdGenerator;
pub use validator::{EnvelopeValidator, ValidationResult};
