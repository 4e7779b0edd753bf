//! Adapter implementations for the envelope subsystem ports.

pub mod uuid_generator;

pub use uuid_generator::UuidIdGenerator;
