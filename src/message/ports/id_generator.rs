//! Identifier generator port.

/// Source of statistically unique message identifiers.
///
/// Implementations must be safe to share across threads; the factory calls
/// them once per created envelope.
pub trait IdGenerator: Send + Sync {
    /// Returns a full-length identifier for long-form envelopes.
    fn long_id(&self) -> String;

    /// Returns a compact identifier for short-form envelopes.
    fn short_id(&self) -> String;
}
