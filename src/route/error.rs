//! Error types for routing-string parsing.

use thiserror::Error;

/// Reasons a routing string could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The route produced no colon-delimited segments.
    #[error("route field has invalid number of routable segments")]
    InvalidSegmentCount,

    /// A `[` opening an HTTP verb annotation has no closing `]`.
    #[error("route field has ill-formed HTTP method verb in segment")]
    IllFormedHttpMethod,
}
