//! Routing-string grammar for the envelope `to` field.
//!
//! A routing string has the shape
//! `[instance[-subID]@]serviceName[:[VERB]apiRoute]`, for example
//! `fa1ae8d5-86fc-44af-aad8-cd2740aef041@test-service:[GET]/v1/somedata`.
//!
//! Parsing never fails outright. Problems are reported through
//! [`RouteResult::error`], in which case the remaining fields are partial and
//! must not drive routing decisions.
//!
//! # Example
//!
//! ```
//! use umf::route::parse_route;
//!
//! let route = parse_route("test-service:[POST]/v1/jobs");
//! assert!(route.is_ok());
//! assert_eq!(route.service_name, "test-service");
//! assert_eq!(route.http_method.as_deref(), Some("post"));
//! assert_eq!(route.api_route, "/v1/jobs");
//! ```

mod error;
mod parser;

pub use error::RouteError;
pub use parser::{RouteResult, parse_route};
