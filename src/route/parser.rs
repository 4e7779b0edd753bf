//! Routing-string parser.

use tracing::debug;
use uuid::Uuid;

use super::RouteError;

/// Length of a hyphenated UUID (`8-4-4-4-12`).
const HYPHENATED_UUID_LEN: usize = 36;

/// The components of a parsed routing string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteResult {
    /// Targeted service instance, empty when the route has no `@` segment.
    pub instance: String,
    /// Sub-identifier following the instance, empty when absent.
    pub sub_id: String,
    /// Service name.
    pub service_name: String,
    /// Lower-cased HTTP verb, `None` when the route carries no `[VERB]`.
    pub http_method: Option<String>,
    /// Path following the service name and verb.
    pub api_route: String,
    /// Parse failure; the other fields are partial when set.
    pub error: Option<RouteError>,
}

impl RouteResult {
    /// Returns `true` when the route parsed without error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the parse failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<RouteError> {
        self.error
    }

    fn fail(mut self, error: RouteError) -> Self {
        debug!(%error, service = %self.service_name, "routing string rejected");
        self.error = Some(error);
        self
    }
}

/// Parses a routing string into its routable components.
///
/// Parsing proceeds left to right:
///
/// 1. Everything before the first `@` is the instance segment. A leading
///    hyphenated UUID is kept whole as the instance; otherwise the segment is
///    split on `-` into instance and sub-identifier, and further tokens are
///    dropped.
/// 2. The remainder is split on `:`. The first segment is the service name,
///    rejoined with the second when it starts with `http` so that
///    `https://host` survives. The remaining segments form the API route.
/// 3. An API route starting with `[` carries an HTTP verb up to the first
///    `]`; the verb is lower-cased and stripped from the route.
///
/// # Examples
///
/// ```
/// use umf::route::{RouteError, parse_route};
///
/// let route = parse_route("client:/");
/// assert_eq!(route.instance, "");
/// assert_eq!(route.service_name, "client");
/// assert_eq!(route.http_method, None);
/// assert_eq!(route.api_route, "/");
///
/// let broken = parse_route("service:[GET");
/// assert_eq!(broken.error, Some(RouteError::IllFormedHttpMethod));
/// ```
#[must_use]
pub fn parse_route(to: &str) -> RouteResult {
    let mut route = RouteResult::default();

    let remainder = match to.split_once('@') {
        Some((segment, rest)) => {
            let (instance, sub_id) = split_instance_segment(segment);
            route.instance = instance.to_owned();
            route.sub_id = sub_id.to_owned();
            rest
        }
        None => to,
    };

    let mut segments = remainder.split(':');
    let Some(first) = segments.next() else {
        return route.fail(RouteError::InvalidSegmentCount);
    };

    route.service_name = if first.starts_with("http") {
        segments
            .next()
            .map_or_else(|| first.to_owned(), |host| format!("{first}:{host}"))
    } else {
        first.to_owned()
    };
    route.api_route = segments.collect::<Vec<_>>().join(":");

    if let Some(annotated) = route.api_route.strip_prefix('[') {
        let Some((verb, path)) = annotated.split_once(']') else {
            return route.fail(RouteError::IllFormedHttpMethod);
        };
        let http_method = verb.to_lowercase();
        let api_route = path.to_owned();
        route.http_method = Some(http_method);
        route.api_route = api_route;
    }

    route
}

/// Splits an instance segment into instance and sub-identifier.
fn split_instance_segment(segment: &str) -> (&str, &str) {
    if let Some((instance, rest)) = leading_uuid(segment) {
        let sub_id = rest
            .strip_prefix('-')
            .and_then(|tail| tail.split('-').next())
            .unwrap_or_default();
        return (instance, sub_id);
    }

    let mut tokens = segment.split('-');
    let instance = tokens.next().unwrap_or_default();
    let sub_id = tokens.next().unwrap_or_default();
    (instance, sub_id)
}

/// Returns a leading hyphenated UUID and what follows it, provided the UUID
/// is the whole segment or is followed by `-`.
fn leading_uuid(segment: &str) -> Option<(&str, &str)> {
    let (candidate, rest) = segment.split_at_checked(HYPHENATED_UUID_LEN)?;
    if !rest.is_empty() && !rest.starts_with('-') {
        return None;
    }
    Uuid::try_parse(candidate).ok().map(|_| (candidate, rest))
}
