//! Request-scoped accessors for routing results.
//!
//! During dispatch the multiplexer attaches the decoded path parameters and
//! the matched pattern to the request's extensions; handlers and middleware
//! read them back through the functions here.

use hermes_core::Request;
use hermes_router::PathParams;
use std::sync::Arc;

/// The canonical pattern a request matched, as stored in the request
/// extensions.
///
/// The value is the registration pattern with parameter placeholders
/// (`/users/:id/info`), not the concrete request path. It is identical to
/// the pattern returned by
/// [`Multiplexer::handler_and_middleware`](crate::Multiplexer::handler_and_middleware).
#[derive(Debug, Clone)]
pub struct MatchedPattern(Arc<str>);

impl MatchedPattern {
    pub(crate) fn new(pattern: Arc<str>) -> Self {
        Self(pattern)
    }

    /// The pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns the decoded value of one path parameter.
///
/// `None` if the request carries no parameters or the name is unknown.
///
/// # Example
///
/// ```
/// use hermes_mux::{path_param, Multiplexer};
/// use hermes_core::{Request, Response, ResponseExt};
/// use http::StatusCode;
///
/// let mut mux = Multiplexer::new();
/// mux.route("/users/:id").get(|req: Request| async move {
///     let id = path_param(&req, "id").unwrap_or_default();
///     Response::text(StatusCode::OK, id)
/// });
/// ```
#[must_use]
pub fn path_param<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .extensions()
        .get::<PathParams>()
        .and_then(|params| params.get(name))
}

/// Returns a defensive copy of every path parameter on the request.
///
/// An empty set if the matched route had no parameters.
#[must_use]
pub fn path_params(request: &Request) -> PathParams {
    request
        .extensions()
        .get::<PathParams>()
        .cloned()
        .unwrap_or_default()
}

/// Returns the canonical pattern the request matched, if any.
#[must_use]
pub fn matched_pattern(request: &Request) -> Option<&str> {
    request
        .extensions()
        .get::<MatchedPattern>()
        .map(MatchedPattern::as_str)
}
