//! Built-in handlers.
//!
//! The multiplexer synthesizes responses for three situations that have no
//! user-registered handler: unmatched paths, redirects registered through
//! the fluent route surface, and method mismatches on a route that serves
//! other methods.

use crate::handler::{BoxFuture, Handler};
use crate::types::{Request, Response, ResponseExt};
use http::{header, StatusCode};

/// The default not-found handler.
///
/// Returns a plain-text 404. Installed by the multiplexer at construction
/// and replaceable per subtree or globally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundHandler;

impl NotFoundHandler {
    /// Creates a new not-found handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Handler for NotFoundHandler {
    fn call<'a>(&'a self, _request: Request) -> BoxFuture<'a, Response> {
        Box::pin(async { Response::text(StatusCode::NOT_FOUND, "404 page not found\n") })
    }
}

/// A handler that answers every request with a redirect.
///
/// # Example
///
/// ```
/// use hermes_core::RedirectHandler;
///
/// let permanent = RedirectHandler::permanent("/new-home");
/// let temporary = RedirectHandler::temporary("/try-later");
/// ```
#[derive(Debug, Clone)]
pub struct RedirectHandler {
    location: String,
    status: StatusCode,
}

impl RedirectHandler {
    /// Creates a 308 Permanent Redirect handler.
    #[must_use]
    pub fn permanent(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: StatusCode::PERMANENT_REDIRECT,
        }
    }

    /// Creates a 307 Temporary Redirect handler.
    #[must_use]
    pub fn temporary(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: StatusCode::TEMPORARY_REDIRECT,
        }
    }

    /// Returns the redirect target.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Handler for RedirectHandler {
    fn call<'a>(&'a self, _request: Request) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            http::Response::builder()
                .status(self.status)
                .header(header::LOCATION, self.location.as_str())
                .body(http_body_util::Full::new(bytes::Bytes::new()))
                .expect("failed to build redirect response")
        })
    }
}

/// A synthesized 405 Method Not Allowed handler.
///
/// Carries the comma-separated list of methods the matched route actually
/// serves and emits it as the `Allow` response header.
#[derive(Debug, Clone)]
pub struct MethodNotAllowedHandler {
    allow: String,
}

impl MethodNotAllowedHandler {
    /// Creates a handler advertising the given methods.
    #[must_use]
    pub fn new(methods: &[http::Method]) -> Self {
        let allow = methods
            .iter()
            .map(http::Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self { allow }
    }

    /// Returns the `Allow` header value this handler will emit.
    #[must_use]
    pub fn allow(&self) -> &str {
        &self.allow
    }
}

impl Handler for MethodNotAllowedHandler {
    fn call<'a>(&'a self, _request: Request) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            http::Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .header(header::ALLOW, self.allow.as_str())
                .body(http_body_util::Full::new(bytes::Bytes::new()))
                .expect("failed to build method-not-allowed response")
        })
    }
}
