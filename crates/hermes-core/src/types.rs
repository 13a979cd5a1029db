//! Common request and response types.
//!
//! This module fixes the body type used across the multiplexer so that
//! handlers, middleware and tests all speak the same `http` dialect.

use bytes::Bytes;
use http_body_util::Full;

/// The HTTP request type dispatched through the multiplexer.
///
/// This is a standard `http::Request` with a `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type produced by handlers and middleware.
///
/// This is a standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// Extension trait for building plain responses.
pub trait ResponseExt {
    /// Creates a text response with the given status code and body.
    fn text(status: http::StatusCode, body: &str) -> Response;

    /// Creates an empty response with the given status code.
    fn empty(status: http::StatusCode) -> Response;
}

impl ResponseExt for Response {
    fn text(status: http::StatusCode, body: &str) -> Response {
        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(body.to_string())))
            .expect("failed to build text response")
    }

    fn empty(status: http::StatusCode) -> Response {
        http::Response::builder()
            .status(status)
            .body(Full::new(Bytes::new()))
            .expect("failed to build empty response")
    }
}
