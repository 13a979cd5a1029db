//! The request handler trait.
//!
//! [`Handler`] is the terminal of every dispatch: after the multiplexer has
//! walked its routing tree and run the middleware chain, exactly one handler
//! produces the response.

use crate::types::{Request, Response};
use std::future::Future;
use std::pin::Pin;

/// A boxed future, the return type of [`Handler::call`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An asynchronous HTTP request handler.
///
/// Handlers receive the request by value and return a complete response.
/// They are stored behind `Arc` inside the routing tree, so one handler
/// instance may serve many concurrent requests; any per-request state
/// belongs in the request itself.
///
/// Plain async functions and closures implement `Handler` through a blanket
/// impl, so most callers never implement the trait by hand:
///
/// ```
/// use hermes_core::{Handler, Request, Response, ResponseExt};
/// use http::StatusCode;
///
/// async fn hello(_req: Request) -> Response {
///     Response::text(StatusCode::OK, "hello")
/// }
///
/// fn assert_handler<H: Handler>(_h: H) {}
/// assert_handler(hello);
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles a request and produces a response.
    fn call<'a>(&'a self, request: Request) -> BoxFuture<'a, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call<'a>(&'a self, request: Request) -> BoxFuture<'a, Response> {
        Box::pin((self)(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseExt;
    use http::StatusCode;

    struct Fixed(StatusCode);

    impl Handler for Fixed {
        fn call<'a>(&'a self, _request: Request) -> BoxFuture<'a, Response> {
            Box::pin(async move { Response::empty(self.0) })
        }
    }

    fn request() -> Request {
        http::Request::builder()
            .uri("/test")
            .body(http_body_util::Full::new(bytes::Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_struct_handler() {
        let handler = Fixed(StatusCode::ACCEPTED);
        let response = handler.call(request()).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let handler = |_req: Request| async { Response::text(StatusCode::OK, "ok") };
        let response = handler.call(request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_handler_is_object_safe() {
        let handler: std::sync::Arc<dyn Handler> =
            std::sync::Arc::new(|_req: Request| async { Response::empty(StatusCode::OK) });
        let response = handler.call(request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
