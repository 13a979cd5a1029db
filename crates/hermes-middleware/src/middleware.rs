//! The middleware trait and chain composition.
//!
//! A chain is a slice of middleware plus a terminal handler. [`Next`]
//! borrows the remaining slice; each `run` peels one middleware off the
//! front and hands it the tail, so the chain unwinds left to right and
//! bottoms out in the handler. `run` consumes the continuation, which makes
//! invoking the rest of the chain more than once a compile error rather
//! than a runtime surprise.

use hermes_core::{BoxFuture, Handler, Request, Response};
use std::sync::Arc;

/// Wraps the dispatch of a request.
///
/// Middleware runs in registration order from the tree root down to the
/// matched route. A middleware may answer the request itself by returning
/// without calling [`Next::run`].
///
/// # Example
///
/// ```
/// use hermes_middleware::{Middleware, Next};
/// use hermes_core::{BoxFuture, Request, Response};
///
/// struct ServerHeader;
///
/// impl Middleware for ServerHeader {
///     fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
///         Box::pin(async move {
///             let mut response = next.run(request).await;
///             response
///                 .headers_mut()
///                 .insert(http::header::SERVER, "hermes".parse().unwrap());
///             response
///         })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Processes the request, optionally delegating to the rest of the chain.
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response>;
}

/// The continuation handed to each middleware.
///
/// Calling [`Next::run`] invokes the remainder of the chain and, at the
/// end, the terminal handler. Dropping it without calling aborts the chain.
pub struct Next<'a> {
    middleware: &'a [Arc<dyn Middleware>],
    handler: &'a dyn Handler,
}

impl<'a> Next<'a> {
    /// Creates a continuation over a middleware slice and a terminal handler.
    #[must_use]
    pub fn new(middleware: &'a [Arc<dyn Middleware>], handler: &'a dyn Handler) -> Self {
        Self {
            middleware,
            handler,
        }
    }

    /// Invokes the next middleware in the chain, or the terminal handler if
    /// the chain is exhausted.
    pub fn run(self, request: Request) -> BoxFuture<'a, Response> {
        match self.middleware.split_first() {
            Some((head, tail)) => head.handle(
                request,
                Next {
                    middleware: tail,
                    handler: self.handler,
                },
            ),
            None => self.handler.call(request),
        }
    }
}

/// Adapts a function to the [`Middleware`] trait.
///
/// The function receives the request and continuation and returns a boxed
/// future tied to the continuation's lifetime. Named functions are the most
/// reliable way to satisfy the higher-ranked bound:
///
/// ```
/// use hermes_middleware::{FnMiddleware, Next};
/// use hermes_core::{BoxFuture, Request, Response};
///
/// fn pass_through(request: Request, next: Next<'_>) -> BoxFuture<'_, Response> {
///     Box::pin(async move { next.run(request).await })
/// }
///
/// let middleware = FnMiddleware::new(pass_through);
/// ```
pub struct FnMiddleware<F> {
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(Request, Next<'a>) -> BoxFuture<'a, Response> + Send + Sync + 'static,
{
    fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
        (self.func)(request, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use hermes_core::ResponseExt;
    use http::StatusCode;
    use http_body_util::Full;

    fn request() -> Request {
        http::Request::builder()
            .uri("/test")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        use http_body_util::BodyExt;
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Appends its tag to a header on the way in, so ordering is observable.
    struct Tag(&'static str);

    impl Middleware for Tag {
        fn handle<'a>(&'a self, mut request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
            Box::pin(async move {
                let trail = request
                    .headers()
                    .get("x-trail")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let trail = format!("{trail}{}-", self.0);
                request
                    .headers_mut()
                    .insert("x-trail", trail.parse().unwrap());
                next.run(request).await
            })
        }
    }

    struct ShortCircuit;

    impl Middleware for ShortCircuit {
        fn handle<'a>(&'a self, _request: Request, _next: Next<'a>) -> BoxFuture<'a, Response> {
            Box::pin(async { Response::text(StatusCode::FORBIDDEN, "stopped") })
        }
    }

    fn trail_handler() -> impl Handler {
        |req: Request| async move {
            let trail = req
                .headers()
                .get("x-trail")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Response::text(StatusCode::OK, &format!("{trail}handler"))
        }
    }

    #[tokio::test]
    async fn test_empty_chain_runs_handler() {
        let handler = trail_handler();
        let response = Next::new(&[], &handler).run(request()).await;
        assert_eq!(body_text(response).await, "handler");
    }

    #[tokio::test]
    async fn test_chain_runs_in_order() {
        let chain: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Tag("one")), Arc::new(Tag("two")), Arc::new(Tag("three"))];
        let handler = trail_handler();

        let response = Next::new(&chain, &handler).run(request()).await;
        assert_eq!(body_text(response).await, "one-two-three-handler");
    }

    #[tokio::test]
    async fn test_short_circuit_skips_rest() {
        let chain: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Tag("one")), Arc::new(ShortCircuit), Arc::new(Tag("never"))];
        let handler = trail_handler();

        let response = Next::new(&chain, &handler).run(request()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "stopped");
    }

    #[tokio::test]
    async fn test_fn_middleware() {
        fn stamp(request: Request, next: Next<'_>) -> BoxFuture<'_, Response> {
            Box::pin(async move {
                let mut response = next.run(request).await;
                response
                    .headers_mut()
                    .insert("x-stamped", "yes".parse().unwrap());
                response
            })
        }

        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(FnMiddleware::new(stamp))];
        let handler = trail_handler();

        let response = Next::new(&chain, &handler).run(request()).await;
        assert_eq!(response.headers().get("x-stamped").unwrap(), "yes");
    }

    #[tokio::test]
    async fn test_post_processing_order() {
        // Middleware that appends to the response body after the handler ran.
        struct After(&'static str);

        impl Middleware for After {
            fn handle<'a>(&'a self, request: Request, next: Next<'a>) -> BoxFuture<'a, Response> {
                Box::pin(async move {
                    use http_body_util::BodyExt;
                    let response = next.run(request).await;
                    let (parts, body) = response.into_parts();
                    let mut bytes = body.collect().await.unwrap().to_bytes().to_vec();
                    bytes.extend_from_slice(self.0.as_bytes());
                    Response::from_parts(parts, Full::new(Bytes::from(bytes)))
                })
            }
        }

        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(After("-outer")), Arc::new(After("-inner"))];
        let handler = |_req: Request| async { Response::text(StatusCode::OK, "handler") };

        let response = Next::new(&chain, &handler).run(request()).await;
        // Inner middleware finishes first, outer appends last.
        assert_eq!(body_text(response).await, "handler-inner-outer");
    }
}
