//! The multiplexer facade.

use crate::params::MatchedPattern;
use hermes_core::{Handler, NotFoundHandler, RedirectHandler, Request, Response};
use hermes_middleware::{Middleware, Next};
use hermes_router::{ExecutionPool, RouteExecution, RouteNode, RouteTree};
use http::header;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// An HTTP request multiplexer.
///
/// Owns one routing tree per registered host plus a default tree, a free
/// list of execution records and the default not-found handler.
///
/// Registration goes through `&mut self` and serving through `&self`:
/// register every route at startup, then move the multiplexer into an
/// `Arc` and serve from as many tasks as the runtime likes. No lock is
/// taken on the lookup path.
///
/// # Example
///
/// ```
/// use hermes_mux::Multiplexer;
/// use hermes_core::{Request, Response, ResponseExt};
/// use http::StatusCode;
///
/// let mut mux = Multiplexer::new();
/// mux.route("/health").get(|_req: Request| async {
///     Response::text(StatusCode::OK, "ok")
/// });
/// mux.route("/old-home").redirect("/", true);
///
/// let mux = std::sync::Arc::new(mux);
/// // hand `mux` to the server loop; call `mux.serve(request)` per request
/// ```
pub struct Multiplexer {
    default_tree: RouteTree,
    hosts: HashMap<String, RouteTree>,
    not_found: Arc<dyn Handler>,
    pool: ExecutionPool,
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplexer {
    /// Creates an empty multiplexer with the stock 404 handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_tree: RouteTree::new(),
            hosts: HashMap::new(),
            not_found: Arc::new(NotFoundHandler::new()),
            pool: ExecutionPool::new(),
        }
    }

    // ---- registration ----------------------------------------------------

    /// Creates or retrieves the route node for `pattern` on the default
    /// tree and returns it for configuration.
    ///
    /// # Panics
    ///
    /// Panics on a malformed pattern; see [`RouteTree::route`].
    pub fn route(&mut self, pattern: &str) -> &mut RouteNode {
        let node = self.default_tree.route(pattern);
        debug!(pattern = node.pattern(), "route registered");
        node
    }

    /// Like [`Multiplexer::route`], on the tree for `host`.
    ///
    /// The host tree is created on first use. Hosts are matched by exact
    /// string comparison against the request's authority, or its `Host`
    /// header when the URI carries none; include the port if clients will
    /// send one.
    pub fn route_host(&mut self, host: impl Into<String>, pattern: &str) -> &mut RouteNode {
        let host = host.into();
        let node = self.hosts.entry(host.clone()).or_default().route(pattern);
        debug!(host, pattern = node.pattern(), "host route registered");
        node
    }

    /// Registers `handler` for any method on `pattern`.
    ///
    /// Shorthand for `route(pattern).any(handler)`. Plain async closures
    /// taking a [`Request`] are handlers, so this is also the function
    /// registration form.
    pub fn handle<H: Handler>(&mut self, pattern: &str, handler: H) {
        self.route(pattern).any(handler);
    }

    /// Registers `handler` for any method on `pattern` under `host`.
    pub fn handle_host<H: Handler>(&mut self, host: impl Into<String>, pattern: &str, handler: H) {
        self.route_host(host, pattern).any(handler);
    }

    /// Attaches `middleware` to `pattern` for every method.
    ///
    /// Shorthand for `route(pattern).middleware(middleware)`.
    pub fn middleware<M: Middleware>(&mut self, pattern: &str, middleware: M) {
        self.route(pattern).middleware(middleware);
    }

    /// Attaches `middleware` to `pattern` under `host`.
    pub fn middleware_host<M: Middleware>(
        &mut self,
        host: impl Into<String>,
        pattern: &str,
        middleware: M,
    ) {
        self.route_host(host, pattern).middleware(middleware);
    }

    /// Replaces the default not-found handler.
    ///
    /// Subtree `not_found` registrations on route nodes still take
    /// precedence where they apply.
    pub fn not_found<H: Handler>(&mut self, handler: H) {
        self.not_found = Arc::new(handler);
    }

    // ---- lookup ----------------------------------------------------------

    /// Resolves a request to its handler and matched pattern without
    /// dispatching.
    ///
    /// The handler is always the effective one: the route's handler, a
    /// synthesized redirect or 405, or the applicable not-found handler.
    /// The pattern is empty when no terminal node matched.
    #[must_use]
    pub fn handler(&self, request: &Request) -> (Arc<dyn Handler>, String) {
        let (handler, _, pattern) = self.handler_and_middleware(request);
        (handler, pattern)
    }

    /// Resolves a request to its handler, middleware chain and matched
    /// pattern without dispatching.
    #[must_use]
    pub fn handler_and_middleware(
        &self,
        request: &Request,
    ) -> (Arc<dyn Handler>, Vec<Arc<dyn Middleware>>, String) {
        let path = request.uri().path();
        if path != "/" && path.ends_with('/') {
            let target = redirect_target(path);
            let handler: Arc<dyn Handler> = Arc::new(RedirectHandler::permanent(target.clone()));
            return (handler, Vec::new(), target);
        }

        let mut execution = self.lookup(request);
        let handler = effective_handler(&mut execution, &self.not_found);
        let middleware = execution.middleware.clone();
        let pattern = execution
            .pattern
            .as_deref()
            .unwrap_or_default()
            .to_string();
        self.pool.release(execution);

        (handler, middleware, pattern)
    }

    fn lookup(&self, request: &Request) -> Box<RouteExecution> {
        let tree = self.tree_for(request);
        let mut execution = self.pool.acquire();
        tree.lookup(request.method(), request.uri().path(), &mut execution);
        execution
    }

    fn tree_for(&self, request: &Request) -> &RouteTree {
        if self.hosts.is_empty() {
            return &self.default_tree;
        }
        request_host(request)
            .and_then(|host| self.hosts.get(host))
            .unwrap_or(&self.default_tree)
    }

    // ---- dispatch --------------------------------------------------------

    /// Dispatches a request and returns the response.
    ///
    /// Looks up the handler, attaches path parameters and the matched
    /// pattern to the request extensions, threads the request through the
    /// middleware chain gathered along the route and runs the handler. All
    /// outcomes, including misses and method mismatches, materialize as a
    /// response.
    pub async fn serve(&self, mut request: Request) -> Response {
        let path = request.uri().path();
        if path != "/" && path.ends_with('/') {
            let location = redirect_target(path);
            trace!(path, location, "redirecting trailing slash");
            let redirect = RedirectHandler::permanent(location);
            return redirect.call(request).await;
        }

        let mut execution = self.lookup(&request);
        let handler = effective_handler(&mut execution, &self.not_found);
        trace!(
            method = %request.method(),
            path = request.uri().path(),
            pattern = execution.pattern.as_deref().unwrap_or(""),
            "dispatching"
        );

        if !execution.params.is_empty() {
            request.extensions_mut().insert(execution.params.clone());
        }
        if let Some(pattern) = &execution.pattern {
            request
                .extensions_mut()
                .insert(MatchedPattern::new(pattern.clone()));
        }

        let response = Next::new(&execution.middleware, handler.as_ref())
            .run(request)
            .await;
        self.pool.release(execution);
        response
    }
}

impl fmt::Display for Multiplexer {
    /// Lists every route with at least one handler, one
    /// `<pattern>\t[<methods>]` line each. Host trees follow the default
    /// tree, prefixed with `//<host>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.default_tree.routes() {
            writeln!(f, "{line}")?;
        }
        let mut hosts: Vec<_> = self.hosts.iter().collect();
        hosts.sort_by(|a, b| a.0.cmp(b.0));
        for (host, tree) in hosts {
            for line in tree.routes() {
                writeln!(f, "//{host}{line}")?;
            }
        }
        Ok(())
    }
}

/// Picks the handler a finished lookup dispatches to.
fn effective_handler(
    execution: &mut RouteExecution,
    default_not_found: &Arc<dyn Handler>,
) -> Arc<dyn Handler> {
    execution
        .handler
        .take()
        .or_else(|| execution.not_found.take())
        .unwrap_or_else(|| default_not_found.clone())
}

/// The `Location` for a trailing-slash redirect.
fn redirect_target(path: &str) -> String {
    let stripped = path.trim_end_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// The host a request addresses: URI authority first, `Host` header
/// otherwise.
fn request_host(request: &Request) -> Option<&str> {
    request.uri().host().or_else(|| {
        request
            .headers()
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target("/foo/"), "/foo");
        assert_eq!(redirect_target("/foo///"), "/foo");
        assert_eq!(redirect_target("///"), "/");
    }

    #[test]
    fn test_request_host_from_header() {
        let request: Request = http::Request::builder()
            .uri("/x")
            .header(header::HOST, "example.com:8080")
            .body(http_body_util::Full::new(bytes::Bytes::new()))
            .unwrap();
        assert_eq!(request_host(&request), Some("example.com:8080"));
    }

    #[test]
    fn test_request_host_from_authority() {
        let request: Request = http::Request::builder()
            .uri("http://example.com/x")
            .body(http_body_util::Full::new(bytes::Bytes::new()))
            .unwrap();
        assert_eq!(request_host(&request), Some("example.com"));
    }

    #[test]
    fn test_request_host_missing() {
        let request: Request = http::Request::builder()
            .uri("/x")
            .body(http_body_util::Full::new(bytes::Bytes::new()))
            .unwrap();
        assert_eq!(request_host(&request), None);
    }
}
