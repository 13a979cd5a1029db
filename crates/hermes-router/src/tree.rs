//! The routing tree.

use crate::execution::RouteExecution;
use crate::node::RouteNode;
use crate::segment::{normalize, parse_pattern, split_request_path};
use http::Method;

/// A tree of routes rooted at `/`.
///
/// A multiplexer owns one tree per host plus a default tree; each tree is
/// independent. Registration takes `&mut self` and lookup takes `&self`, so
/// the borrow checker enforces the intended lifecycle: register everything,
/// then share the tree immutably with the serving tasks.
pub struct RouteTree {
    root: RouteNode,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RouteNode::new_root(),
        }
    }

    /// Creates or retrieves the node for `pattern` and returns it for
    /// configuration.
    ///
    /// The pattern is normalized first (leading `/` added, trailing `/`
    /// stripped); registering the same pattern twice returns the same node.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is malformed, mirroring
    /// [`RouteNode::route`].
    pub fn route(&mut self, pattern: &str) -> &mut RouteNode {
        let pattern = normalize(pattern);
        match parse_pattern(&pattern) {
            Ok(segments) => self.root.create(&segments),
            Err(err) => panic!("hermes: invalid route pattern: {err}"),
        }
    }

    /// Walks the tree for a request, filling `execution`.
    ///
    /// `path` is the raw escaped request path. The record accumulates the
    /// matched handler, middleware, parameters, pattern and not-found
    /// fallback; a miss leaves the handler unset.
    pub fn lookup(&self, method: &Method, path: &str, execution: &mut RouteExecution) {
        let segments = split_request_path(path);
        self.root.lookup(method, &segments, execution);
    }

    /// Returns one `<pattern>\t[<methods>]` line per node with at least one
    /// handler, in tree order.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.root.collect_routes(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{Request, Response, ResponseExt};
    use http::StatusCode;

    fn ok() -> impl hermes_core::Handler {
        |_req: Request| async { Response::empty(StatusCode::OK) }
    }

    #[test]
    fn test_route_normalizes_pattern() {
        let mut tree = RouteTree::new();
        assert_eq!(tree.route("users/").pattern(), "/users");
        assert_eq!(tree.route("/users").pattern(), "/users");
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let mut tree = RouteTree::new();
        tree.route("/users/:id").get(ok());

        let mut execution = RouteExecution::default();
        tree.lookup(&Method::GET, "/users/3", &mut execution);
        assert!(execution.handler.is_some());
        assert_eq!(execution.params.get("id"), Some("3"));

        let mut execution = RouteExecution::default();
        tree.lookup(&Method::GET, "/nope", &mut execution);
        assert!(execution.handler.is_none());
    }

    #[test]
    fn test_routes_listing() {
        let mut tree = RouteTree::new();
        tree.route("/").get(ok());
        tree.route("/users").get(ok()).post(ok());
        tree.route("/users/:id").delete(ok());
        // Interior nodes without handlers are omitted.
        tree.route("/deep/empty/leaf").any(ok());

        assert_eq!(
            tree.routes(),
            vec![
                "/\t[GET]",
                "/deep/empty/leaf\t[ANY]",
                "/users\t[GET, POST]",
                "/users/:id\t[DELETE]",
            ]
        );
    }
}
