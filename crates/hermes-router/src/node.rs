//! Route nodes: insertion and lookup.

use crate::execution::RouteExecution;
use crate::methods::MethodHandlers;
use crate::segment::{normalize, parse_pattern, Segment};
use hermes_core::{Handler, MethodNotAllowedHandler, RedirectHandler};
use hermes_middleware::{Middleware, VerbMask};
use http::Method;
use std::sync::Arc;

/// What a node matches against the corresponding request segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    /// Exact text match.
    Literal,
    /// Any single segment, bound under the given name.
    Param(String),
    /// The whole remaining path. Always a leaf.
    Wildcard,
}

/// One middleware attached to a node, gated by a verb mask.
struct MiddlewareBinding {
    middleware: Arc<dyn Middleware>,
    mask: VerbMask,
}

/// A vertex of the routing tree.
///
/// A node matches one path segment and owns the handlers and middleware
/// registered at that position. Obtained from the multiplexer's or tree's
/// `route` call, which creates missing nodes on the way down and returns
/// the existing node otherwise, so registration is idempotent.
///
/// The fluent surface mutates the node in place and returns `&mut Self`:
///
/// ```
/// use hermes_router::RouteTree;
/// use hermes_core::{Request, Response, ResponseExt};
/// use http::StatusCode;
///
/// let mut tree = RouteTree::new();
/// tree.route("/users/:id")
///     .get(|_req: Request| async { Response::text(StatusCode::OK, "get") })
///     .delete(|_req: Request| async { Response::empty(StatusCode::NO_CONTENT) });
/// ```
pub struct RouteNode {
    /// The pattern segment as written (`users`, `:id`, `*`; empty for root).
    segment: String,
    kind: NodeKind,
    /// Canonical pattern from the root to this node.
    full_path: Arc<str>,
    handlers: MethodHandlers,
    middleware: Vec<MiddlewareBinding>,
    /// Literal children, sorted by segment text.
    literal_children: Vec<RouteNode>,
    param_child: Option<Box<RouteNode>>,
    wildcard_child: Option<Box<RouteNode>>,
}

impl RouteNode {
    pub(crate) fn new_root() -> Self {
        Self {
            segment: String::new(),
            kind: NodeKind::Literal,
            full_path: Arc::from("/"),
            handlers: MethodHandlers::new(),
            middleware: Vec::new(),
            literal_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
        }
    }

    fn new_child(parent_path: &str, segment: &Segment) -> Self {
        let text = segment.text();
        let full_path: Arc<str> = if parent_path == "/" {
            Arc::from(format!("/{text}"))
        } else {
            Arc::from(format!("{parent_path}/{text}"))
        };
        let kind = match segment {
            Segment::Literal(_) => NodeKind::Literal,
            Segment::Param(name) => NodeKind::Param(name.clone()),
            Segment::Wildcard => NodeKind::Wildcard,
        };
        Self {
            segment: text,
            kind,
            full_path,
            handlers: MethodHandlers::new(),
            middleware: Vec::new(),
            literal_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
        }
    }

    /// The canonical pattern of this node, `/` for the root.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.full_path
    }

    // ---- registration ----------------------------------------------------

    /// Extends the tree below this node and returns the target node.
    ///
    /// The path is relative to this node and is normalized first: a leading
    /// `/` is added if missing and trailing slashes are stripped. Calling
    /// with `/` returns this node itself.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is malformed (empty parameter name, segments
    /// below a wildcard). Registration happens at startup; a bad pattern is
    /// a programmer error and fails fast.
    pub fn route(&mut self, path: &str) -> &mut RouteNode {
        let pattern = normalize(path);
        match parse_pattern(&pattern) {
            Ok(segments) => self.create(&segments),
            Err(err) => panic!("hermes: invalid route pattern: {err}"),
        }
    }

    /// Descends the tree following `segments`, creating nodes as needed.
    pub(crate) fn create(&mut self, segments: &[Segment]) -> &mut RouteNode {
        // Nothing can live below a wildcard; deeper segments are
        // unreachable by contract and resolve to the wildcard itself.
        if self.kind == NodeKind::Wildcard {
            return self;
        }

        let Some((segment, rest)) = segments.split_first() else {
            return self;
        };

        match segment {
            Segment::Literal(text) => {
                let index = match self
                    .literal_children
                    .binary_search_by(|child| child.segment.as_str().cmp(text))
                {
                    Ok(index) => index,
                    Err(index) => {
                        let child = RouteNode::new_child(&self.full_path, segment);
                        self.literal_children.insert(index, child);
                        index
                    }
                };
                self.literal_children[index].create(rest)
            }
            Segment::Param(_) => {
                // One parameter slot per node. A second registration with a
                // different name lands on the same child; the first name
                // wins for both the binding and the canonical pattern.
                let full_path = &self.full_path;
                self.param_child
                    .get_or_insert_with(|| Box::new(RouteNode::new_child(full_path, segment)))
                    .create(rest)
            }
            Segment::Wildcard => {
                let full_path = &self.full_path;
                self.wildcard_child
                    .get_or_insert_with(|| Box::new(RouteNode::new_child(full_path, segment)))
            }
        }
    }

    fn set(&mut self, method: Method, handler: Arc<dyn Handler>) -> &mut Self {
        self.handlers.insert(&method, handler);
        self
    }

    /// Registers a GET handler. Also answers HEAD requests when no HEAD
    /// handler is registered.
    pub fn get<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::GET, Arc::new(handler))
    }

    /// Registers a HEAD handler.
    pub fn head<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::HEAD, Arc::new(handler))
    }

    /// Registers a POST handler.
    pub fn post<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::POST, Arc::new(handler))
    }

    /// Registers a PUT handler.
    pub fn put<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::PUT, Arc::new(handler))
    }

    /// Registers a PATCH handler.
    pub fn patch<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::PATCH, Arc::new(handler))
    }

    /// Registers a DELETE handler.
    pub fn delete<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::DELETE, Arc::new(handler))
    }

    /// Registers a CONNECT handler.
    pub fn connect<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::CONNECT, Arc::new(handler))
    }

    /// Registers an OPTIONS handler.
    ///
    /// The handler also answers OPTIONS requests for routes deeper in the
    /// path unless a more specific handler matches there.
    pub fn options<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.set(Method::OPTIONS, Arc::new(handler))
    }

    /// Registers a catch-all handler for any method.
    ///
    /// Takes lower precedence than a method-specific handler on the same
    /// node.
    pub fn any<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.handlers.insert_any(Arc::new(handler));
        self
    }

    /// Registers the not-found handler for this subtree.
    ///
    /// Used for requests that fall off the tree at or below this node; a
    /// deeper registration wins over a shallower one.
    pub fn not_found<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.handlers.insert_not_found(Arc::new(handler));
        self
    }

    /// Registers a redirect for any method on this route.
    ///
    /// `permanent` selects 308 over 307.
    pub fn redirect(&mut self, url: impl Into<String>, permanent: bool) -> &mut Self {
        let url = url.into();
        if permanent {
            self.any(RedirectHandler::permanent(url))
        } else {
            self.any(RedirectHandler::temporary(url))
        }
    }

    /// Attaches a middleware that runs for every method.
    ///
    /// Middleware attached here runs whenever the path of a matched request
    /// crosses this node, ancestors first, registration order within the
    /// node.
    pub fn middleware<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(MiddlewareBinding {
            middleware: Arc::new(middleware),
            mask: VerbMask::ALL,
        });
        self
    }

    /// Attaches a middleware that runs only for the given methods.
    ///
    /// An empty method list registers nothing.
    ///
    /// # Panics
    ///
    /// Panics if any method is outside the routable set. Registration
    /// happens at startup; an unknown verb is a programmer error and fails
    /// fast.
    pub fn middleware_for<M: Middleware>(&mut self, middleware: M, methods: &[Method]) -> &mut Self {
        if methods.is_empty() {
            return self;
        }
        let mask = match VerbMask::for_methods(methods) {
            Ok(mask) => mask,
            Err(err) => panic!("hermes: middleware_for: {err}"),
        };
        self.middleware.push(MiddlewareBinding {
            middleware: Arc::new(middleware),
            mask,
        });
        self
    }

    /// Attaches a middleware that runs for every method except the given
    /// ones.
    ///
    /// An empty method list is equivalent to [`RouteNode::middleware`];
    /// excluding all eight methods registers nothing.
    ///
    /// # Panics
    ///
    /// Panics if any method is outside the routable set.
    pub fn middleware_except_for<M: Middleware>(
        &mut self,
        middleware: M,
        methods: &[Method],
    ) -> &mut Self {
        let mask = match VerbMask::except_methods(methods) {
            Ok(mask) => mask,
            Err(err) => panic!("hermes: middleware_except_for: {err}"),
        };
        if mask.is_none() {
            return self;
        }
        self.middleware.push(MiddlewareBinding {
            middleware: Arc::new(middleware),
            mask,
        });
        self
    }

    /// Attaches a middleware that runs for every method except OPTIONS.
    pub fn middleware_except_for_options<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.middleware_except_for(middleware, &[Method::OPTIONS])
    }

    // ---- lookup ----------------------------------------------------------

    /// Walks the tree for a request, filling `execution`.
    ///
    /// `segments` is the escaped request path split on `/`; decoding of
    /// parameter values happens here, one segment at a time.
    pub(crate) fn lookup(&self, method: &Method, segments: &[&str], execution: &mut RouteExecution) {
        let request_mask = VerbMask::request_mask(method);

        let mut node = self;
        // The request segment the current node matched; the root matched
        // nothing.
        let mut current: Option<&str> = None;
        let mut remaining = segments;

        loop {
            for binding in &node.middleware {
                if binding.mask.matches(request_mask) {
                    execution.middleware.push(binding.middleware.clone());
                }
            }

            if let Some(handler) = node.handlers.not_found() {
                execution.not_found = Some(handler.clone());
            }

            // An OPTIONS handler reaches down to descendants; a more
            // specific match deeper down overwrites it.
            if *method == Method::OPTIONS {
                if let Some(handler) = node.handlers.get(&Method::OPTIONS) {
                    execution.handler = Some(handler.clone());
                }
            }

            if let NodeKind::Param(name) = &node.kind {
                let raw = current.unwrap_or_default();
                let value = match urlencoding::decode(raw) {
                    Ok(decoded) => decoded.into_owned(),
                    // Undecodable input is matched as-is; the upstream
                    // runtime is responsible for sanitizing paths.
                    Err(_) => raw.to_string(),
                };
                execution.params.push(name.clone(), value);
            }

            if remaining.is_empty() || node.kind == NodeKind::Wildcard {
                node.select_handler(method, execution);
                execution.pattern = Some(node.full_path.clone());
                return;
            }

            let next = remaining[0];
            if let Some(child) = node.find_literal(next) {
                node = child;
            } else if let Some(child) = &node.param_child {
                node = child;
            } else if let Some(child) = &node.wildcard_child {
                node = child;
            } else {
                // Fell off the tree; the not-found fallback answers.
                return;
            }
            current = Some(next);
            remaining = &remaining[1..];
        }
    }

    fn find_literal(&self, segment: &str) -> Option<&RouteNode> {
        self.literal_children
            .binary_search_by(|child| child.segment.as_str().cmp(segment))
            .ok()
            .map(|index| &self.literal_children[index])
    }

    /// Chooses the handler at the terminal node.
    ///
    /// Order of precedence:
    /// 1. an exact method match,
    /// 2. the GET handler for a HEAD request,
    /// 3. the ANY handler,
    /// 4. a previously recorded OPTIONS handler from an ancestor,
    /// 5. a synthesized 405 carrying the node's Allow set, only if the node
    ///    serves at least one real method.
    fn select_handler(&self, method: &Method, execution: &mut RouteExecution) {
        if let Some(handler) = self.handlers.get(method) {
            execution.handler = Some(handler.clone());
            return;
        }

        if *method == Method::HEAD {
            if let Some(handler) = self.handlers.get(&Method::GET) {
                execution.handler = Some(handler.clone());
                return;
            }
        }

        if let Some(handler) = self.handlers.any() {
            execution.handler = Some(handler.clone());
            return;
        }

        if execution.handler.is_none() && self.handlers.has_real_method() {
            execution.handler = Some(Arc::new(MethodNotAllowedHandler::new(
                &self.handlers.allowed_methods(),
            )));
        }
    }

    // ---- listing ---------------------------------------------------------

    /// Appends `<pattern>\t[<tokens>]` lines for this subtree, precedence
    /// order, skipping nodes with no handlers at all.
    pub(crate) fn collect_routes(&self, out: &mut Vec<String>) {
        if !self.handlers.is_empty() {
            out.push(format!(
                "{}\t[{}]",
                self.full_path,
                self.handlers.tokens().join(", ")
            ));
        }
        for child in &self.literal_children {
            child.collect_routes(out);
        }
        if let Some(child) = &self.param_child {
            child.collect_routes(out);
        }
        if let Some(child) = &self.wildcard_child {
            child.collect_routes(out);
        }
    }
}
