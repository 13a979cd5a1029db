//! # Hermes Router
//!
//! The routing tree at the heart of the Hermes multiplexer.
//!
//! Routes are stored in a tree keyed by path segment. Each [`RouteNode`]
//! matches one segment and carries a per-method handler table, an ordered
//! list of verb-filtered middleware bindings and three kinds of children:
//!
//! - **literal** children, matched by exact text (kept sorted for binary
//!   search),
//! - at most one **parameter** child (`:name`), matching any single segment
//!   and binding its percent-decoded value,
//! - at most one **wildcard** child (`*`), matching the whole remaining
//!   path. Wildcards are leaves.
//!
//! Precedence at every level is literal over parameter over wildcard,
//! independent of registration order, and lookup never backtracks: once a
//! level commits to a child the decision is final.
//!
//! ```text
//!                  (root)
//!                    │
//!            ┌───────┴────────┐
//!          "users"         "static"
//!            │                 │
//!      ┌─────┴─────┐          "*"
//!    "jim"       ":id"
//!      │           │
//!   "info"      "info"
//! ```
//!
//! A lookup walks the tree once, filling a pooled [`RouteExecution`] with
//! the selected handler, the middleware gathered root to leaf, the decoded
//! path parameters and the canonical matched pattern.
//!
//! # Example
//!
//! ```
//! use hermes_router::RouteTree;
//! use hermes_core::{Request, Response, ResponseExt};
//! use http::{Method, StatusCode};
//!
//! let mut tree = RouteTree::new();
//! tree.route("/users/:id")
//!     .get(|_req: Request| async { Response::text(StatusCode::OK, "user") });
//!
//! let mut execution = hermes_router::RouteExecution::default();
//! tree.lookup(&Method::GET, "/users/42", &mut execution);
//!
//! assert!(execution.handler.is_some());
//! assert_eq!(execution.pattern.as_deref(), Some("/users/:id"));
//! assert_eq!(execution.params.get("id"), Some("42"));
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod execution;
mod methods;
mod node;
mod params;
mod segment;
mod tree;

pub use execution::{ExecutionPool, RouteExecution};
pub use methods::MethodHandlers;
pub use node::RouteNode;
pub use params::PathParams;
pub use segment::{normalize, PatternError, Segment};
pub use tree::RouteTree;
