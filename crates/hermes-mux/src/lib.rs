//! # Hermes
//!
//! An HTTP request multiplexer.
//!
//! Hermes routes requests by method and path through a tree of registered
//! patterns. It supports named path parameters (`:id`), wildcard subtrees
//! (`*`), per-method handlers with catch-all and not-found fallbacks,
//! host-scoped routing and verb-filtered middleware, while keeping the
//! lookup path free of per-request locking and almost free of allocation.
//!
//! The server loop is not Hermes's business: hand
//! [`Multiplexer::serve`] a request from whatever HTTP runtime hosts you
//! and send back the response it returns.
//!
//! ## Quick start
//!
//! ```
//! use hermes_mux::{path_param, Multiplexer};
//! use hermes_core::{Request, Response, ResponseExt};
//! use http::StatusCode;
//!
//! let mut mux = Multiplexer::new();
//!
//! mux.route("/users/:id").get(|req: Request| async move {
//!     let id = path_param(&req, "id").unwrap_or_default().to_string();
//!     Response::text(StatusCode::OK, &id)
//! });
//!
//! mux.route("/static/*").get(|_req: Request| async {
//!     Response::text(StatusCode::OK, "a file")
//! });
//! ```
//!
//! ## Matching rules
//!
//! - At every level, literal segments beat parameters, and parameters beat
//!   wildcards, regardless of registration order.
//! - A request path with a trailing `/` (other than `/` itself) is
//!   answered with a 308 redirect to the stripped path.
//! - HEAD requests fall back to the GET handler; OPTIONS requests can be
//!   answered by an ancestor's OPTIONS handler.
//! - A route that serves other methods answers a mismatched method with a
//!   synthesized 405 carrying an `Allow` header.

#![doc(html_root_url = "https://docs.rs/hermes-mux/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod mux;
mod params;

pub use mux::Multiplexer;
pub use params::{matched_pattern, path_param, path_params, MatchedPattern};

// The full vocabulary, re-exported so most callers depend on this crate
// alone.
pub use hermes_core::{
    BoxFuture, Handler, MethodNotAllowedHandler, NotFoundHandler, RedirectHandler, Request,
    Response, ResponseExt,
};
pub use hermes_middleware::{FnMiddleware, Middleware, Next, UnknownVerbError, VerbMask};
pub use hermes_router::{PathParams, PatternError, RouteNode, RouteTree};
