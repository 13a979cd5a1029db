//! # Hermes Middleware
//!
//! Middleware trait, chain composition and verb filtering for the Hermes
//! multiplexer.
//!
//! Middleware wraps the dispatch of a request. Each middleware receives the
//! request and a [`Next`] continuation; calling `next.run(request)` hands the
//! request to the rest of the chain and eventually the terminal handler.
//! Not calling it short-circuits the chain with the middleware's own
//! response.
//!
//! Bindings can be limited to a subset of HTTP methods with a [`VerbMask`],
//! so a body parser can skip `OPTIONS` preflights or an auth check can apply
//! to writes only. Masks are plain bitsets over the eight routable methods;
//! complement handles the "except for" form.
//!
//! ```
//! use hermes_middleware::VerbMask;
//! use http::Method;
//!
//! let writes = VerbMask::for_methods(&[Method::POST, Method::PUT]).unwrap();
//! assert!(writes.matches(VerbMask::request_mask(&Method::POST)));
//! assert!(!writes.matches(VerbMask::request_mask(&Method::GET)));
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod middleware;
mod verbs;

pub use middleware::{FnMiddleware, Middleware, Next};
pub use verbs::{UnknownVerbError, VerbMask};
