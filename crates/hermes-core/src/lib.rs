//! # Hermes Core
//!
//! Core types and traits shared by the Hermes multiplexer crates.
//!
//! This crate provides the foundational vocabulary used throughout Hermes:
//!
//! - [`Request`] / [`Response`] - the body-typed `http` aliases every handler sees
//! - [`Handler`] - the async request handler trait
//! - [`BoxFuture`] - the boxed future type handlers and middleware return
//! - [`ResponseExt`] - small helpers for building plain responses
//! - Built-in handlers: [`NotFoundHandler`], [`RedirectHandler`],
//!   [`MethodNotAllowedHandler`]
//!
//! Handlers are deliberately untyped: they receive the full request and
//! return a full response. Extraction, serialization and validation are the
//! caller's business, not the multiplexer's.

#![doc(html_root_url = "https://docs.rs/hermes-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod handler;
mod handlers;
mod types;

pub use handler::{BoxFuture, Handler};
pub use handlers::{MethodNotAllowedHandler, NotFoundHandler, RedirectHandler};
pub use types::{Request, Response, ResponseExt};
