//! # Hermes Test
//!
//! In-memory testing for Hermes multiplexers, without sockets or port
//! binding.
//!
//! The [`TestClient`] wraps a configured [`Multiplexer`](hermes_mux::Multiplexer)
//! and drives [`serve`](hermes_mux::Multiplexer::serve) directly, so every
//! request goes through the full routing, middleware and dispatch path.
//!
//! ## Example
//!
//! ```
//! use hermes_mux::Multiplexer;
//! use hermes_core::{Request, Response, ResponseExt};
//! use hermes_test::TestClient;
//! use http::StatusCode;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut mux = Multiplexer::new();
//! mux.route("/ping").get(|_req: Request| async {
//!     Response::text(StatusCode::OK, "pong")
//! });
//!
//! let client = TestClient::new(mux);
//! let response = client.get("/ping").send().await;
//!
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.text().unwrap(), "pong");
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
