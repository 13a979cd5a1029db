//! In-memory test client.

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::TestResponse;
use bytes::Bytes;
use hermes_mux::Multiplexer;
use http::Method;

/// Drives a [`Multiplexer`] in memory.
///
/// Every request goes through the complete dispatch path: trailing-slash
/// redirects, host selection, tree lookup, middleware and the handler.
///
/// # Example
///
/// ```no_run
/// # use hermes_mux::Multiplexer;
/// # use hermes_test::TestClient;
/// # async fn example(mux: Multiplexer) {
/// let client = TestClient::new(mux);
///
/// let response = client.get("/users/42").send().await;
/// assert_eq!(response.status_code(), 200);
/// # }
/// ```
#[must_use]
pub struct TestClient {
    mux: Multiplexer,
}

impl TestClient {
    /// Wraps a configured multiplexer.
    pub fn new(mux: Multiplexer) -> Self {
        Self { mux }
    }

    /// Creates a GET request builder.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::get(uri))
    }

    /// Creates a HEAD request builder.
    pub fn head(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::head(uri))
    }

    /// Creates a POST request builder.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::post(uri))
    }

    /// Creates a PUT request builder.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::put(uri))
    }

    /// Creates a PATCH request builder.
    pub fn patch(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::patch(uri))
    }

    /// Creates a DELETE request builder.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::delete(uri))
    }

    /// Creates an OPTIONS request builder.
    pub fn options(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::options(uri))
    }

    /// Creates a request builder with an arbitrary method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, uri))
    }

    /// Returns the wrapped multiplexer.
    #[must_use]
    pub fn mux(&self) -> &Multiplexer {
        &self.mux
    }

    async fn send_internal(&self, request: TestRequest) -> Result<TestResponse, TestError> {
        let response = self.mux.serve(request.into_http_request()).await;
        TestResponse::from_http(response).await
    }
}

/// A request builder bound to a test client.
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl<'a> TestClientRequest<'a> {
    fn new(client: &'a TestClient, builder: TestRequestBuilder) -> Self {
        Self { client, builder }
    }

    /// Sets a header on the request.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the `Host` header.
    pub fn host(mut self, host: impl AsRef<str>) -> Self {
        self.builder = self.builder.host(host);
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request fails to build or the response body cannot be
    /// collected; tests should fail loudly.
    pub async fn send(self) -> TestResponse {
        let request = self.builder.build().expect("valid request");
        self.client
            .send_internal(request)
            .await
            .expect("request should succeed")
    }

    /// Sends the request, surfacing errors instead of panicking.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        self.client.send_internal(request).await
    }
}
