//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring the mock API before a test runs.
//! Endpoint definitions are queued and only registered on the mock server during `build()`.

use mockito::{Matcher, Mock};
use serde_json::{json, Value};

use crate::context::TestContext;

type MockSetup = Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock + Send>;

/// Builder for declarative test initialization.
///
/// Every helper registers an endpoint that expects to be hit exactly `expected_requests`
/// times; `TestContext::assert_mocks` verifies the counts at the end of the test.
pub struct TestBuilder {
    mock_builders: Vec<MockSetup>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no endpoints configured.
    pub fn new() -> Self {
        Self {
            mock_builders: Vec::new(),
        }
    }

    /// Add a list endpoint answering `{"data": [...]}`.
    ///
    /// Any query string is accepted; use `with_mock_endpoint` to match specific parameters.
    ///
    /// # Arguments
    /// - `path` - Request path, e.g. `/api/v1/breeds`
    /// - `items` - Records returned under `data`
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_list_endpoint(self, path: &str, items: Vec<Value>, expected_requests: usize) -> Self {
        self.with_json_endpoint("GET", path, 200, json!({ "data": items }), expected_requests)
    }

    /// Add a paginated list endpoint answering `{"data": [...], "meta": {...}}`.
    ///
    /// # Arguments
    /// - `path` - Request path
    /// - `items` - Records of the current page
    /// - `page` - 1-based page number reported in `meta`
    /// - `limit` - Page size reported in `meta`
    /// - `total` - Total number of records reported in `meta`
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_paginated_endpoint(
        self,
        path: &str,
        items: Vec<Value>,
        page: u32,
        limit: u32,
        total: u64,
        expected_requests: usize,
    ) -> Self {
        let body = crate::fixtures::factory::mock_paginated(items, page, limit, total);
        self.with_json_endpoint("GET", path, 200, body, expected_requests)
    }

    /// Add an endpoint answering a single record wrapped in `{"success": true, "data": ...}`.
    ///
    /// # Arguments
    /// - `method` - HTTP method, e.g. `"POST"`
    /// - `path` - Request path
    /// - `record` - Record returned under `data`
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_record_endpoint(
        self,
        method: &'static str,
        path: &str,
        record: Value,
        expected_requests: usize,
    ) -> Self {
        let status = if method == "POST" { 201 } else { 200 };
        let body = json!({ "success": true, "data": record });
        self.with_json_endpoint(method, path, status, body, expected_requests)
    }

    /// Add an endpoint failing with `status` and a NestJS-style error body.
    ///
    /// # Arguments
    /// - `method` - HTTP method
    /// - `path` - Request path
    /// - `status` - HTTP status to answer with
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_error_endpoint(
        self,
        method: &'static str,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        let body = crate::fixtures::factory::mock_error(status);
        self.with_json_endpoint(method, path, status, body, expected_requests)
    }

    /// Add an endpoint answering 204 No Content, as soft-delete endpoints do.
    pub fn with_no_content_endpoint(
        mut self,
        method: &'static str,
        path: &str,
        expected_requests: usize,
    ) -> Self {
        let path = path.to_string();
        self.mock_builders.push(Box::new(move |server| {
            server
                .mock(method, path.as_str())
                .match_query(Matcher::Any)
                .with_status(204)
                .expect(expected_requests)
                .create()
        }));
        self
    }

    /// Add an endpoint answering an arbitrary JSON body.
    pub fn with_json_endpoint(
        mut self,
        method: &'static str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        let path = path.to_string();
        self.mock_builders.push(Box::new(move |server| {
            server
                .mock(method, path.as_str())
                .match_query(Matcher::Any)
                .with_status(status)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .expect(expected_requests)
                .create()
        }));
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// Allows complete customization of mock endpoint behavior by providing direct access
    /// to the mockito ServerGuard. Use this for endpoints not covered by helper methods.
    ///
    /// # Arguments
    /// - `setup` - Closure that receives the mock server and returns a configured Mock
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + Send + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context by starting the mock server and registering every endpoint.
    ///
    /// Endpoints are registered in the order they were added, which matters when a test
    /// defines several mocks for the same path (mockito matches the first one that still
    /// accepts requests).
    pub async fn build(self) -> TestContext {
        let mut setup = TestContext::new().await;

        let mut mocks = Vec::new();
        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        setup
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
