//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context owns the
//! mock API server and every mock endpoint registered on it, so the mocks live as long as the
//! test does.

use mockito::{Mock, Server, ServerGuard};

use crate::constant::{API_PREFIX, TEST_FARM_ID};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_list_endpoint(&farm_path("animals"), vec![factory::mock_animal("a1", 1)], 1)
///     .build()
///     .await;
///
/// let client = ApiClient::builder().base_url(test.base_url()).build()?;
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Mock HTTP server standing in for the herdbook API
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Create a new test context with a fresh mock server.
    pub(crate) async fn new() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    /// URL of the mock server, to be used as the client's base URL.
    pub fn base_url(&self) -> String {
        self.server.url()
    }

    /// Access the mock server to register endpoints after `build()`.
    ///
    /// Mocks created this way are not tracked by `assert_mocks`; keep the returned `Mock`
    /// and assert it directly.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// Calls `assert()` on all mocks created by the TestBuilder to verify
    /// they were invoked the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

/// Path of a global resource, e.g. `api_path("breeds")` -> `/api/v1/breeds`.
pub fn api_path(resource: &str) -> String {
    format!("{}/{}", API_PREFIX, resource)
}

/// Path of a resource scoped to the test farm, e.g. `/api/v1/farms/farm-0001/animals`.
pub fn farm_path(resource: &str) -> String {
    format!("{}/farms/{}/{}", API_PREFIX, TEST_FARM_ID, resource)
}
