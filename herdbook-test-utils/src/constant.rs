//! Test constants shared by fixtures and tests.

/// Farm ID used for every farm-scoped fixture and endpoint.
pub static TEST_FARM_ID: &str = "farm-0001";

/// Timestamp used for `createdAt`/`updatedAt` of every fixture.
pub static TEST_TIMESTAMP: &str = "2025-03-01T08:00:00Z";

/// Base path of the versioned API.
pub static API_PREFIX: &str = "/api/v1";
