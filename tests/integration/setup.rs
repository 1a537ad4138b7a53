use herdbook::{ApiClient, Error};
use herdbook_test_utils::TestContext;

/// Client pointed at the test's mock API
pub fn client_for(test: &TestContext) -> Result<ApiClient, Error> {
    ApiClient::builder().base_url(test.base_url()).build()
}
