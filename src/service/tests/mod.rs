mod entity;

use herdbook_test_utils::prelude::*;

use crate::{client::ApiClient, error::Error};

fn client_for(test: &TestContext) -> Result<ApiClient, Error> {
    ApiClient::builder().base_url(test.base_url()).build()
}
