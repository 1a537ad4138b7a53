mod data_hook;
mod poller;

use herdbook_test_utils::prelude::*;

use crate::{
    client::ApiClient,
    error::Error,
    service::{animal::AnimalService, reference::BreedService},
};

fn client_for(test: &TestContext) -> Result<ApiClient, Error> {
    ApiClient::builder().base_url(test.base_url()).build()
}

fn animal_service(test: &TestContext) -> Result<AnimalService, Error> {
    AnimalService::for_farm(client_for(test)?, TEST_FARM_ID)
}

fn breed_service(test: &TestContext) -> Result<BreedService, Error> {
    BreedService::global(client_for(test)?)
}
