mod create;
mod delete;
mod get_all;
mod get_by_id;
mod restore;
mod update;

use super::*;

use crate::service::{animal::AnimalService, reference::BreedService};

fn animal_service(test: &TestContext) -> Result<AnimalService, Error> {
    AnimalService::for_farm(client_for(test)?, TEST_FARM_ID)
}

fn breed_service(test: &TestContext) -> Result<BreedService, Error> {
    BreedService::global(client_for(test)?)
}
