use crate::{
    model::animal::{Animal, AnimalFilters, CreateAnimalDto, UpdateAnimalDto},
    service::{EntityService, Resource, SoftDeletable},
};

/// Animals of a farm
pub struct AnimalResource;

impl Resource for AnimalResource {
    type Record = Animal;
    type Filters = AnimalFilters;
    type Create = CreateAnimalDto;
    type Update = UpdateAnimalDto;

    const NAME: &'static str = "animal";
    const SEGMENT: &'static str = "animals";
    const FARM_SCOPED: bool = true;

    fn id_of(record: &Animal) -> &str {
        &record.id
    }
}

impl SoftDeletable for AnimalResource {}

pub type AnimalService = EntityService<AnimalResource>;
