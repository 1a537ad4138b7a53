use crate::{
    model::treatment::{CreateTreatmentDto, Treatment, TreatmentFilters, UpdateTreatmentDto},
    service::{EntityService, Resource, SoftDeletable},
};

pub struct TreatmentResource;

impl Resource for TreatmentResource {
    type Record = Treatment;
    type Filters = TreatmentFilters;
    type Create = CreateTreatmentDto;
    type Update = UpdateTreatmentDto;

    const NAME: &'static str = "treatment";
    const SEGMENT: &'static str = "treatments";
    const FARM_SCOPED: bool = true;

    fn id_of(record: &Treatment) -> &str {
        &record.id
    }
}

impl SoftDeletable for TreatmentResource {}

pub type TreatmentService = EntityService<TreatmentResource>;
