use crate::{
    model::vaccination::{
        CreateVaccinationDto, UpdateVaccinationDto, Vaccination, VaccinationFilters,
    },
    service::{EntityService, Resource, SoftDeletable},
};

/// Vaccinations given to a single animal or a whole lot
pub struct VaccinationResource;

impl Resource for VaccinationResource {
    type Record = Vaccination;
    type Filters = VaccinationFilters;
    type Create = CreateVaccinationDto;
    type Update = UpdateVaccinationDto;

    const NAME: &'static str = "vaccination";
    const SEGMENT: &'static str = "vaccinations";
    const FARM_SCOPED: bool = true;

    fn id_of(record: &Vaccination) -> &str {
        &record.id
    }
}

impl SoftDeletable for VaccinationResource {}

pub type VaccinationService = EntityService<VaccinationResource>;
