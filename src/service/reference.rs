//! Global reference catalog: breeds, species, products, veterinarians and alert templates.
//!
//! Catalog entries are administratively managed. They carry a `version` for optimistic
//! locking and are soft-deleted, so every one of them supports `restore`.

use crate::{
    model::reference::{
        AlertTemplate, AlertTemplateFilters, Breed, BreedFilters, CreateAlertTemplateDto,
        CreateBreedDto, CreateProductDto, CreateSpeciesDto, CreateVeterinarianDto, Product,
        ReferenceFilters, Species, UpdateReferenceDto, Veterinarian,
    },
    service::{EntityService, Resource, SoftDeletable},
};

macro_rules! reference_resource {
    ($(#[$doc:meta])* $resource:ident, $service:ident, $record:ty, $filters:ty, $create:ty, $name:literal, $segment:literal) => {
        $(#[$doc])*
        pub struct $resource;

        impl Resource for $resource {
            type Record = $record;
            type Filters = $filters;
            type Create = $create;
            type Update = UpdateReferenceDto;

            const NAME: &'static str = $name;
            const SEGMENT: &'static str = $segment;
            const FARM_SCOPED: bool = false;

            fn id_of(record: &$record) -> &str {
                &record.id
            }
        }

        impl SoftDeletable for $resource {}

        pub type $service = EntityService<$resource>;
    };
}

reference_resource!(
    BreedResource,
    BreedService,
    Breed,
    BreedFilters,
    CreateBreedDto,
    "breed",
    "breeds"
);
reference_resource!(
    SpeciesResource,
    SpeciesService,
    Species,
    ReferenceFilters,
    CreateSpeciesDto,
    "species",
    "species"
);
reference_resource!(
    /// Veterinary products: medicines, vaccines, supplements
    ProductResource,
    ProductService,
    Product,
    ReferenceFilters,
    CreateProductDto,
    "product",
    "products"
);
reference_resource!(
    VeterinarianResource,
    VeterinarianService,
    Veterinarian,
    ReferenceFilters,
    CreateVeterinarianDto,
    "veterinarian",
    "veterinarians"
);
reference_resource!(
    /// Templates farm alerts are generated from
    AlertTemplateResource,
    AlertTemplateService,
    AlertTemplate,
    AlertTemplateFilters,
    CreateAlertTemplateDto,
    "alert template",
    "alert-templates"
);
