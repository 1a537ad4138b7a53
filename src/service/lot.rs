use crate::{
    client::RequestOptions,
    error::Error,
    model::lot::{CreateLotDto, Lot, LotAnimalsDto, LotFilters, UpdateLotDto},
    service::{EntityService, Resource, SoftDeletable},
};

/// Groups of animals managed together (pens, pastures, batches)
pub struct LotResource;

impl Resource for LotResource {
    type Record = Lot;
    type Filters = LotFilters;
    type Create = CreateLotDto;
    type Update = UpdateLotDto;

    const NAME: &'static str = "lot";
    const SEGMENT: &'static str = "lots";
    const FARM_SCOPED: bool = true;

    fn id_of(record: &Lot) -> &str {
        &record.id
    }
}

impl SoftDeletable for LotResource {}

pub type LotService = EntityService<LotResource>;

impl EntityService<LotResource> {
    /// Moves animals into a lot.
    ///
    /// # Arguments
    /// - `lot_id` - Target lot
    /// - `animal_ids` - Animals to add; animals already in the lot are left as they are
    ///
    /// # Returns
    /// - `Ok(Lot)` - The lot with its updated animal count
    /// - `Err(Error)` - e.g. 404 for an unknown lot
    pub async fn add_animals(&self, lot_id: &str, animal_ids: &[String]) -> Result<Lot, Error> {
        tracing::debug!("Adding {} animal(s) to lot {}", animal_ids.len(), lot_id);

        let dto = LotAnimalsDto {
            animal_ids: animal_ids.to_vec(),
        };

        let lot: Lot = self
            .client()
            .post(
                &format!("{}/animals", self.record_path(lot_id)),
                &dto,
                &RequestOptions::new(),
            )
            .await
            .inspect_err(|e| tracing::error!("Failed to add animals to lot {}: {}", lot_id, e))?;

        tracing::info!("Added {} animal(s) to lot {}", animal_ids.len(), lot_id);

        Ok(lot)
    }

    /// Takes animals out of a lot.
    pub async fn remove_animals(&self, lot_id: &str, animal_ids: &[String]) -> Result<Lot, Error> {
        tracing::debug!("Removing {} animal(s) from lot {}", animal_ids.len(), lot_id);

        let dto = LotAnimalsDto {
            animal_ids: animal_ids.to_vec(),
        };

        let lot: Lot = self
            .client()
            .post(
                &format!("{}/animals/remove", self.record_path(lot_id)),
                &dto,
                &RequestOptions::new(),
            )
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to remove animals from lot {}: {}", lot_id, e)
            })?;

        tracing::info!("Removed {} animal(s) from lot {}", animal_ids.len(), lot_id);

        Ok(lot)
    }
}
