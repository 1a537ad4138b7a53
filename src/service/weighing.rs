use crate::{
    client::RequestOptions,
    error::Error,
    model::weighing::{CreateWeighingDto, UpdateWeighingDto, Weighing, WeighingFilters},
    service::{farm_path, path_segment, EntityService, Resource},
};

/// Weight measurements. Weighings are corrected or deleted outright, never restored.
pub struct WeighingResource;

impl Resource for WeighingResource {
    type Record = Weighing;
    type Filters = WeighingFilters;
    type Create = CreateWeighingDto;
    type Update = UpdateWeighingDto;

    const NAME: &'static str = "weighing";
    const SEGMENT: &'static str = "weighings";
    const FARM_SCOPED: bool = true;

    fn id_of(record: &Weighing) -> &str {
        &record.id
    }
}

pub type WeighingService = EntityService<WeighingResource>;

impl EntityService<WeighingResource> {
    /// Fetches the weighing history of one animal, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Weighing>)` - History; empty when the animal has none or the API answers 404
    /// - `Err(Error)` - Any other failure
    pub async fn animal_history(&self, animal_id: &str) -> Result<Vec<Weighing>, Error> {
        let Some(farm_id) = self.scope().farm_id() else {
            return Err(Error::MissingFarmId(WeighingResource::NAME));
        };
        let path = format!(
            "{}/{}/weighings",
            farm_path(farm_id, "animals"),
            path_segment(animal_id)
        );

        tracing::debug!("Fetching weighing history of animal {}", animal_id);

        match self
            .client()
            .get_page::<Weighing>(&path, &RequestOptions::new())
            .await
        {
            Ok(page) => {
                let mut history = page.items;
                history.sort_by_key(|weighing| weighing.weighing_date);
                tracing::debug!(
                    "Fetched {} weighing(s) for animal {}",
                    history.len(),
                    animal_id
                );
                Ok(history)
            }
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => {
                tracing::error!("Failed to fetch weighings of animal {}: {}", animal_id, e);
                Err(e)
            }
        }
    }
}
