use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::{
    client::{ApiClient, RequestOptions},
    error::Error,
    model::preference::{
        AlertPreference, BreedPreference, PreferenceRecord, ProductPreference, SpeciesPreference,
        UpdatePreferenceDto, VeterinarianPreference,
    },
    preference::{reconcile, PreferenceStore},
    service::{farm_path, path_segment, require_farm_id},
};

/// One kind of farm preference list.
pub trait PreferenceKind: Send + Sync + 'static {
    type Record: PreferenceRecord;

    /// Name used in log entries, e.g. `breed preference`
    const NAME: &'static str;
    /// Collection path segment below the farm, e.g. `breed-preferences`
    const SEGMENT: &'static str;
    /// Wire name of the referenced catalog ID, e.g. `breedId`
    const REFERENCE_KEY: &'static str;
}

macro_rules! preference_kind {
    ($kind:ident, $service:ident, $record:ty, $name:literal, $segment:literal, $key:literal) => {
        pub struct $kind;

        impl PreferenceKind for $kind {
            type Record = $record;

            const NAME: &'static str = $name;
            const SEGMENT: &'static str = $segment;
            const REFERENCE_KEY: &'static str = $key;
        }

        pub type $service = PreferenceService<$kind>;
    };
}

preference_kind!(
    BreedPreferenceKind,
    BreedPreferenceService,
    BreedPreference,
    "breed preference",
    "breed-preferences",
    "breedId"
);
preference_kind!(
    SpeciesPreferenceKind,
    SpeciesPreferenceService,
    SpeciesPreference,
    "species preference",
    "species-preferences",
    "speciesId"
);
preference_kind!(
    ProductPreferenceKind,
    ProductPreferenceService,
    ProductPreference,
    "product preference",
    "product-preferences",
    "productId"
);
preference_kind!(
    VeterinarianPreferenceKind,
    VeterinarianPreferenceService,
    VeterinarianPreference,
    "veterinarian preference",
    "veterinarian-preferences",
    "veterinarianId"
);
preference_kind!(
    AlertPreferenceKind,
    AlertPreferenceService,
    AlertPreference,
    "alert preference",
    "alert-preferences",
    "alertTemplateId"
);

/// Preference list of one farm for one preference kind.
pub struct PreferenceService<K: PreferenceKind> {
    client: ApiClient,
    farm_id: String,
    base_path: String,
    _kind: PhantomData<fn() -> K>,
}

impl<K: PreferenceKind> Clone for PreferenceService<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            farm_id: self.farm_id.clone(),
            base_path: self.base_path.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: PreferenceKind> PreferenceService<K> {
    /// Creates a new instance of [`PreferenceService`]
    ///
    /// # Returns
    /// - `Ok(PreferenceService)` - Service bound to `/api/v1/farms/{farm_id}/{segment}`
    /// - `Err(Error::MissingFarmId)` - `farm_id` is blank
    pub fn for_farm(client: ApiClient, farm_id: impl Into<String>) -> Result<Self, Error> {
        let farm_id = require_farm_id(farm_id, K::NAME)?;
        let base_path = farm_path(&farm_id, K::SEGMENT);

        Ok(Self {
            client,
            farm_id,
            base_path,
            _kind: PhantomData,
        })
    }

    pub fn farm_id(&self) -> &str {
        &self.farm_id
    }

    fn record_path(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, path_segment(id))
    }

    /// Lists the farm's preferences.
    ///
    /// # Arguments
    /// - `include_inactive` - Also return deactivated entries
    ///
    /// # Returns
    /// - `Ok(Vec)` - Preferences; empty when the endpoint answers 404
    /// - `Err(Error)` - Any other failure
    pub async fn get_all(&self, include_inactive: bool) -> Result<Vec<K::Record>, Error> {
        let mut opts = RequestOptions::new();
        if include_inactive {
            opts = opts.with_query(vec![("includeInactive".to_string(), "true".to_string())]);
        }

        tracing::debug!("Fetching {}s of farm {}", K::NAME, self.farm_id);

        match self.client.get_page::<K::Record>(&self.base_path, &opts).await {
            Ok(page) => {
                tracing::debug!(
                    "Fetched {} {}(s) for farm {}",
                    page.len(),
                    K::NAME,
                    self.farm_id
                );
                Ok(page.items)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No {}s for farm {}", K::NAME, self.farm_id);
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch {}s for farm {}: {}",
                    K::NAME,
                    self.farm_id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Adds a catalog entry to the farm's list.
    ///
    /// # Arguments
    /// - `reference_id` - ID of the catalog entry, sent under the kind's reference key
    /// - `display_order` - Position of the entry in the farm's list
    pub async fn create(&self, reference_id: &str, display_order: i32) -> Result<K::Record, Error> {
        tracing::debug!("Creating {} for {}", K::NAME, reference_id);

        let mut body = Map::new();
        body.insert(
            K::REFERENCE_KEY.to_string(),
            Value::String(reference_id.to_string()),
        );
        body.insert("displayOrder".to_string(), Value::from(display_order));

        let record: K::Record = self
            .client
            .post(&self.base_path, &body, &RequestOptions::new())
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to create {} for {}: {}", K::NAME, reference_id, e)
            })?;

        tracing::debug!(
            "Created {} {} for {} at position {}",
            K::NAME,
            record.id(),
            reference_id,
            display_order
        );

        Ok(record)
    }

    /// Changes the display order or activation of one preference.
    pub async fn update(&self, id: &str, dto: &UpdatePreferenceDto) -> Result<K::Record, Error> {
        tracing::debug!("Updating {} {}", K::NAME, id);

        let record = self
            .client
            .patch(&self.record_path(id), dto, &RequestOptions::new())
            .await
            .inspect_err(|e| tracing::error!("Failed to update {} {}: {}", K::NAME, id, e))?;

        tracing::debug!("Updated {} {}", K::NAME, id);

        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        tracing::debug!("Deleting {} {}", K::NAME, id);

        self.client
            .delete(&self.record_path(id), &RequestOptions::new())
            .await
            .inspect_err(|e| tracing::error!("Failed to delete {} {}: {}", K::NAME, id, e))?;

        tracing::debug!("Deleted {} {}", K::NAME, id);

        Ok(())
    }

    /// Converges the farm's list to exactly `desired` reference IDs.
    ///
    /// Entries no longer desired are deleted first, then missing ones are created with their
    /// position in `desired` as display order. Calls run one at a time; the first failure
    /// aborts and earlier calls are not rolled back.
    ///
    /// # Returns
    /// - `Ok(Vec)` - The kept entries followed by the created ones
    /// - `Err(Error)` - First failed call
    pub async fn save_batch(&self, desired: &[String]) -> Result<Vec<K::Record>, Error> {
        reconcile(self, desired).await
    }
}

impl<K: PreferenceKind> PreferenceStore for PreferenceService<K> {
    type Record = K::Record;

    const NAME: &'static str = K::NAME;

    async fn list_all(&self) -> Result<Vec<K::Record>, Error> {
        self.get_all(true).await
    }

    async fn remove(&self, id: &str) -> Result<(), Error> {
        self.delete(id).await
    }

    async fn add(&self, reference_id: &str, display_order: i32) -> Result<K::Record, Error> {
        self.create(reference_id, display_order).await
    }
}
