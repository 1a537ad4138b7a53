use crate::{
    client::{ApiClient, RequestOptions},
    error::Error,
    model::farm_preferences::{FarmPreferences, UpdateFarmPreferencesDto},
    service::{farm_path, require_farm_id},
};

/// Farm-wide settings such as weight unit, currency and reminder lead times.
#[derive(Clone)]
pub struct FarmPreferencesService {
    client: ApiClient,
    farm_id: String,
    path: String,
}

impl FarmPreferencesService {
    pub fn for_farm(client: ApiClient, farm_id: impl Into<String>) -> Result<Self, Error> {
        let farm_id = require_farm_id(farm_id, "farm preferences")?;
        let path = farm_path(&farm_id, "preferences");

        Ok(Self {
            client,
            farm_id,
            path,
        })
    }

    /// Fetches the farm's settings.
    ///
    /// # Returns
    /// - `Ok(Some(FarmPreferences))` - Settings exist
    /// - `Ok(None)` - The farm has no settings yet (404)
    /// - `Err(Error)` - Any other failure
    pub async fn get(&self) -> Result<Option<FarmPreferences>, Error> {
        tracing::debug!("Fetching preferences of farm {}", self.farm_id);

        match self.client.get(&self.path, &RequestOptions::new()).await {
            Ok(preferences) => {
                tracing::debug!("Fetched preferences of farm {}", self.farm_id);
                Ok(Some(preferences))
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("Farm {} has no preferences yet", self.farm_id);
                Ok(None)
            }
            Err(e) => {
                tracing::error!("Failed to fetch preferences of farm {}: {}", self.farm_id, e);
                Err(e)
            }
        }
    }

    /// Updates the farm's settings.
    ///
    /// # Returns
    /// - `Ok(FarmPreferences)` - Updated settings with the new version
    /// - `Err(Error)` - 409 when `dto.version` is stale, or any other failure
    pub async fn update(&self, dto: &UpdateFarmPreferencesDto) -> Result<FarmPreferences, Error> {
        tracing::debug!("Updating preferences of farm {}", self.farm_id);

        match self.client.patch(&self.path, dto, &RequestOptions::new()).await {
            Ok(preferences) => {
                tracing::info!("Updated preferences of farm {}", self.farm_id);
                Ok(preferences)
            }
            Err(e) if e.is_conflict() => {
                tracing::warn!(
                    "Version conflict updating preferences of farm {}: {}",
                    self.farm_id,
                    e
                );
                Err(e)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to update preferences of farm {}: {}",
                    self.farm_id,
                    e
                );
                Err(e)
            }
        }
    }
}
