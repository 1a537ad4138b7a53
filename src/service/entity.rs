use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::{
    client::{query::query_pairs, ApiClient, RequestOptions},
    error::Error,
    model::api::Page,
    service::{farm_path, path_segment, Scope, API_PREFIX},
};

/// Describes one REST resource: its wire types and where it lives.
pub trait Resource: Send + Sync + 'static {
    type Record: DeserializeOwned + Clone + Send + Sync + 'static;
    type Filters: Serialize + Clone + Default + PartialEq + Send + Sync + 'static;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// Singular name used in log entries, e.g. `animal`
    const NAME: &'static str;
    /// Collection path segment, e.g. `animals`
    const SEGMENT: &'static str;
    /// Farm-scoped resources live under `/farms/{farmId}`
    const FARM_SCOPED: bool;

    fn id_of(record: &Self::Record) -> &str;
}

/// Resources the server soft-deletes and can restore.
pub trait SoftDeletable: Resource {}

/// Builds the collection path of `R` for the given scope.
///
/// # Returns
/// - `Ok(String)` - e.g. `/api/v1/breeds` or `/api/v1/farms/farm-1/animals`
/// - `Err(Error::MissingFarmId)` - `R` is farm-scoped but the scope carries no farm
pub fn collection_path<R: Resource>(scope: &Scope) -> Result<String, Error> {
    if !R::FARM_SCOPED {
        return Ok(format!("{}/{}", API_PREFIX, R::SEGMENT));
    }

    match scope.farm_id() {
        Some(farm_id) => Ok(farm_path(farm_id, R::SEGMENT)),
        None => Err(Error::MissingFarmId(R::NAME)),
    }
}

/// CRUD operations of one resource.
///
/// Reads normalize 404 into "nothing there"; every other failure, including 409 version
/// conflicts on update, propagates unchanged.
pub struct EntityService<R: Resource> {
    client: ApiClient,
    scope: Scope,
    base_path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for EntityService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            scope: self.scope.clone(),
            base_path: self.base_path.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> EntityService<R> {
    /// Creates a new instance of [`EntityService`]
    ///
    /// # Arguments
    /// - `client` - Shared API client
    /// - `scope` - Farm the service acts for; ignored by global resources
    ///
    /// # Returns
    /// - `Ok(EntityService)` - Service bound to the resource's collection path
    /// - `Err(Error::MissingFarmId)` - Farm-scoped resource without a farm in `scope`
    pub fn new(client: ApiClient, scope: Scope) -> Result<Self, Error> {
        let base_path = collection_path::<R>(&scope)?;

        Ok(Self {
            client,
            scope,
            base_path,
            _resource: PhantomData,
        })
    }

    pub fn for_farm(client: ApiClient, farm_id: impl Into<String>) -> Result<Self, Error> {
        Self::new(client, Scope::farm(farm_id))
    }

    pub fn global(client: ApiClient) -> Result<Self, Error> {
        Self::new(client, Scope::Global)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn record_path(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, path_segment(id))
    }

    /// Lists records matching `filters`.
    ///
    /// # Returns
    /// - `Ok(Page)` - Matching records; an empty page when the endpoint answers 404
    /// - `Err(Error)` - Any other failure
    pub async fn get_all(&self, filters: &R::Filters) -> Result<Page<R::Record>, Error> {
        self.get_all_with(filters, None).await
    }

    /// Lists records matching `filters`, abandoning the request once `cancel` fires.
    ///
    /// # Arguments
    /// - `filters` - Only defined, non-empty fields are sent as query parameters
    /// - `cancel` - Optional token; cancelling it resolves the call with `Error::Cancelled`
    ///
    /// # Returns
    /// - `Ok(Page)` - Matching records; an empty page when the endpoint answers 404
    /// - `Err(Error::Cancelled)` - The token fired first
    /// - `Err(Error)` - Any other failure
    pub async fn get_all_with(
        &self,
        filters: &R::Filters,
        cancel: Option<&CancellationToken>,
    ) -> Result<Page<R::Record>, Error> {
        let mut opts = RequestOptions::new().with_query(query_pairs(filters)?);
        if let Some(token) = cancel {
            opts = opts.with_cancel(token.clone());
        }

        tracing::debug!("Fetching {} list from {}", R::NAME, self.base_path);

        match self.client.get_page(&self.base_path, &opts).await {
            Ok(page) => {
                tracing::debug!("Fetched {} {} record(s)", page.len(), R::NAME);
                Ok(page)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No {} list at {}, treating as empty", R::NAME, self.base_path);
                Ok(Page::empty())
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(e) => {
                tracing::error!("Failed to fetch {} list: {}", R::NAME, e);
                Err(e)
            }
        }
    }

    /// Fetches one record.
    ///
    /// # Returns
    /// - `Ok(Some(record))` - Record found
    /// - `Ok(None)` - The API answered 404
    /// - `Err(Error)` - Any other failure
    pub async fn get_by_id(&self, id: &str) -> Result<Option<R::Record>, Error> {
        self.get_by_id_with(id, None).await
    }

    pub async fn get_by_id_with(
        &self,
        id: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<R::Record>, Error> {
        let mut opts = RequestOptions::new();
        if let Some(token) = cancel {
            opts = opts.with_cancel(token.clone());
        }

        tracing::debug!("Fetching {} {}", R::NAME, id);

        match self.client.get(&self.record_path(id), &opts).await {
            Ok(record) => {
                tracing::debug!("Fetched {} {}", R::NAME, id);
                Ok(Some(record))
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} {} not found", R::NAME, id);
                Ok(None)
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(e) => {
                tracing::error!("Failed to fetch {} {}: {}", R::NAME, id, e);
                Err(e)
            }
        }
    }

    /// Creates a record; the server assigns its ID and initial version.
    pub async fn create(&self, dto: &R::Create) -> Result<R::Record, Error> {
        tracing::debug!("Creating {} at {}", R::NAME, self.base_path);

        let record: R::Record = self
            .client
            .post(&self.base_path, dto, &RequestOptions::new())
            .await
            .inspect_err(|e| tracing::error!("Failed to create {}: {}", R::NAME, e))?;

        tracing::info!("Created {} {}", R::NAME, R::id_of(&record));

        Ok(record)
    }

    /// Updates a record.
    ///
    /// # Returns
    /// - `Ok(record)` - The updated record, carrying its new version
    /// - `Err(Error::ApiError)` with status 409 - The `version` in `dto` is stale; check with
    ///   [`Error::is_conflict`]
    /// - `Err(Error)` - Any other failure
    pub async fn update(&self, id: &str, dto: &R::Update) -> Result<R::Record, Error> {
        tracing::debug!("Updating {} {}", R::NAME, id);

        match self
            .client
            .patch(&self.record_path(id), dto, &RequestOptions::new())
            .await
        {
            Ok(record) => {
                tracing::info!("Updated {} {}", R::NAME, id);
                Ok(record)
            }
            Err(e) if e.is_conflict() => {
                tracing::warn!("Version conflict updating {} {}: {}", R::NAME, id, e);
                Err(e)
            }
            Err(e) => {
                tracing::error!("Failed to update {} {}: {}", R::NAME, id, e);
                Err(e)
            }
        }
    }

    /// Deletes a record. Soft-deletable resources can be brought back with `restore`.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        tracing::debug!("Deleting {} {}", R::NAME, id);

        self.client
            .delete(&self.record_path(id), &RequestOptions::new())
            .await
            .inspect_err(|e| tracing::error!("Failed to delete {} {}: {}", R::NAME, id, e))?;

        tracing::info!("Deleted {} {}", R::NAME, id);

        Ok(())
    }
}

impl<R: SoftDeletable> EntityService<R> {
    /// Restores a soft-deleted record.
    ///
    /// # Returns
    /// - `Ok(record)` - The restored record with `deleted_at` cleared
    /// - `Err(Error)` - e.g. 404 when the record never existed
    pub async fn restore(&self, id: &str) -> Result<R::Record, Error> {
        tracing::debug!("Restoring {} {}", R::NAME, id);

        let record = self
            .client
            .post(
                &format!("{}/restore", self.record_path(id)),
                &json!({}),
                &RequestOptions::new(),
            )
            .await
            .inspect_err(|e| tracing::error!("Failed to restore {} {}: {}", R::NAME, id, e))?;

        tracing::info!("Restored {} {}", R::NAME, id);

        Ok(record)
    }
}
