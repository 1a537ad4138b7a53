use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::{
    client::{query::query_pairs, ApiClient, RequestOptions},
    error::Error,
    model::{
        alert::{AlertFilters, AlertSummary, FarmAlert, MarkedCount, UnreadCount},
        api::Page,
    },
    service::{farm_path, path_segment, require_farm_id},
};

/// Alerts raised for a farm.
///
/// Alerts are generated server-side from alert templates; clients only read them and mark
/// them as read.
#[derive(Clone)]
pub struct AlertService {
    client: ApiClient,
    farm_id: String,
    base_path: String,
}

impl AlertService {
    /// Creates a new instance of [`AlertService`]
    ///
    /// # Returns
    /// - `Ok(AlertService)` - Service bound to `/api/v1/farms/{farm_id}/alerts`
    /// - `Err(Error::MissingFarmId)` - `farm_id` is blank
    pub fn for_farm(client: ApiClient, farm_id: impl Into<String>) -> Result<Self, Error> {
        let farm_id = require_farm_id(farm_id, "alert")?;
        let base_path = farm_path(&farm_id, "alerts");

        Ok(Self {
            client,
            farm_id,
            base_path,
        })
    }

    pub fn farm_id(&self) -> &str {
        &self.farm_id
    }

    pub async fn get_all(&self, filters: &AlertFilters) -> Result<Page<FarmAlert>, Error> {
        self.get_all_with(filters, None).await
    }

    /// Lists alerts matching `filters`.
    ///
    /// # Returns
    /// - `Ok(Page)` - Matching alerts; an empty page when the endpoint answers 404
    /// - `Err(Error)` - Any other failure, including `Error::Cancelled`
    pub async fn get_all_with(
        &self,
        filters: &AlertFilters,
        cancel: Option<&CancellationToken>,
    ) -> Result<Page<FarmAlert>, Error> {
        let mut opts = RequestOptions::new().with_query(query_pairs(filters)?);
        if let Some(token) = cancel {
            opts = opts.with_cancel(token.clone());
        }

        tracing::debug!("Fetching alerts of farm {}", self.farm_id);

        match self.client.get_page(&self.base_path, &opts).await {
            Ok(page) => {
                tracing::debug!("Fetched {} alert(s) for farm {}", page.len(), self.farm_id);
                Ok(page)
            }
            Err(e) if e.is_not_found() => Ok(Page::empty()),
            Err(e) => {
                tracing::error!("Failed to fetch alerts for farm {}: {}", self.farm_id, e);
                Err(e)
            }
        }
    }

    /// Number of unread alerts; zero when the endpoint answers 404.
    pub async fn unread_count(&self) -> Result<u64, Error> {
        self.unread_count_with(None).await
    }

    pub async fn unread_count_with(&self, cancel: Option<&CancellationToken>) -> Result<u64, Error> {
        let opts = options(cancel);

        tracing::debug!("Fetching unread alert count of farm {}", self.farm_id);

        match self
            .client
            .get::<UnreadCount>(&format!("{}/unread-count", self.base_path), &opts)
            .await
        {
            Ok(unread) => {
                tracing::debug!("Farm {} has {} unread alert(s)", self.farm_id, unread.count);
                Ok(unread.count)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No unread count for farm {}, treating as zero", self.farm_id);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch unread alert count of farm {}: {}",
                    self.farm_id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Alert totals by priority and category; an empty summary when the endpoint answers 404.
    pub async fn summary(&self) -> Result<AlertSummary, Error> {
        self.summary_with(None).await
    }

    pub async fn summary_with(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<AlertSummary, Error> {
        let opts = options(cancel);

        tracing::debug!("Fetching alert summary of farm {}", self.farm_id);

        match self
            .client
            .get::<AlertSummary>(&format!("{}/summary", self.base_path), &opts)
            .await
        {
            Ok(summary) => {
                tracing::debug!(
                    "Fetched alert summary of farm {}: {} total",
                    self.farm_id,
                    summary.total
                );
                Ok(summary)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No alert summary for farm {}, treating as empty", self.farm_id);
                Ok(AlertSummary::default())
            }
            Err(e) => {
                tracing::error!("Failed to fetch alert summary of farm {}: {}", self.farm_id, e);
                Err(e)
            }
        }
    }

    /// Marks one alert as read.
    ///
    /// # Returns
    /// - `Ok(FarmAlert)` - The alert with `is_read` set and `read_at` filled in
    /// - `Err(Error)` - e.g. 404 for an unknown alert
    pub async fn mark_as_read(&self, alert_id: &str) -> Result<FarmAlert, Error> {
        tracing::debug!("Marking alert {} as read", alert_id);

        let alert = self
            .client
            .patch(
                &format!("{}/{}/read", self.base_path, path_segment(alert_id)),
                &json!({}),
                &RequestOptions::new(),
            )
            .await
            .inspect_err(|e| tracing::error!("Failed to mark alert {} as read: {}", alert_id, e))?;

        tracing::debug!("Marked alert {} as read", alert_id);

        Ok(alert)
    }

    /// Marks every alert of the farm as read and returns how many changed.
    pub async fn mark_all_as_read(&self) -> Result<u64, Error> {
        tracing::debug!("Marking every alert of farm {} as read", self.farm_id);

        let marked: MarkedCount = self
            .client
            .patch(
                &format!("{}/read-all", self.base_path),
                &json!({}),
                &RequestOptions::new(),
            )
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to mark alerts of farm {} as read: {}",
                    self.farm_id,
                    e
                )
            })?;

        tracing::info!(
            "Marked {} alert(s) of farm {} as read",
            marked.updated,
            self.farm_id
        );

        Ok(marked.updated)
    }
}

fn options(cancel: Option<&CancellationToken>) -> RequestOptions {
    match cancel {
        Some(token) => RequestOptions::new().with_cancel(token.clone()),
        None => RequestOptions::new(),
    }
}
