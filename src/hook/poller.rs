use std::{future::Future, time::Duration};

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    client::ApiClient,
    error::Error,
    model::alert::AlertSummary,
    service::alert::AlertService,
};

/// Re-issues a fetch on a fixed interval and publishes the latest value.
///
/// The first fetch runs immediately. Failures are logged and swallowed; the previous value
/// stays published. Polling stops on [`stop`](Self::stop) or when the poller is dropped.
pub struct Poller<T> {
    name: &'static str,
    latest: watch::Receiver<Option<T>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the polling task on the current tokio runtime.
    ///
    /// # Arguments
    /// - `name` - Used in log entries
    /// - `interval` - Delay between fetches; must be non-zero
    /// - `fetch` - Produces one fetch per tick
    pub fn start<F, Fut>(name: &'static str, interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        let (tx, latest) = watch::channel(None);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    biased;

                    _ = task_cancel.cancelled() => break,
                    result = fetch() => result,
                };

                match result {
                    Ok(value) => {
                        tx.send_replace(Some(value));
                    }
                    Err(e) => tracing::warn!("Polling {} failed: {}", name, e),
                }
            }

            tracing::debug!("Stopped polling {}", name);
        });

        tracing::debug!("Started polling {} every {:?}", name, interval);

        Self {
            name,
            latest,
            cancel,
            handle: Some(handle),
        }
    }

    /// A poller that never fetches, for when the polled subject is absent.
    pub fn idle(name: &'static str) -> Self {
        let (_, latest) = watch::channel(None);
        let cancel = CancellationToken::new();
        cancel.cancel();

        Self {
            name,
            latest,
            cancel,
            handle: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latest successfully fetched value.
    pub fn latest(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    /// Receiver notified whenever a fetch succeeds.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.latest.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
            && !self.cancel.is_cancelled()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stops polling and waits for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!("Polling task {} ended abnormally: {}", self.name, e);
            }
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Unread count and summary of a farm's alerts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCounts {
    pub unread: u64,
    pub summary: AlertSummary,
}

pub type AlertCountsPoller = Poller<AlertCounts>;

impl Poller<AlertCounts> {
    /// Polls the unread count and summary of a farm's alerts.
    ///
    /// Without a farm the poller is idle and never issues a request.
    pub fn alert_counts(client: ApiClient, farm_id: Option<&str>, interval: Duration) -> Self {
        let Some(service) = farm_id.and_then(|farm_id| AlertService::for_farm(client, farm_id).ok())
        else {
            tracing::debug!("No farm selected, alert counts are not polled");
            return Self::idle("alert counts");
        };

        Self::start("alert counts", interval, move || {
            let service = service.clone();
            async move {
                let unread = service.unread_count().await?;
                let summary = service.summary().await?;
                Ok(AlertCounts { unread, summary })
            }
        })
    }
}
