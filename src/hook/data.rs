use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::{
    error::{Error, HookError},
    hook::{
        fetch::{FetchPolicy, FetchSlot, Ticket},
        state::{HookState, LoadStatus},
    },
    service::{EntityService, Resource, SoftDeletable},
};

/// Observable, self-refreshing list of one resource.
///
/// The hook memoizes its filters, fetches through its [`EntityService`] and publishes every
/// state change on a `watch` channel. Mutations go through the service and are followed by a
/// full refetch; no local patching takes place.
///
/// Cheap to clone; clones share state.
pub struct DataHook<R: Resource> {
    inner: Arc<DataHookRef<R>>,
}

struct DataHookRef<R: Resource> {
    service: EntityService<R>,
    filters: Mutex<R::Filters>,
    state: watch::Sender<HookState<R::Record>>,
    slot: FetchSlot,
}

impl<R: Resource> Clone for DataHook<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Resource> DataHook<R> {
    /// Creates a hook with [`FetchPolicy::CancelPrevious`]. Nothing is fetched until
    /// [`refetch`](Self::refetch) or [`set_filters`](Self::set_filters) is called.
    pub fn new(service: EntityService<R>, filters: R::Filters) -> Self {
        Self::with_policy(service, filters, FetchPolicy::default())
    }

    pub fn with_policy(service: EntityService<R>, filters: R::Filters, policy: FetchPolicy) -> Self {
        let (state, _) = watch::channel(HookState::default());

        Self {
            inner: Arc::new(DataHookRef {
                service,
                filters: Mutex::new(filters),
                state,
                slot: FetchSlot::new(policy),
            }),
        }
    }

    pub fn service(&self) -> &EntityService<R> {
        &self.inner.service
    }

    pub fn policy(&self) -> FetchPolicy {
        self.inner.slot.policy()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<HookState<R::Record>> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> HookState<R::Record> {
        self.inner.state.borrow().clone()
    }

    pub fn filters(&self) -> R::Filters {
        self.inner
            .filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the filters and refetches when they changed.
    ///
    /// Filters are compared by value: passing a filter equal to the memoized one is a no-op
    /// once the hook has loaded, so callers may rebuild filter values freely.
    ///
    /// # Returns
    /// - `true` - A fetch was issued
    /// - `false` - Filters were unchanged, or the fetch was skipped by the fetch policy
    pub async fn set_filters(&self, filters: R::Filters) -> bool {
        {
            let mut current = self
                .inner
                .filters
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let loaded = self.inner.state.borrow().status != LoadStatus::Idle;
            if loaded && *current == filters {
                return false;
            }
            *current = filters;
        }

        self.fetch().await
    }

    /// Fetches with the current filters.
    ///
    /// Fetch failures are logged and stored in the state, never returned.
    ///
    /// # Returns
    /// - `true` - A fetch was issued
    /// - `false` - Skipped because another fetch is pending under
    ///   [`FetchPolicy::SkipWhileInFlight`]
    pub async fn refetch(&self) -> bool {
        self.fetch().await
    }

    /// Refetch after a mutation. It is never skipped; a pending fetch is cancelled instead,
    /// since its response predates the mutation.
    async fn refresh(&self) {
        let ticket = self.inner.slot.begin_required();
        self.load(ticket).await;
    }

    /// Abandons the pending fetch, if any.
    pub fn cancel(&self) {
        if !self.inner.slot.is_in_flight() {
            return;
        }
        self.inner.slot.cancel();
        self.inner.state.send_modify(|state| {
            if state.status == LoadStatus::Loading {
                state.status = if state.error.is_some() {
                    LoadStatus::Error
                } else if state.meta.is_some() || !state.items.is_empty() {
                    LoadStatus::Success
                } else {
                    LoadStatus::Idle
                };
            }
        });
    }

    async fn fetch(&self) -> bool {
        let Some(ticket) = self.inner.slot.begin() else {
            tracing::debug!("{} list fetch skipped, previous fetch still pending", R::NAME);
            return false;
        };

        self.load(ticket).await;
        true
    }

    async fn load(&self, ticket: Ticket) {
        let filters = self.filters();
        self.inner
            .state
            .send_modify(|state| state.status = LoadStatus::Loading);

        let result = self
            .inner
            .service
            .get_all_with(&filters, Some(&ticket.token))
            .await;

        if !self.inner.slot.is_current(&ticket) {
            tracing::debug!(
                "Discarding stale {} list response (generation {})",
                R::NAME,
                ticket.generation
            );
            return;
        }
        self.inner.slot.finish(&ticket);

        match result {
            Ok(page) => self.inner.state.send_modify(|state| {
                state.status = LoadStatus::Success;
                state.items = page.items;
                state.meta = page.meta;
                state.error = None;
            }),
            Err(e) => {
                tracing::error!("Failed to load {} list: {}", R::NAME, e);
                let error = HookError::from(&e);
                self.inner.state.send_modify(|state| {
                    state.status = LoadStatus::Error;
                    state.error = Some(error);
                });
            }
        }
    }

    /// Creates a record, then refetches the list.
    ///
    /// # Returns
    /// - `Ok(record)` - The created record
    /// - `Err(Error)` - Creation failed; the list is left as it was
    pub async fn create(&self, dto: &R::Create) -> Result<R::Record, Error> {
        let record = self.inner.service.create(dto).await?;
        self.refresh().await;
        Ok(record)
    }

    /// Updates a record, then refetches the list.
    ///
    /// A stale version surfaces as an error with [`Error::is_conflict`]; the caller decides
    /// whether to reload and retry.
    pub async fn update(&self, id: &str, dto: &R::Update) -> Result<R::Record, Error> {
        let record = self.inner.service.update(id, dto).await?;
        self.refresh().await;
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.inner.service.delete(id).await?;
        self.refresh().await;
        Ok(())
    }
}

impl<R: SoftDeletable> DataHook<R> {
    pub async fn restore(&self, id: &str) -> Result<R::Record, Error> {
        let record = self.inner.service.restore(id).await?;
        self.refresh().await;
        Ok(record)
    }
}
