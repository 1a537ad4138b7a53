use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::{
    error::{Error, HookError},
    hook::{
        fetch::{FetchPolicy, FetchSlot},
        state::{LoadStatus, RecordState},
    },
    service::{EntityService, Resource, SoftDeletable},
};

/// Observable state of a single record, e.g. the animal shown on a detail view.
pub struct RecordHook<R: Resource> {
    inner: Arc<RecordHookRef<R>>,
}

struct RecordHookRef<R: Resource> {
    service: EntityService<R>,
    id: Mutex<Option<String>>,
    state: watch::Sender<RecordState<R::Record>>,
    slot: FetchSlot,
}

impl<R: Resource> Clone for RecordHook<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Resource> RecordHook<R> {
    pub fn new(service: EntityService<R>) -> Self {
        let (state, _) = watch::channel(RecordState::default());

        Self {
            inner: Arc::new(RecordHookRef {
                service,
                id: Mutex::new(None),
                state,
                slot: FetchSlot::new(FetchPolicy::CancelPrevious),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RecordState<R::Record>> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> RecordState<R::Record> {
        self.inner.state.borrow().clone()
    }

    /// ID of the record the hook currently tracks.
    pub fn id(&self) -> Option<String> {
        self.inner
            .id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switches to the record `id` and loads it.
    ///
    /// A 404 is not an error: the state ends in `Success` with no record. Other failures are
    /// logged and stored; the previously shown record is kept.
    pub async fn load(&self, id: &str) {
        let switched = {
            let mut current = self.inner.id.lock().unwrap_or_else(PoisonError::into_inner);
            let switched = current.as_deref() != Some(id);
            *current = Some(id.to_string());
            switched
        };
        if switched {
            self.inner.state.send_modify(|state| state.record = None);
        }

        self.fetch(id).await;
    }

    /// Reloads the tracked record; does nothing before the first [`load`](Self::load).
    pub async fn reload(&self) {
        if let Some(id) = self.id() {
            self.fetch(&id).await;
        }
    }

    async fn fetch(&self, id: &str) {
        let Some(ticket) = self.inner.slot.begin() else {
            return;
        };

        self.inner
            .state
            .send_modify(|state| state.status = LoadStatus::Loading);

        let result = self
            .inner
            .service
            .get_by_id_with(id, Some(&ticket.token))
            .await;

        if !self.inner.slot.is_current(&ticket) {
            tracing::debug!("Discarding stale {} {} response", R::NAME, id);
            return;
        }
        self.inner.slot.finish(&ticket);

        match result {
            Ok(record) => self.inner.state.send_modify(|state| {
                state.status = LoadStatus::Success;
                state.record = record;
                state.error = None;
            }),
            Err(e) => {
                tracing::error!("Failed to load {} {}: {}", R::NAME, id, e);
                let error = HookError::from(&e);
                self.inner.state.send_modify(|state| {
                    state.status = LoadStatus::Error;
                    state.error = Some(error);
                });
            }
        }
    }

    fn require_id(&self) -> Result<String, Error> {
        self.id().ok_or(Error::NoRecordLoaded(R::NAME))
    }

    /// Updates the tracked record and reloads it.
    pub async fn update(&self, dto: &R::Update) -> Result<R::Record, Error> {
        let id = self.require_id()?;
        let record = self.inner.service.update(&id, dto).await?;
        self.fetch(&id).await;
        Ok(record)
    }

    /// Deletes the tracked record and reloads it, which clears it unless the resource is
    /// only soft-deleted.
    pub async fn delete(&self) -> Result<(), Error> {
        let id = self.require_id()?;
        self.inner.service.delete(&id).await?;
        self.fetch(&id).await;
        Ok(())
    }
}

impl<R: SoftDeletable> RecordHook<R> {
    pub async fn restore(&self) -> Result<R::Record, Error> {
        let id = self.require_id()?;
        let record = self.inner.service.restore(&id).await?;
        self.fetch(&id).await;
        Ok(record)
    }
}
