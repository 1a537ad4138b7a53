use crate::{error::HookError, model::api::PaginationMeta};

/// Lifecycle of a hook's last fetch: `Idle -> Loading -> Success | Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable state of a list hook.
///
/// A failed fetch keeps the items of the last successful one and only sets `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
    pub status: LoadStatus,
    pub items: Vec<T>,
    pub meta: Option<PaginationMeta>,
    pub error: Option<HookError>,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            items: Vec::new(),
            meta: None,
            error: None,
        }
    }
}

impl<T> HookState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// Observable state of a single-record hook.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordState<T> {
    pub status: LoadStatus,
    /// `None` before the first load and when the record doesn't exist
    pub record: Option<T>,
    pub error: Option<HookError>,
}

impl<T> Default for RecordState<T> {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            record: None,
            error: None,
        }
    }
}

impl<T> RecordState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}
