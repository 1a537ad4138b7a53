//! Preference batch reconciliation.
//!
//! The API offers no batch endpoint for a farm's preference lists, only create and delete.
//! Converging a list to a desired set of catalog IDs is therefore computed client-side as a
//! [`ReconcilePlan`] and applied one call at a time.

pub mod reconcile;

pub use crate::service::preference::{PreferenceKind, PreferenceService};
pub use reconcile::{reconcile, PreferenceStore, ReconcilePlan};
