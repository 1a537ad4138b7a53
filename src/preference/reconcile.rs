use std::{collections::HashSet, future::Future};

use crate::{error::Error, model::preference::PreferenceRecord};

/// Create/delete primitives of a preference list.
pub trait PreferenceStore {
    type Record: PreferenceRecord;

    const NAME: &'static str;

    /// Every entry, inactive ones included
    fn list_all(&self) -> impl Future<Output = Result<Vec<Self::Record>, Error>> + Send;

    fn remove(&self, id: &str) -> impl Future<Output = Result<(), Error>> + Send;

    fn add(
        &self,
        reference_id: &str,
        display_order: i32,
    ) -> impl Future<Output = Result<Self::Record, Error>> + Send;
}

/// Set difference between a current preference list and the desired reference IDs.
#[derive(Debug, PartialEq)]
pub struct ReconcilePlan<'a, P> {
    /// Current entries whose reference is still desired, in current order
    pub keep: Vec<&'a P>,
    /// Current entries whose reference is no longer desired
    pub to_remove: Vec<&'a P>,
    /// Missing reference IDs with their display order, in desired order
    pub to_add: Vec<(String, i32)>,
}

impl<'a, P: PreferenceRecord> ReconcilePlan<'a, P> {
    /// Computes the plan turning `current` into `desired`.
    ///
    /// Entries are matched by reference ID. Repeated IDs in `desired` count once, at their
    /// first position. A new entry's display order is its position in `desired`.
    pub fn compute(current: &'a [P], desired: &[String]) -> Self {
        let mut seen = HashSet::new();
        let desired: Vec<&str> = desired
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect();

        let (keep, to_remove): (Vec<&P>, Vec<&P>) = current
            .iter()
            .partition(|record| seen.contains(record.reference_id()));

        let existing: HashSet<&str> = current.iter().map(|record| record.reference_id()).collect();
        let to_add = desired
            .iter()
            .enumerate()
            .filter(|(_, id)| !existing.contains(**id))
            .map(|(position, id)| (id.to_string(), position as i32))
            .collect();

        Self {
            keep,
            to_remove,
            to_add,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Converges `store` to exactly the `desired` reference IDs.
///
/// Deletions run before creations, each call awaited before the next is issued. The first
/// failure aborts the batch; calls already made stay applied.
///
/// # Returns
/// - `Ok(Vec)` - Kept entries followed by the created ones
/// - `Err(Error)` - Listing, or the first failed delete/create
pub async fn reconcile<S: PreferenceStore>(
    store: &S,
    desired: &[String],
) -> Result<Vec<S::Record>, Error> {
    let current = store.list_all().await?;
    let plan = ReconcilePlan::compute(&current, desired);

    if plan.is_noop() {
        tracing::debug!("{} list already matches the desired set", S::NAME);
        return Ok(plan.keep.into_iter().cloned().collect());
    }

    tracing::info!(
        "Reconciling {} list: {} to remove, {} to add, {} unchanged",
        S::NAME,
        plan.to_remove.len(),
        plan.to_add.len(),
        plan.keep.len()
    );

    for record in &plan.to_remove {
        store.remove(record.id()).await?;
    }

    let mut result: Vec<S::Record> = plan.keep.iter().map(|record| (*record).clone()).collect();
    for (reference_id, display_order) in &plan.to_add {
        result.push(store.add(reference_id, *display_order).await?);
    }

    Ok(result)
}
