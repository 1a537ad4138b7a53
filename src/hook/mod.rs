//! Observable client-side state over the entity services.
//!
//! Hooks are the framework-agnostic counterpart of UI data hooks: each instance owns its
//! state, publishes it on a `tokio::sync::watch` channel and refetches from the source after
//! every mutation. Responses are tagged with a per-instance generation so a slow, superseded
//! request can never overwrite fresher state.

pub mod data;
pub mod fetch;
pub mod poller;
pub mod record;
pub mod state;

#[cfg(test)]
mod tests;

pub use data::DataHook;
pub use fetch::FetchPolicy;
pub use poller::{AlertCounts, AlertCountsPoller, Poller};
pub use record::RecordHook;
pub use state::{HookState, LoadStatus, RecordState};
