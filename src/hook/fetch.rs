use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use tokio_util::sync::CancellationToken;

/// How a hook treats a fetch issued while another one is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Cancel the pending request and issue the new one
    #[default]
    CancelPrevious,
    /// Drop the new fetch; the pending request runs to completion
    SkipWhileInFlight,
}

/// Handle of one issued fetch.
#[derive(Debug, Clone)]
pub(crate) struct Ticket {
    pub generation: u64,
    pub token: CancellationToken,
}

/// Generation counter and in-flight bookkeeping of one hook instance.
///
/// Every fetch gets a strictly increasing generation; only the response of the latest
/// generation may touch hook state.
#[derive(Debug)]
pub(crate) struct FetchSlot {
    policy: FetchPolicy,
    generation: AtomicU64,
    in_flight: Mutex<Option<Ticket>>,
}

impl FetchSlot {
    pub fn new(policy: FetchPolicy) -> Self {
        Self {
            policy,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Option<Ticket>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new fetch.
    ///
    /// # Returns
    /// - `Some(Ticket)` - The fetch may proceed; any previous one was cancelled
    /// - `None` - Skipped, a fetch is pending under [`FetchPolicy::SkipWhileInFlight`]
    pub fn begin(&self) -> Option<Ticket> {
        let mut in_flight = self.lock();

        if self.policy == FetchPolicy::SkipWhileInFlight && in_flight.is_some() {
            return None;
        }

        Some(self.supersede(&mut in_flight))
    }

    /// Registers a fetch that must not be skipped, such as the refetch after a mutation.
    ///
    /// The pending fetch is cancelled under either policy, so its response can no longer
    /// overwrite the state the new fetch produces.
    pub fn begin_required(&self) -> Ticket {
        let mut in_flight = self.lock();
        self.supersede(&mut in_flight)
    }

    fn supersede(&self, in_flight: &mut Option<Ticket>) -> Ticket {
        if let Some(previous) = in_flight.take() {
            previous.token.cancel();
        }

        let ticket = Ticket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            token: CancellationToken::new(),
        };
        *in_flight = Some(ticket.clone());

        ticket
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Releases the in-flight slot if `ticket` still holds it.
    pub fn finish(&self, ticket: &Ticket) {
        let mut in_flight = self.lock();
        if in_flight
            .as_ref()
            .is_some_and(|current| current.generation == ticket.generation)
        {
            *in_flight = None;
        }
    }

    /// Cancels the pending fetch, if any, and invalidates its response.
    pub fn cancel(&self) {
        if let Some(ticket) = self.lock().take() {
            ticket.token.cancel();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().is_some()
    }
}

impl Drop for FetchSlot {
    fn drop(&mut self) {
        if let Some(ticket) = self.lock().take() {
            ticket.token.cancel();
        }
    }
}
