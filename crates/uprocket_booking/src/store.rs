// --- File: crates/uprocket_booking/src/store.rs ---
//! The scheduler store.
//!
//! The embedded scheduling widget keeps its selected timeslot and booking info
//! in an internal store that consumers read on their next render. Here that
//! handoff is explicit: every write bumps a monotonic revision and publishes a
//! snapshot on a watch channel. A consumer that must not act on stale state
//! waits for the channel to reach the revision returned by the write it
//! depends on, then acts on that snapshot. A booking can therefore never read
//! state older than the write that preceded it.

use tokio::sync::watch;

use crate::models::{BookingInfo, Timeslot};

/// One published state of the store.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Monotonic write counter. Revision 0 is the empty initial state.
    pub revision: u64,
    pub selected_timeslot: Option<Timeslot>,
    pub booking_info: Option<BookingInfo>,
}

/// Shared mutable state between the booking flow and the scheduler connector.
pub struct SchedulerStore {
    tx: watch::Sender<StoreSnapshot>,
}

impl SchedulerStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(StoreSnapshot::default());
        Self { tx }
    }

    /// Stage the selected timeslot. Returns the revision of this write.
    pub fn set_selected_timeslot(&self, timeslot: Timeslot) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.revision += 1;
            snapshot.selected_timeslot = Some(timeslot);
            revision = snapshot.revision;
        });
        revision
    }

    /// Stage the booking info. Returns the revision of this write.
    pub fn set_booking_info(&self, booking_info: BookingInfo) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.revision += 1;
            snapshot.booking_info = Some(booking_info);
            revision = snapshot.revision;
        });
        revision
    }

    /// The current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.tx.borrow().clone()
    }

    /// A receiver for consumers that need to observe writes.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for SchedulerStore {
    fn default() -> Self {
        Self::new()
    }
}
