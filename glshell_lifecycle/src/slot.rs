//! Process-wide "one running application" token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

lazy_static! {
    static ref PROCESS_SLOT: Arc<ActiveSlot> = Arc::new(ActiveSlot::new());
}

/// A slot that at most one lifecycle can hold at a time.
///
/// Real backends share [`ActiveSlot::process`]. Tests can create their own slots so unrelated
/// lifecycles do not see each other.
#[derive(Debug, Default)]
pub struct ActiveSlot {
    claimed: AtomicBool,
}

impl ActiveSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process() -> Arc<ActiveSlot> {
        Arc::clone(&PROCESS_SLOT)
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }

    /// Returns `None` if someone else already holds the slot.
    pub fn try_claim(slot: &Arc<ActiveSlot>) -> Option<SlotClaim> {
        slot.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotClaim { slot: Arc::clone(slot) })
    }
}

/// Held for the duration of a run; releases the slot when dropped.
#[derive(Debug)]
pub struct SlotClaim {
    slot: Arc<ActiveSlot>,
}

impl Drop for SlotClaim {
    fn drop(&mut self) {
        self.slot.claimed.store(false, Ordering::Release);
    }
}
