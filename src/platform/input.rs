//! Tap hand-off from the host thread to the loop thread

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::sim::Tap;

/// Single-slot mailbox. A newer tap replaces one the loop has not consumed yet.
#[derive(Debug, Default)]
pub struct TapMailbox {
    slot: Mutex<Option<Tap>>,
}

impl TapMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, tap: Tap) {
        let mut slot = self.lock();
        if let Some(old) = slot.replace(tap) {
            log::debug!("Tap at {:?} replaced before it was consumed", old.pos);
        }
    }

    pub fn take(&self) -> Option<Tap> {
        self.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    // An `Option<Tap>` cannot be left half-written, so a poisoned lock is safe to reuse
    fn lock(&self) -> MutexGuard<'_, Option<Tap>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
