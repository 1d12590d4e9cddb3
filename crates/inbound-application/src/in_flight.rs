//! Single-slot guard for backend requests.

use std::sync::{Arc, Mutex, MutexGuard};

/// The kind of request holding the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Lookalike { seed_index: usize },
}

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<T> {
    /// The action ran to completion (successfully or not).
    Completed(T),
    /// Another request was in flight; nothing happened.
    Ignored,
}

impl<T> Dispatch<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Dispatch::Completed(value) => Some(value),
            Dispatch::Ignored => None,
        }
    }
}

/// At most one [`Operation`] runs at a time. A second caller is turned away,
/// not queued.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    slot: Arc<Mutex<Option<Operation>>>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `operation`, or `None` when it is taken.
    pub fn try_acquire(&self, operation: Operation) -> Option<InFlightTicket> {
        let mut slot = self.lock();
        if let Some(current) = *slot {
            tracing::debug!(
                "[InFlightGuard] Ignoring {:?} while {:?} is in flight",
                operation,
                current
            );
            return None;
        }
        *slot = Some(operation);
        Some(InFlightTicket {
            slot: Arc::clone(&self.slot),
        })
    }

    pub fn current(&self) -> Option<Operation> {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Operation>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the slot; releases it on drop.
#[derive(Debug)]
pub struct InFlightTicket {
    slot: Arc<Mutex<Option<Operation>>>,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}
