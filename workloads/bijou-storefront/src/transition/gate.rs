//! One transition at a time.

use std::cell::Cell;
use std::rc::Rc;

/// Busy flag shared by every link handler.
#[derive(Debug, Clone, Default)]
pub struct TransitionGate {
    busy: Rc<Cell<bool>>,
}

impl TransitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. `None` while another transition runs.
    pub fn try_begin(&self) -> Option<TransitionGuard> {
        if self.busy.replace(true) {
            return None;
        }
        Some(TransitionGuard {
            busy: Rc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Releases the gate when dropped, however the transition ended.
#[derive(Debug)]
pub struct TransitionGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for TransitionGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
