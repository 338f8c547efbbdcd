//! Jump intent between input callbacks and the simulation
//!
//! Key and touch handlers fire between frames. They only raise a flag; the
//! controller drains it once at the top of the next step.

use std::cell::Cell;
use std::rc::Rc;

/// Anything that can report whether a jump was requested since the last poll
pub trait InputSource {
    /// Consume the pending jump request, if any
    fn take_jump(&mut self) -> bool;
}

/// Shared jump flag. Clones point at the same flag, so one clone can live in
/// an event listener while the game loop polls another.
#[derive(Debug, Clone, Default)]
pub struct JumpLatch {
    pending: Rc<Cell<bool>>,
}

impl JumpLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Repeated requests before the next poll collapse into one.
    pub fn request(&self) {
        self.pending.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

impl InputSource for JumpLatch {
    fn take_jump(&mut self) -> bool {
        self.pending.replace(false)
    }
}

/// Scripted input for headless runs and tests
impl<F: FnMut() -> bool> InputSource for F {
    fn take_jump(&mut self) -> bool {
        self()
    }
}
