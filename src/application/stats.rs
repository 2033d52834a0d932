//! # Invocation Stats
//!
//! Counter for handled command invocations. Injected into the router rather
//! than living in a global, so tests and alternative transports can supply
//! their own.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct CommandStats {
    handled: AtomicU64,
}

impl CommandStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one handled invocation and return the new total.
    pub fn record(&self) -> u64 {
        self.handled.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }
}
