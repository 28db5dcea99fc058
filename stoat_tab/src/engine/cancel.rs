//! Cooperative cancellation.
//!
//! The engine checks the token once per loop iteration and, when signalled, returns a cancelled outcome.
//! The library spawns no timers; a host implements a timeout by setting the token from one of its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A token signalling that a build should stop.
///
/// Clones share the underlying flag, so a host may hand one clone to the engine and keep another to signal with, from any thread.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Irrevocable.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod cancel_tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let held = token.clone();

        assert!(!held.is_cancelled());
        token.cancel();
        assert!(held.is_cancelled());
    }
}
