//! Cooperative cancellation for batch execution
//!
//! One flag, written at most once by the interrupt listener and polled by
//! the orchestrator between batch entries. An in-flight FFmpeg job is not
//! interrupted here; the signal reaches the child process through the
//! terminal, and ffbatch merely stops dispatching further entries.

use crate::error::FfbatchResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Write-once, read-many cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the run as cancelled; never reset
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Install the SIGINT/SIGTERM listener that trips `token`
///
/// The handler performs no cleanup of its own; already-aggregated errors
/// and the completion bell are still emitted by the orchestrator.
pub fn install_handler(token: CancelToken) -> FfbatchResult<()> {
    ctrlc::set_handler(move || {
        debug!("interrupt received, finishing current entry");
        token.cancel();
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear_and_stays_set() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        token.cancel();
        assert!(token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let listener_side = token.clone();

        listener_side.cancel();
        assert!(token.is_cancelled());
    }
}
