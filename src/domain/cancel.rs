use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Raised when the run's cancellation token fires mid-scan. A cancelled
/// declaration yields no suggestion; this is not a failure of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("analysis run was cancelled")]
pub struct Cancelled;

/// Cancellation token shared by one analysis run.
///
/// Cloning is cheap; all clones observe the same flag. Usage-scanning
/// collaborators poll [CancelToken::check] and terminate early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() { Err(Cancelled) } else { Ok(()) }
    }
}
