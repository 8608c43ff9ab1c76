use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::solver::SolverErr;

/// Cooperative cancellation, polled by the search between expansions.
///
/// Clones share the flag so one can be handed to another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Never fires unless `cancel` is called
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        CancelToken {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }

    pub(crate) fn check(&self) -> Result<(), SolverErr> {
        if self.is_cancelled() {
            Err(SolverErr::TimedOut)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn manual_cancel_is_shared() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert_eq!(token.check(), Ok(()));

        let other = token.clone();
        thread::spawn(move || other.cancel()).join().unwrap();
        assert!(token.is_cancelled());
        assert_eq!(token.check(), Err(SolverErr::TimedOut));
    }

    #[test]
    fn deadline() {
        assert!(CancelToken::with_timeout(Duration::from_secs(0)).is_cancelled());
        assert!(!CancelToken::with_timeout(Duration::from_secs(3600)).is_cancelled());
    }
}
