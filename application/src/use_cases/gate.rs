//! Single-flight submission gate.
//!
//! At most one submission may be in flight. The flag is set by
//! [`SubmissionGate::try_acquire`] and cleared when the returned
//! [`SubmissionPermit`] is dropped, on success, error or cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Caller-visible busy flag shared by all clones of the gate.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    busy: Arc<AtomicBool>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission currently holds the gate
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the gate, or `None` if a submission is already in flight.
    pub fn try_acquire(&self) -> Option<SubmissionPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionPermit {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Scoped claim on a [`SubmissionGate`]; releases it on drop.
#[derive(Debug)]
pub struct SubmissionPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
