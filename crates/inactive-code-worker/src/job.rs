use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a scheduled recomputation.
///
/// Cancelling is cooperative: a job that has not published yet will publish nothing.
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: u64,
    token: CancellationToken,
}

impl JobHandle {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self {
            id: NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed),
            token,
        }
    }

    /// Unique id of the job.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once cancellation was requested (directly or by disposal).
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}
