use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by [`InactiveCodeHighlighting`](crate::InactiveCodeHighlighting).
pub enum InactiveCodeError {
    #[error("failed to spawn worker thread: {0}")]
    /// The background worker thread could not be started.
    Io(#[from] std::io::Error),

    #[error("inactive code worker stopped")]
    /// The background worker is no longer accepting jobs.
    WorkerStopped,

    #[error("no file installed")]
    /// A recomputation was requested before [`install`](crate::InactiveCodeHighlighting::install).
    NotInstalled,
}
