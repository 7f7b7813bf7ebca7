use inactive_code::{DirectiveRecord, FileId};
use std::convert::Infallible;
use tokio_util::sync::CancellationToken;

/// Supplies the directive trace of a file, typically by parsing it and collecting the
/// preprocessor statements of the resulting translation unit.
///
/// Implementations may block; they run on the worker thread. `cancel` is set when the job
/// that requested the trace is cancelled or the highlighter is disposed.
pub trait DirectiveSource: Send + Sync + 'static {
    /// The error type returned by [`DirectiveSource::directives`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Directive records in source order, or `Ok(None)` if no parse result is available.
    fn directives(
        &self,
        file: &FileId,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<DirectiveRecord>>, Self::Error>;
}

impl<F> DirectiveSource for F
where
    F: Fn(&FileId) -> Option<Vec<DirectiveRecord>> + Send + Sync + 'static,
{
    type Error = Infallible;

    fn directives(
        &self,
        file: &FileId,
        _cancel: &CancellationToken,
    ) -> Result<Option<Vec<DirectiveRecord>>, Self::Error> {
        Ok(self(file))
    }
}
