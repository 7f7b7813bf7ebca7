use crate::error::InactiveCodeError;
use crate::job::JobHandle;
use crate::source::DirectiveSource;
use crate::updates::{HighlightUpdate, HighlightUpdates};
use inactive_code::{
    DirectiveRecord, FileId, InactiveCodeConfig, InactiveCodeProcessor, PositionConverter,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct Installation {
    file: Option<FileId>,
    generation: u64,
    pending: Option<JobHandle>,
}

/// State shared between the highlighter, its worker thread and the update receiver.
pub(crate) struct Shared {
    processor: InactiveCodeProcessor,
    installation: Mutex<Installation>,
    updates: mpsc::Sender<HighlightUpdate>,
}

impl Shared {
    pub(crate) fn generation(&self) -> u64 {
        self.installation.lock().generation
    }

    /// Compute and post an update unless `cancel` fires first.
    fn publish(
        &self,
        file: &FileId,
        generation: u64,
        directives: Option<&[DirectiveRecord]>,
        converter: Option<&dyn PositionConverter>,
        cancel: &CancellationToken,
    ) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        let edit = self.processor.process(directives, file, converter);
        if cancel.is_cancelled() {
            tracing::debug!(file = %file, "inactive code computation cancelled before delivery");
            return false;
        }
        self.updates
            .send(HighlightUpdate { generation, edit })
            .is_ok()
    }
}

struct RecomputeJob {
    file: FileId,
    generation: u64,
    handle: JobHandle,
}

/// Keeps the inactive-code layer of one editor in sync with its file.
///
/// Recomputations run on a dedicated worker thread. Results travel to the consumer through the
/// [`HighlightUpdates`] queue returned by [`InactiveCodeHighlighting::new`]; the consumer applies
/// them on its own thread.
pub struct InactiveCodeHighlighting<S: DirectiveSource> {
    shared: Arc<Shared>,
    source: Arc<S>,
    jobs: Option<mpsc::Sender<RecomputeJob>>,
    worker: Option<JoinHandle<()>>,
    shutdown: CancellationToken,
}

impl<S: DirectiveSource> InactiveCodeHighlighting<S> {
    /// Start a highlighter and its worker thread.
    pub fn new(
        config: InactiveCodeConfig,
        source: S,
    ) -> Result<(Self, HighlightUpdates), InactiveCodeError> {
        let (updates_tx, updates_rx) = mpsc::channel::<HighlightUpdate>();
        let (jobs_tx, jobs_rx) = mpsc::channel::<RecomputeJob>();

        let shared = Arc::new(Shared {
            processor: InactiveCodeProcessor::new(config),
            installation: Mutex::new(Installation::default()),
            updates: updates_tx,
        });
        let source = Arc::new(source);

        let worker = {
            let shared = Arc::clone(&shared);
            let source = Arc::clone(&source);
            thread::Builder::new()
                .name("inactive-code".to_string())
                .spawn(move || worker_loop(shared, source, jobs_rx))?
        };

        let updates = HighlightUpdates::new(updates_rx, Arc::clone(&shared));
        Ok((
            Self {
                shared,
                source,
                jobs: Some(jobs_tx),
                worker: Some(worker),
                shutdown: CancellationToken::new(),
            },
            updates,
        ))
    }

    /// The directive source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The file currently installed, if any.
    pub fn file(&self) -> Option<FileId> {
        self.shared.installation.lock().file.clone()
    }

    /// Attach to `file`. Results computed for a previous installation become stale.
    pub fn install(&self, file: FileId) {
        let mut installation = self.shared.installation.lock();
        if let Some(pending) = installation.pending.take() {
            pending.cancel();
        }
        installation.generation += 1;
        tracing::debug!(file = %file, generation = installation.generation, "installed");
        installation.file = Some(file);
    }

    /// Detach from the current file and clear its highlights.
    pub fn uninstall(&self) {
        let mut installation = self.shared.installation.lock();
        let Some(file) = installation.file.take() else {
            return;
        };
        if let Some(pending) = installation.pending.take() {
            pending.cancel();
        }
        installation.generation += 1;
        tracing::debug!(file = %file, generation = installation.generation, "uninstalled");

        let clear = HighlightUpdate {
            generation: installation.generation,
            edit: self.shared.processor.clear(),
        };
        // A dropped receiver means nobody displays highlights any more.
        let _ = self.shared.updates.send(clear);
    }

    /// Schedule a recomputation for the installed file.
    ///
    /// While a job is waiting to run, further refreshes return its handle instead of queueing
    /// another one.
    pub fn refresh(&self) -> Result<JobHandle, InactiveCodeError> {
        let mut installation = self.shared.installation.lock();
        let file = installation
            .file
            .clone()
            .ok_or(InactiveCodeError::NotInstalled)?;

        if let Some(pending) = installation.pending.as_ref()
            && !pending.is_cancelled()
        {
            return Ok(pending.clone());
        }

        let handle = JobHandle::new(self.shutdown.child_token());
        let job = RecomputeJob {
            file,
            generation: installation.generation,
            handle: handle.clone(),
        };
        self.jobs
            .as_ref()
            .ok_or(InactiveCodeError::WorkerStopped)?
            .send(job)
            .map_err(|_| InactiveCodeError::WorkerStopped)?;

        tracing::debug!(job = handle.id(), "scheduled inactive code recomputation");
        installation.pending = Some(handle.clone());
        Ok(handle)
    }

    /// Publish results for a trace the caller already has (e.g. from a reconciler).
    ///
    /// `converter` maps ranges from the parsed text onto the current text. Returns `true` if an
    /// update was posted; nothing is posted when no file is installed or `cancel` fires before
    /// delivery.
    pub fn reconciled(
        &self,
        directives: Option<&[DirectiveRecord]>,
        converter: Option<&dyn PositionConverter>,
        cancel: &CancellationToken,
    ) -> bool {
        let (file, generation) = {
            let installation = self.shared.installation.lock();
            let Some(file) = installation.file.clone() else {
                return false;
            };
            (file, installation.generation)
        };
        self.shared
            .publish(&file, generation, directives, converter, cancel)
    }

    /// Uninstall, cancel outstanding work and stop the worker.
    pub fn dispose(self) {
        drop(self);
    }
}

impl<S: DirectiveSource> Drop for InactiveCodeHighlighting<S> {
    fn drop(&mut self) {
        self.uninstall();
        self.shutdown.cancel();
        self.jobs.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::warn!("inactive code worker panicked");
        }
    }
}

fn worker_loop<S: DirectiveSource>(
    shared: Arc<Shared>,
    source: Arc<S>,
    jobs: mpsc::Receiver<RecomputeJob>,
) {
    while let Ok(job) = jobs.recv() {
        {
            let mut installation = shared.installation.lock();
            if installation.pending.as_ref().map(JobHandle::id) == Some(job.handle.id()) {
                installation.pending = None;
            }
        }

        let cancel = job.handle.token();
        if cancel.is_cancelled() {
            tracing::debug!(job = job.handle.id(), "skipping cancelled job");
            continue;
        }

        let directives = match source.directives(&job.file, cancel) {
            Ok(directives) => directives,
            Err(err) => {
                tracing::warn!(file = %job.file, error = %err, "failed to obtain directive trace");
                continue;
            }
        };

        let posted = shared.publish(
            &job.file,
            job.generation,
            directives.as_deref(),
            None,
            cancel,
        );
        tracing::debug!(job = job.handle.id(), posted, "inactive code job finished");
    }
    tracing::debug!("inactive code worker stopped");
}
