#![warn(missing_docs)]
//! `inactive-code-worker` - background recomputation of inactive code highlights.
//!
//! This crate keeps an editor's inactive-code layer up to date without blocking the thread that
//! owns the editor:
//!
//! - [`InactiveCodeHighlighting`] schedules recomputations on a worker thread, fetching directive
//!   traces from a [`DirectiveSource`]
//! - each job is cancellable through its [`JobHandle`]
//! - results are posted as `inactive_code::ProcessingEdit` values to a single-consumer
//!   [`HighlightUpdates`] queue, which drops results that belong to an earlier installation
//!
//! ```rust
//! use inactive_code::{
//!     DirectiveKind, DirectiveRecord, FileId, HighlightLayers, InactiveCodeConfig, StyleLayerId,
//! };
//! use inactive_code_worker::InactiveCodeHighlighting;
//! use std::time::Duration;
//!
//! let source = |file: &FileId| {
//!     Some(vec![
//!         DirectiveRecord::new(DirectiveKind::If, file.clone(), 0, 5, false),
//!         DirectiveRecord::new(DirectiveKind::Endif, file.clone(), 30, 6, false),
//!     ])
//! };
//! let (highlighting, updates) =
//!     InactiveCodeHighlighting::new(InactiveCodeConfig::default(), source).unwrap();
//! highlighting.install(FileId::new("main.c"));
//! highlighting.refresh().unwrap();
//!
//! let mut layers = HighlightLayers::new();
//! let update = updates.recv_timeout(Duration::from_secs(5)).unwrap();
//! assert!(updates.apply(update, &mut layers));
//! assert!(layers.is_styled(StyleLayerId::INACTIVE_CODE, 10));
//! ```

mod error;
mod highlighting;
mod job;
mod source;
mod updates;

pub use error::InactiveCodeError;
pub use highlighting::InactiveCodeHighlighting;
pub use job::JobHandle;
pub use source::DirectiveSource;
pub use updates::{HighlightUpdate, HighlightUpdates};

pub use tokio_util::sync::CancellationToken;
