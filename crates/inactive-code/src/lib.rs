#![warn(missing_docs)]
//! Inactive Code - preprocessor-excluded region computation for C/C++ editors
//!
//! # Overview
//!
//! `inactive-code` turns the conditional-compilation directive trace of a parsed translation
//! unit (`#if`/`#ifdef`/`#ifndef`/`#elif`/`#else`/`#endif`, each with a "taken" flag) into the
//! set of source ranges the preprocessor excluded, so an editor can deemphasize them.
//! It does not evaluate conditions or render anything: a parser supplies the trace, and the
//! result is expressed as a style layer replacement that any highlighting consumer can apply.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Highlight Layers (consumer)                │  ← Apply / query
//! ├─────────────────────────────────────────────┤
//! │  Processing (ProcessingEdit)                │  ← Layer replacement
//! ├─────────────────────────────────────────────┤
//! │  Position Conversion (TextDelta)            │  ← Historic → actual
//! ├─────────────────────────────────────────────┤
//! │  Inactive Region Extractor                  │  ← Directive fold
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use inactive_code::{DirectiveKind, DirectiveRecord, FileId, InactiveRange};
//! use inactive_code::extract_inactive_ranges;
//!
//! let file = FileId::new("main.c");
//! let trace = vec![
//!     DirectiveRecord::new(DirectiveKind::Ifdef, file.clone(), 0, 12, false),
//!     DirectiveRecord::new(DirectiveKind::Endif, file.clone(), 40, 6, false),
//! ];
//!
//! let ranges = extract_inactive_ranges(&trace, &file);
//! assert_eq!(ranges, vec![InactiveRange::new(0, 46)]);
//! ```
//!
//! ## Publishing into a highlight layer
//!
//! ```rust
//! use inactive_code::{
//!     DirectiveKind, DirectiveRecord, FileId, HighlightLayers, InactiveCodeProcessor,
//!     StyleLayerId,
//! };
//!
//! let file = FileId::new("main.c");
//! let trace = vec![
//!     DirectiveRecord::new(DirectiveKind::If, file.clone(), 0, 5, true),
//!     DirectiveRecord::new(DirectiveKind::Else, file.clone(), 20, 5, false),
//!     DirectiveRecord::new(DirectiveKind::Endif, file.clone(), 40, 6, false),
//! ];
//!
//! let processor = InactiveCodeProcessor::default();
//! let mut layers = HighlightLayers::new();
//! layers.apply_processing_edits([processor.process(Some(trace.as_slice()), &file, None)]);
//!
//! assert!(layers.is_styled(StyleLayerId::INACTIVE_CODE, 30));
//! assert!(!layers.is_styled(StyleLayerId::INACTIVE_CODE, 10));
//! ```
//!
//! # Module Description
//!
//! - [`directive`] - Directive trace records
//! - [`extract`] - Inactive region extraction
//! - [`delta`] - Text deltas and position conversion
//! - [`intervals`] - Style ids, layers and interval storage
//! - [`processing`] - Layer replacement edits
//! - [`highlights`] - Highlight layer store
//! - [`config`] - Highlighting configuration

pub mod config;
pub mod delta;
pub mod directive;
pub mod extract;
pub mod highlights;
pub mod intervals;
pub mod processing;

pub use config::InactiveCodeConfig;
pub use delta::{PositionConverter, TextDelta, TextDeltaEdit};
pub use directive::{DirectiveKind, DirectiveRecord, FileId};
pub use extract::{InactiveRange, extract_inactive_ranges};
pub use highlights::HighlightLayers;
pub use intervals::{INACTIVE_CODE_STYLE_ID, Interval, IntervalTree, StyleId, StyleLayerId};
pub use processing::{InactiveCodeProcessor, ProcessingEdit};
