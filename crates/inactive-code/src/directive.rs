//! Preprocessor directive trace data model.
//!
//! A directive trace is the ordered list of conditional-compilation directives a C/C++ parser
//! observed while preprocessing a translation unit. Each record carries the file it physically
//! occurs in, its extent in that file, and whether the preprocessor selected the branch it
//! introduces. Evaluating conditions is the parser's job; this crate only consumes the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a source file (typically its path as reported by the parser).
///
/// Cloning is cheap; the underlying string is shared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Arc<str>);

impl FileId {
    /// Create a file id from a path or any other stable name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The underlying name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FileId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// Conditional-compilation directive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    /// `#if <expr>`
    If,
    /// `#ifdef <name>`
    Ifdef,
    /// `#ifndef <name>`
    Ifndef,
    /// `#elif <expr>`
    Elif,
    /// `#else`
    Else,
    /// `#endif`
    Endif,
}

/// A single conditional directive occurrence.
///
/// Offsets are in the same unit the consumer uses for highlighting (the parser's node offsets,
/// usually characters from the start of `file`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRecord {
    /// Directive kind.
    pub kind: DirectiveKind,
    /// File the directive physically occurs in.
    pub file: FileId,
    /// Start offset of the directive text.
    pub offset: usize,
    /// Length of the directive text.
    pub length: usize,
    /// Whether the branch introduced by this directive was selected by the preprocessor.
    ///
    /// For `#else`/`#endif` this describes the branch associated with the directive text.
    #[serde(default)]
    pub taken: bool,
}

impl DirectiveRecord {
    /// Create a new directive record.
    pub fn new(
        kind: DirectiveKind,
        file: FileId,
        offset: usize,
        length: usize,
        taken: bool,
    ) -> Self {
        Self {
            kind,
            file,
            offset,
            length,
            taken,
        }
    }

    /// Exclusive end offset of the directive text.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_record_json_shape() {
        let json = r#"{"kind":"ifndef","file":"a.h","offset":3,"length":14,"taken":true}"#;
        let record: DirectiveRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.kind, DirectiveKind::Ifndef);
        assert_eq!(record.file, FileId::new("a.h"));
        assert_eq!(record.end(), 17);
        assert!(record.taken);
    }

    #[test]
    fn test_taken_defaults_to_false() {
        let json = r#"{"kind":"endif","file":"a.c","offset":0,"length":6}"#;
        let record: DirectiveRecord = serde_json::from_str(json).unwrap();
        assert!(!record.taken);
    }
}
