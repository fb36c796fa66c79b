//! # Document
//!
//! The single in-memory file being edited, plus the extension rules that gate
//! what may be loaded into it.

use std::fmt;
use std::path::Path;

/// Extension every loadable file must carry.
pub const SMIA_EXTENSION: &str = ".smia";

/// Name every export is written under, regardless of what was loaded.
pub const EXPORT_FILE_NAME: &str = "file.smia";

/// Shown in the title bar before anything is loaded.
pub const NO_FILE_LABEL: &str = "No file selected";

/// Returned when a file is offered that does not end in `.smia`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub source_name: String,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid file format. Please upload a {SMIA_EXTENSION} file.")
    }
}

impl std::error::Error for FormatError {}

/// Check a file name (or path) for the `.smia` suffix. Case-sensitive.
pub fn check_extension(source_name: &str) -> Result<(), FormatError> {
    if source_name.ends_with(SMIA_EXTENSION) {
        Ok(())
    } else {
        Err(FormatError {
            source_name: source_name.to_string(),
        })
    }
}

/// Bare file name of a path, falling back to the whole string.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Set only by a successful load.
    pub name: Option<String>,
    pub content: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NO_FILE_LABEL)
    }
}
