//! File selection for the shell: validate the extension first, then read.
//!
//! A rejected name never reaches the controller, and a file that can't be
//! read leaves everything as it was.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::document::{FormatError, check_extension, file_name_of};

/// A validated, fully read file ready to hand to `load_from_source`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum SelectionError {
    Format(FormatError),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::Format(e) => write!(f, "{e}"),
            SelectionError::Io { path, source } => {
                write!(f, "Could not read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectionError::Format(e) => Some(e),
            SelectionError::Io { source, .. } => Some(source),
        }
    }
}

pub fn read_selection(path: &Path) -> Result<Selection, SelectionError> {
    let name = file_name_of(path);
    check_extension(&name).map_err(SelectionError::Format)?;

    let bytes = fs::read(path).map_err(|source| SelectionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Selection { name, bytes })
}
