//! # File Export
//!
//! The local-file-export collaborator used by `save_current()`. The
//! controller builds an [`ExportFile`]; an [`Exporter`] decides where the
//! bytes land.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::document::EXPORT_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// UTF-8 bytes of `content` under the fixed export name.
    pub fn from_content(content: &str) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            bytes: content.as_bytes().to_vec(),
        }
    }
}

pub trait Exporter: Send + Sync {
    /// Write the file somewhere local and return where it went.
    fn export(&self, file: &ExportFile) -> io::Result<PathBuf>;
}

/// Writes exports into a fixed directory, replacing any previous export.
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for DirectoryExporter {
    fn export(&self, file: &ExportFile) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.file_name);
        atomic_write(&path, &file.bytes)?;
        debug!("Exported {} bytes to {}", file.bytes.len(), path.display());
        Ok(path)
    }
}

/// Atomically write `bytes` to `path` (via a hidden `.<name>.tmp` + rename).
fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// `dir/file.smia` -> `dir/.file.smia.tmp`, so user files named `file.tmp` are left alone.
fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}
