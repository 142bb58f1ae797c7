//! Hands exported files to whatever stores them on the user's side.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::dto::customer::CustomerRow;
use crate::export::{ExportError, ExportFile, export_customers};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to save export: {0}")]
    Io(#[from] io::Error),
}

/// Receives a finished export, e.g. by saving it or offering it to the user.
pub trait DownloadSink {
    fn offer(&self, file: &ExportFile) -> io::Result<()>;
}

/// Writes each file under its own name into a directory.
#[derive(Debug, Clone)]
pub struct SaveToDirectory {
    dir: PathBuf,
}

impl SaveToDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for SaveToDirectory {
    fn offer(&self, file: &ExportFile) -> io::Result<()> {
        let path = self.dir.join(file.file_name);
        fs::write(&path, &file.bytes)?;
        log::info!("Saved {} ({} bytes)", path.display(), file.bytes.len());
        Ok(())
    }
}

/// Keeps offered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<ExportFile>>,
}

impl MemorySink {
    pub fn files(&self) -> Vec<ExportFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DownloadSink for MemorySink {
    fn offer(&self, file: &ExportFile) -> io::Result<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(file.clone());
        Ok(())
    }
}

/// Exports `rows` and offers the resulting `Customers.xml` to `sink`.
///
/// Nothing reaches the sink when serialization fails.
pub fn download_customers<S: DownloadSink + ?Sized>(
    rows: &[CustomerRow],
    sink: &S,
) -> Result<(), DownloadError> {
    let file = export_customers(rows)?;
    sink.offer(&file)?;
    Ok(())
}
