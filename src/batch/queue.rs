use std::fmt;
use std::path::Path;

use anyhow::Context as _;

use crate::assets::{SUPPORTED_EXTENSIONS, is_supported_extension};
use crate::foundation::error::{PadframeError, PadframeResult};
use crate::model::OutputResult;

/// Queue-unique identifier of an [`InputFile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// Lifecycle of a queued file within a processing run.
///
/// Results exist only in `Completed`, and there they cover every format of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileStatus {
    Pending,
    Processing,
    Completed(Vec<OutputResult>),
    /// Decode/render/encode failure message; no partial results are kept.
    Error(String),
}

/// Payload-free view of [`FileStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Pending,
    Processing,
    Completed,
    Error,
}

impl FileStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Pending => StatusKind::Pending,
            Self::Processing => StatusKind::Processing,
            Self::Completed(_) => StatusKind::Completed,
            Self::Error(_) => StatusKind::Error,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn results(&self) -> Option<&[OutputResult]> {
        match self {
            Self::Completed(results) => Some(results),
            _ => None,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A source image waiting in (or processed by) the batch queue.
#[derive(Clone, Debug)]
pub struct InputFile {
    id: FileId,
    name: String,
    source: Vec<u8>,
    pub(crate) status: FileStatus,
}

impl InputFile {
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Original file name, used to derive output names.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_bytes(&self) -> &[u8] {
        &self.source
    }

    pub fn status(&self) -> &FileStatus {
        &self.status
    }

    pub fn results(&self) -> Option<&[OutputResult]> {
        self.status.results()
    }
}

/// Ordered work queue owned by the caller and driven by the orchestrator.
#[derive(Clone, Debug, Default)]
pub struct BatchQueue {
    files: Vec<InputFile>,
    next_id: u64,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue raw bytes as a `Pending` file.
    pub fn add(&mut self, name: impl Into<String>, source: Vec<u8>) -> FileId {
        self.next_id += 1;
        let id = FileId(self.next_id);
        self.files.push(InputFile {
            id,
            name: name.into(),
            source,
            status: FileStatus::Pending,
        });
        id
    }

    /// Read a file from disk and enqueue it under its file name.
    ///
    /// Extensions outside [`SUPPORTED_EXTENSIONS`] are rejected before reading.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> PadframeResult<FileId> {
        let path = path.as_ref();
        if !is_supported_extension(path) {
            return Err(PadframeError::validation(format!(
                "unsupported input '{}' (expected one of: {})",
                path.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PadframeError::validation(format!("input '{}' has no file name", path.display()))
            })?;
        let bytes =
            std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
        Ok(self.add(name, bytes))
    }

    /// Remove one file regardless of its status.
    pub fn remove(&mut self, id: FileId) -> Option<InputFile> {
        let idx = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(idx))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn get(&self, id: FileId) -> Option<&InputFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    pub(crate) fn files_mut(&mut self) -> &mut [InputFile] {
        &mut self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.files
            .iter()
            .filter(|f| f.status.kind() == kind)
            .count()
    }
}

impl<'a> IntoIterator for &'a BatchQueue {
    type Item = &'a InputFile;
    type IntoIter = std::slice::Iter<'a, InputFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/queue.rs"]
mod tests;
