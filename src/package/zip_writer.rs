use std::collections::HashMap;
use std::io::{Cursor, Write};

use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::foundation::error::{PadframeError, PadframeResult};
use crate::package::{ArchiveEntry, ArchiveWriter};

/// Flat ZIP archive writer (no directories).
///
/// A name that appears more than once keeps its last entry.
#[derive(Clone, Copy, Debug)]
pub struct ZipArchiveWriter {
    compression: CompressionMethod,
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipArchiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store entries uncompressed. JPEG payloads barely deflate.
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn write_archive(&mut self, entries: &[ArchiveEntry<'_>]) -> PadframeResult<Vec<u8>> {
        let mut last_index = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if last_index.insert(entry.file_name, idx).is_some() {
                warn!(
                    file_name = entry.file_name,
                    "duplicate archive entry, keeping the last one"
                );
            }
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.compression);
        for (idx, entry) in entries.iter().enumerate() {
            if last_index.get(entry.file_name) != Some(&idx) {
                continue;
            }
            zip.start_file(entry.file_name, options).map_err(|e| {
                PadframeError::archive(format!("start entry '{}': {e}", entry.file_name))
            })?;
            zip.write_all(entry.bytes).map_err(|e| {
                PadframeError::archive(format!("write entry '{}': {e}", entry.file_name))
            })?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| PadframeError::archive(format!("finish zip: {e}")))?;
        Ok(cursor.into_inner())
    }
}
