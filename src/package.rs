//! Flatten completed outputs into named entries and hand them to an archive writer.

pub mod zip_writer;

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::batch::queue::BatchQueue;
use crate::foundation::error::PadframeResult;

/// One named byte buffer destined for the archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// Combines named entries into a single archive buffer.
pub trait ArchiveWriter {
    fn write_archive(&mut self, entries: &[ArchiveEntry<'_>]) -> PadframeResult<Vec<u8>>;
}

/// Every output of every `Completed` file, in queue then format order.
///
/// Names are passed through as-is; collisions are left to the writer.
pub fn collect_entries(queue: &BatchQueue) -> Vec<ArchiveEntry<'_>> {
    queue
        .iter()
        .filter_map(|file| file.results())
        .flatten()
        .map(|r| ArchiveEntry {
            file_name: &r.file_name,
            bytes: &r.encoded_bytes,
        })
        .collect()
}

/// Build an archive of all completed outputs.
///
/// Returns `Ok(None)` without calling `writer` when there is nothing to package.
pub fn package(
    queue: &BatchQueue,
    writer: &mut dyn ArchiveWriter,
) -> PadframeResult<Option<Vec<u8>>> {
    let entries = collect_entries(queue);
    if entries.is_empty() {
        info!("no completed outputs, skipping archive");
        return Ok(None);
    }
    let archive = writer.write_archive(&entries)?;
    info!(
        entries = entries.len(),
        bytes = archive.len(),
        "archive written"
    );
    Ok(Some(archive))
}

/// `processed_images_{unix_ms}.zip`
pub fn archive_file_name(unix_ms: u128) -> String {
    format!("processed_images_{unix_ms}.zip")
}

/// [`archive_file_name`] for the current wall-clock time.
pub fn default_archive_file_name() -> String {
    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    archive_file_name(unix_ms)
}

#[cfg(test)]
#[path = "../tests/unit/package.rs"]
mod tests;
