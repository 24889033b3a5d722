//! Sequential batch driver.
//!
//! Files are processed one at a time in queue order. A file's decode, render and encode
//! failures are recorded on that file and never stop the batch.

use tracing::{debug, info, warn};

use crate::assets::decode::decode_image;
use crate::batch::format::FormatList;
use crate::batch::queue::{BatchQueue, FileId, FileStatus, StatusKind};
use crate::foundation::error::PadframeResult;
use crate::model::{FormatSpec, OutputResult, StyleOptions};
use crate::render::RenderOpts;
use crate::render::compositor::render_output;

/// Progress notification emitted by [`Orchestrator::run_with_progress`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    FileStarted {
        id: FileId,
        name: String,
        /// 1-based position in the queue.
        position: usize,
        total: usize,
    },
    FileFinished {
        id: FileId,
        name: String,
        position: usize,
        total: usize,
        status: StatusKind,
    },
}

/// Outcome counts of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    /// Files moved through `Processing` in this run.
    pub processed: usize,
    pub completed: usize,
    pub failed: usize,
    /// Files already `Completed` before the run started.
    pub skipped: usize,
}

/// Batch driver holding a snapshot of the formats, style and render constants for a run.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    formats: Vec<FormatSpec>,
    style: StyleOptions,
    opts: RenderOpts,
}

impl Orchestrator {
    /// Snapshot `formats` so later edits to the list cannot affect this orchestrator.
    pub fn new(formats: &FormatList, style: StyleOptions, opts: RenderOpts) -> PadframeResult<Self> {
        opts.validate()?;
        Ok(Self {
            formats: formats.as_slice().to_vec(),
            style,
            opts,
        })
    }

    pub fn formats(&self) -> &[FormatSpec] {
        &self.formats
    }

    pub fn run(&self, queue: &mut BatchQueue) -> RunSummary {
        self.run_with_progress(queue, |_| {})
    }

    /// Process every non-`Completed` file, reporting start/finish of each file.
    #[tracing::instrument(skip_all, fields(files = queue.len(), formats = self.formats.len()))]
    pub fn run_with_progress(
        &self,
        queue: &mut BatchQueue,
        mut on_progress: impl FnMut(&ProgressEvent),
    ) -> RunSummary {
        let total = queue.len();
        let mut summary = RunSummary::default();
        info!("processing batch of {} files", total);

        for (idx, file) in queue.files_mut().iter_mut().enumerate() {
            let position = idx + 1;
            if file.status.is_completed() {
                debug!(id = %file.id(), file_name = file.name(), "already completed, skipping");
                summary.skipped += 1;
                continue;
            }

            file.status = FileStatus::Processing;
            summary.processed += 1;
            on_progress(&ProgressEvent::FileStarted {
                id: file.id(),
                name: file.name().to_string(),
                position,
                total,
            });

            file.status = match self.process_file(file.name(), file.source_bytes()) {
                Ok(results) => {
                    debug!(
                        id = %file.id(),
                        file_name = file.name(),
                        outputs = results.len(),
                        "file completed"
                    );
                    summary.completed += 1;
                    FileStatus::Completed(results)
                }
                Err(e) => {
                    warn!(id = %file.id(), file_name = file.name(), "file failed: {e}");
                    summary.failed += 1;
                    FileStatus::Error(e.to_string())
                }
            };

            on_progress(&ProgressEvent::FileFinished {
                id: file.id(),
                name: file.name().to_string(),
                position,
                total,
                status: file.status.kind(),
            });
        }

        if summary.failed > 0 {
            warn!(
                "batch finished with {} failed files out of {} processed",
                summary.failed, summary.processed
            );
        } else {
            info!(
                "batch finished: {} completed, {} skipped",
                summary.completed, summary.skipped
            );
        }
        summary
    }

    /// Decode once and render every format in list order. All-or-nothing.
    pub fn process_file(&self, name: &str, source: &[u8]) -> PadframeResult<Vec<OutputResult>> {
        let image = decode_image(source)?;
        debug!(source = name, width = image.width, height = image.height, "decoded");

        self.formats
            .iter()
            .map(|format| render_output(name, &image, format, &self.style, &self.opts))
            .collect()
    }
}

/// Run one batch over `queue` with the given configuration.
///
/// Only fails when `opts` is invalid, before any file is touched.
pub fn run(
    queue: &mut BatchQueue,
    formats: &FormatList,
    style: &StyleOptions,
    opts: &RenderOpts,
) -> PadframeResult<RunSummary> {
    let orchestrator = Orchestrator::new(formats, *style, *opts)?;
    Ok(orchestrator.run(queue))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
