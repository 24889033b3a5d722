//! padframe batch-frames images into fixed output formats.
//!
//! Each source image is contain-fit onto a padded, solid-color canvas (optionally with a
//! soft drop shadow) and exported as JPEG, once per configured format:
//!
//! - Describe outputs with a [`FormatList`] (or load a [`Config`])
//! - Queue sources in a [`BatchQueue`] and drive them with [`Orchestrator`] / [`run`]
//! - Package completed outputs through an [`ArchiveWriter`] such as [`ZipArchiveWriter`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod batch;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod model;
pub mod package;
pub mod render;

pub use crate::assets::color::Color;
pub use crate::assets::decode::decode_image;
pub use crate::assets::{DecodedImage, SUPPORTED_EXTENSIONS, is_supported_extension};
pub use crate::batch::format::{FormatField, FormatList};
pub use crate::batch::orchestrator::{Orchestrator, ProgressEvent, RunSummary, run};
pub use crate::batch::queue::{BatchQueue, FileId, FileStatus, InputFile, StatusKind};
pub use crate::config::{Config, FormatDef};
pub use crate::encode::jpeg::encode_jpeg;
pub use crate::foundation::core::{FrameRGBA, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{PadframeError, PadframeResult};
pub use crate::model::{FormatSpec, OutputResult, StyleOptions};
pub use crate::package::zip_writer::ZipArchiveWriter;
pub use crate::package::{
    ArchiveEntry, ArchiveWriter, archive_file_name, collect_entries, default_archive_file_name,
    package,
};
pub use crate::render::compositor::{compose, output_file_name, render, render_output};
pub use crate::render::layout::{Placement, contain_placement};
pub use crate::render::{RenderOpts, ShadowOpts};
