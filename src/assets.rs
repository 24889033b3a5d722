pub mod color;
pub mod decode;

use std::path::Path;
use std::sync::Arc;

/// Source extensions accepted at intake (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["webp", "png", "jpg", "jpeg"];

/// A decoded source raster, ready for compositing.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Return `true` when `path` carries one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}
