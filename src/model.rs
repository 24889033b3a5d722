use crate::assets::color::Color;
use crate::foundation::error::{PadframeError, PadframeResult};

/// A named target output dimension.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormatSpec {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub label: String,
}

impl FormatSpec {
    pub fn new(id: impl Into<String>, width: u32, height: u32, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            label: label.into(),
        }
    }

    pub fn validate(&self) -> PadframeResult<()> {
        if self.id.trim().is_empty() {
            return Err(PadframeError::validation("format id must be non-empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(PadframeError::validation(format!(
                "format '{}' width/height must be > 0 (got {}x{})",
                self.id, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Process-wide style applied to every (file, format) pair in a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOptions {
    pub background_color: Color,
    pub apply_shadow: bool,
}

/// One encoded output for a (file, format) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputResult {
    pub format_id: String,
    pub file_name: String,
    /// JPEG byte stream.
    pub encoded_bytes: Vec<u8>,
}
