pub mod blur;
pub mod composite;
pub mod compositor;
pub mod layout;
pub mod surface;

use crate::assets::color::Color;
use crate::foundation::core::Vec2;
use crate::foundation::error::{PadframeError, PadframeResult};

/// Default fraction of each output dimension kept empty on each side.
pub const DEFAULT_PADDING_RATIO: f64 = 0.05;
/// Default JPEG quality on a `0..1` scale.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.95;

/// Drop shadow drawn under the image layer when [`crate::StyleOptions::apply_shadow`] is set.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowOpts {
    /// Blur amount in canvas pixels, interpreted like a 2D canvas `shadowBlur`.
    pub blur_px: f32,
    /// Shadow displacement; negative `y` moves the shadow up.
    pub offset: Vec2,
    pub color: Color,
}

impl Default for ShadowOpts {
    fn default() -> Self {
        Self {
            blur_px: 20.0,
            offset: Vec2::new(10.0, -10.0),
            color: Color::BLACK.with_alpha(0.4),
        }
    }
}

impl ShadowOpts {
    /// Gaussian standard deviation for the blur (half the blur amount).
    pub fn sigma(&self) -> f32 {
        (self.blur_px / 2.0).max(0.0)
    }

    /// Kernel half-width covering three standard deviations.
    pub fn kernel_radius(&self) -> u32 {
        (self.sigma() * 3.0).ceil() as u32
    }
}

/// Render constants shared by every (file, format) pair in a run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Applied symmetrically to both axes; must be in `[0, 0.5)`.
    pub padding_ratio: f64,
    /// `0..1` quality; mapped onto the encoder's `1..=100` scale.
    pub jpeg_quality: f32,
    pub shadow: ShadowOpts,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            padding_ratio: DEFAULT_PADDING_RATIO,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            shadow: ShadowOpts::default(),
        }
    }
}

impl RenderOpts {
    pub fn validate(&self) -> PadframeResult<()> {
        if !self.padding_ratio.is_finite() || !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(PadframeError::validation(format!(
                "padding_ratio must be in [0, 0.5) (got {})",
                self.padding_ratio
            )));
        }
        if !self.jpeg_quality.is_finite() || self.jpeg_quality <= 0.0 || self.jpeg_quality > 1.0 {
            return Err(PadframeError::validation(format!(
                "jpeg_quality must be in (0, 1] (got {})",
                self.jpeg_quality
            )));
        }
        if !self.shadow.blur_px.is_finite() || self.shadow.blur_px < 0.0 {
            return Err(PadframeError::validation("shadow blur_px must be >= 0"));
        }
        if !self.shadow.offset.is_finite() {
            return Err(PadframeError::validation("shadow offset must be finite"));
        }
        Ok(())
    }
}
