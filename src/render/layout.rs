use crate::foundation::core::{Rect, Vec2};

/// Contain-fit placement of a source image inside a padded output canvas.
///
/// `rect` is exact (fractional) canvas space; [`Placement::pixel_rect`] snaps it for the blit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Uniform scale applied to both source dimensions.
    pub scale: f64,
    pub rect: Rect,
}

/// Whole-pixel destination rectangle for a scaled blit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn draw_width(&self) -> f64 {
        self.rect.width()
    }

    pub fn draw_height(&self) -> f64 {
        self.rect.height()
    }

    /// Top-left corner of the drawn image.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.rect.x0, self.rect.y0)
    }

    /// Snap edges to the nearest pixel, never collapsing below 1x1.
    pub fn pixel_rect(&self) -> PixelRect {
        let x0 = self.rect.x0.round();
        let y0 = self.rect.y0.round();
        let x1 = self.rect.x1.round();
        let y1 = self.rect.y1.round();
        PixelRect {
            x: x0 as i64,
            y: y0 as i64,
            width: ((x1 - x0).max(1.0)) as u32,
            height: ((y1 - y0).max(1.0)) as u32,
        }
    }
}

/// Compute the centered contain placement of a `src_w x src_h` image on a
/// `canvas_w x canvas_h` canvas with `padding_ratio` margin on every side.
///
/// Callers guarantee non-zero source dimensions and a ratio in `[0, 0.5)`.
pub fn contain_placement(
    src_w: u32,
    src_h: u32,
    canvas_w: u32,
    canvas_h: u32,
    padding_ratio: f64,
) -> Placement {
    let (cw, ch) = (f64::from(canvas_w), f64::from(canvas_h));
    let padding_x = cw * padding_ratio;
    let padding_y = ch * padding_ratio;
    let avail_w = cw - 2.0 * padding_x;
    let avail_h = ch - 2.0 * padding_y;

    let scale = (avail_w / f64::from(src_w)).min(avail_h / f64::from(src_h));
    let draw_w = f64::from(src_w) * scale;
    let draw_h = f64::from(src_h) * scale;

    let offset_x = (cw - draw_w) / 2.0;
    let offset_y = (ch - draw_h) / 2.0;

    Placement {
        scale,
        rect: Rect::new(offset_x, offset_y, offset_x + draw_w, offset_y + draw_h),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
