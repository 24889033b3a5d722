use image::codecs::jpeg::JpegEncoder;

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{PadframeError, PadframeResult};

/// Map a `0..1` quality factor onto the encoder's `1..=100` scale.
pub fn quality_to_percent(quality: f32) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a composited frame as baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(frame: &FrameRGBA, quality: f32) -> PadframeResult<Vec<u8>> {
    let rgb = image::RgbImage::from_raw(frame.width, frame.height, frame.to_rgb8())
        .ok_or_else(|| {
            PadframeError::encode(format!(
                "frame buffer does not match {}x{}",
                frame.width, frame.height
            ))
        })?;

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality_to_percent(quality))
        .encode_image(&rgb)
        .map_err(|e| PadframeError::encode(format!("encode jpeg: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
