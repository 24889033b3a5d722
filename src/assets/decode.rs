use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageDecoder as _, ImageReader};

use crate::assets::DecodedImage;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PadframeError, PadframeResult};

/// Decode PNG/JPEG/WebP bytes into a premultiplied RGBA8 raster.
///
/// The container format is sniffed from the bytes, not taken from the file name. EXIF
/// orientation is applied, so width and height are the upright dimensions.
pub fn decode_image(bytes: &[u8]) -> PadframeResult<DecodedImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PadframeError::decode(format!("sniff image format: {e}")))?
        .into_decoder()
        .map_err(|e| PadframeError::decode(format!("open image decoder: {e}")))?;
    let orientation = decoder
        .orientation()
        .map_err(|e| PadframeError::decode(format!("read image orientation: {e}")))?;
    let mut dyn_img = DynamicImage::from_decoder(decoder)
        .map_err(|e| PadframeError::decode(format!("decode image from memory: {e}")))?;
    dyn_img.apply_orientation(orientation);

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PadframeError::decode(format!(
            "decoded image has empty dimensions {width}x{height}"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let premul = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
        px.copy_from_slice(&premul.to_array());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
