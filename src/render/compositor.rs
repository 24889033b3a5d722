//! Pure per-(image, format) render: fill, contain-fit, optional drop shadow, JPEG encode.
//!
//! Every call allocates its own canvas; nothing is shared between invocations.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use tracing::debug;

use crate::assets::DecodedImage;
use crate::encode::jpeg::encode_jpeg;
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{PadframeError, PadframeResult};
use crate::foundation::math::mul_div255_u8;
use crate::model::{FormatSpec, OutputResult, StyleOptions};
use crate::render::blur::blur_rgba8_premul;
use crate::render::composite::{blit_over, clamp_premul_in_place, fill};
use crate::render::layout::{PixelRect, contain_placement};
use crate::render::surface::alloc_rgba8;
use crate::render::{RenderOpts, ShadowOpts};

/// Composite `image` onto a `format`-sized canvas and return the premultiplied pixels.
#[tracing::instrument(skip_all, fields(format_id = %format.id, width = format.width, height = format.height))]
pub fn compose(
    image: &DecodedImage,
    format: &FormatSpec,
    style: &StyleOptions,
    opts: &RenderOpts,
) -> PadframeResult<FrameRGBA> {
    format.validate()?;
    if image.width == 0 || image.height == 0 {
        return Err(PadframeError::render("source image has empty dimensions"));
    }

    let mut canvas = alloc_rgba8(format.width, format.height)?;
    fill(&mut canvas, style.background_color.to_rgba8_premul());

    let placement = contain_placement(
        image.width,
        image.height,
        format.width,
        format.height,
        opts.padding_ratio,
    );
    let dest = placement.pixel_rect();
    debug!(
        scale = placement.scale,
        x = dest.x,
        y = dest.y,
        w = dest.width,
        h = dest.height,
        "placed image"
    );

    let layer = resample(image, dest.width, dest.height)?;
    if style.apply_shadow {
        draw_shadow(
            &mut canvas,
            format.width,
            format.height,
            &layer,
            dest,
            &opts.shadow,
        )?;
    }
    blit_over(
        &mut canvas,
        format.width,
        format.height,
        &layer,
        dest.width,
        dest.height,
        dest.x,
        dest.y,
        1.0,
    )?;

    Ok(FrameRGBA {
        width: format.width,
        height: format.height,
        data: canvas,
    })
}

/// Composite and encode one output as JPEG bytes.
pub fn render(
    image: &DecodedImage,
    format: &FormatSpec,
    style: &StyleOptions,
    opts: &RenderOpts,
) -> PadframeResult<Vec<u8>> {
    let frame = compose(image, format, style, opts)?;
    encode_jpeg(&frame, opts.jpeg_quality)
}

/// [`render`] plus the output naming convention, packaged as an [`OutputResult`].
pub fn render_output(
    source_name: &str,
    image: &DecodedImage,
    format: &FormatSpec,
    style: &StyleOptions,
    opts: &RenderOpts,
) -> PadframeResult<OutputResult> {
    let encoded_bytes = render(image, format, style, opts)?;
    Ok(OutputResult {
        format_id: format.id.clone(),
        file_name: output_file_name(source_name, format),
        encoded_bytes,
    })
}

/// `{base}_{width}x{height}.jpg`, where `base` drops the last `.ext` segment of `source_name`.
pub fn output_file_name(source_name: &str, format: &FormatSpec) -> String {
    format!(
        "{}_{}x{}.jpg",
        source_base_name(source_name),
        format.width,
        format.height
    )
}

/// Text before the last `.`; names without a dot are kept whole.
pub fn source_base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Lanczos3-scale the source to `width x height`. A same-size request borrows the source.
fn resample(image: &DecodedImage, width: u32, height: u32) -> PadframeResult<Cow<'_, [u8]>> {
    if width == image.width && height == image.height {
        return Ok(Cow::Borrowed(image.rgba8_premul.as_slice()));
    }

    let src = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_slice(),
    )
    .ok_or_else(|| PadframeError::render("decoded buffer does not match its dimensions"))?;

    let mut out = imageops::resize(&src, width, height, FilterType::Lanczos3).into_raw();
    clamp_premul_in_place(&mut out);
    Ok(Cow::Owned(out))
}

/// Blur a tinted copy of the layer's alpha and composite it under where the layer will land.
fn draw_shadow(
    canvas: &mut [u8],
    canvas_w: u32,
    canvas_h: u32,
    layer: &[u8],
    dest: PixelRect,
    shadow: &ShadowOpts,
) -> PadframeResult<()> {
    let color = shadow.color.to_rgba8_premul().to_array();
    if color[3] == 0 {
        return Ok(());
    }

    // The mask carries a transparent margin of one kernel radius so the blur can spread
    // past the layer bounds.
    let pad = shadow.kernel_radius();
    let grow = pad
        .checked_mul(2)
        .ok_or_else(|| PadframeError::render("shadow margin overflow"))?;
    let mask_w = dest
        .width
        .checked_add(grow)
        .ok_or_else(|| PadframeError::render("shadow mask width overflow"))?;
    let mask_h = dest
        .height
        .checked_add(grow)
        .ok_or_else(|| PadframeError::render("shadow mask height overflow"))?;
    let mut mask = alloc_rgba8(mask_w, mask_h)?;

    let row_bytes = dest.width as usize * 4;
    for (y, row) in layer.chunks_exact(row_bytes).enumerate() {
        let row_start = ((y + pad as usize) * mask_w as usize + pad as usize) * 4;
        for (x, px) in row.chunks_exact(4).enumerate() {
            let a = u16::from(px[3]);
            let d = row_start + x * 4;
            for c in 0..4 {
                mask[d + c] = mul_div255_u8(u16::from(color[c]), a);
            }
        }
    }

    let blurred = blur_rgba8_premul(&mask, mask_w, mask_h, pad, shadow.sigma())?;
    let x = dest.x + shadow.offset.x.round() as i64 - i64::from(pad);
    let y = dest.y + shadow.offset.y.round() as i64 - i64::from(pad);
    blit_over(canvas, canvas_w, canvas_h, &blurred, mask_w, mask_h, x, y, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
