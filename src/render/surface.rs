use crate::foundation::error::{PadframeError, PadframeResult};

/// Largest canvas side accepted by the renderer.
pub const MAX_SURFACE_SIDE: u32 = 32_767;
/// Largest canvas area (in pixels) accepted by the renderer.
pub const MAX_SURFACE_PIXELS: u64 = 268_435_456;

/// Byte length of a tightly packed RGBA8 surface, or `None` on overflow.
pub fn rgba8_byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
}

/// Allocate a zeroed (transparent) RGBA8 surface.
///
/// Fails with a render error instead of aborting when the dimensions exceed the surface limits
/// or the allocator refuses the request.
pub fn alloc_rgba8(width: u32, height: u32) -> PadframeResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(PadframeError::render(format!(
            "surface must be non-empty (got {width}x{height})"
        )));
    }
    if width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
        return Err(PadframeError::render(format!(
            "surface {width}x{height} exceeds max side {MAX_SURFACE_SIDE}"
        )));
    }
    if u64::from(width) * u64::from(height) > MAX_SURFACE_PIXELS {
        return Err(PadframeError::render(format!(
            "surface {width}x{height} exceeds max area {MAX_SURFACE_PIXELS}"
        )));
    }

    let len = rgba8_byte_len(width, height)
        .ok_or_else(|| PadframeError::render("surface byte length overflow"))?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        PadframeError::render(format!("allocate {width}x{height} surface: {e}"))
    })?;
    buf.resize(len, 0);
    Ok(buf)
}
