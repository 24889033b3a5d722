use crate::foundation::error::{PadframeError, PadframeResult};

const Q16_ONE: u32 = 1 << 16;

/// Normalized 1D Gaussian in Q16 fixed point. Weights always sum to exactly `1 << 16`.
struct GaussianKernel {
    weights: Vec<u32>,
    radius: usize,
}

impl GaussianKernel {
    fn new(radius: u32, sigma: f32) -> PadframeResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(PadframeError::validation("blur sigma must be > 0"));
        }
        let radius = radius as usize;
        let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
        let raw = (0..=2 * radius)
            .map(|i| {
                let d = i as f64 - radius as f64;
                (-(d * d) / two_sigma_sq).exp()
            })
            .collect::<Vec<f64>>();
        let total: f64 = raw.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(PadframeError::render("gaussian kernel sum is zero"));
        }

        let mut weights = raw
            .iter()
            .map(|w| ((w / total) * f64::from(Q16_ONE)).round() as u32)
            .collect::<Vec<u32>>();
        // Push the rounding residue into the center tap.
        let quantized: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let center = &mut weights[radius];
        *center = (i64::from(*center) + i64::from(Q16_ONE) - quantized).max(0) as u32;

        Ok(Self { weights, radius })
    }

    /// Convolve `lines` runs of `len` pixels. `step` is the pixel stride along a run and
    /// `line_step` the stride between run starts; edges are clamped.
    fn convolve(
        &self,
        src: &[u8],
        dst: &mut [u8],
        len: usize,
        lines: usize,
        step: usize,
        line_step: usize,
    ) {
        let last = len - 1;
        for line in 0..lines {
            let base = line * line_step;
            for i in 0..len {
                let mut acc = [0u64; 4];
                for (k, &w) in self.weights.iter().enumerate() {
                    let j = (i + k).saturating_sub(self.radius).min(last);
                    let p = (base + j * step) * 4;
                    for (a, &v) in acc.iter_mut().zip(&src[p..p + 4]) {
                        *a += u64::from(w) * u64::from(v);
                    }
                }
                let o = (base + i * step) * 4;
                for (d, a) in dst[o..o + 4].iter_mut().zip(acc) {
                    *d = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
                }
            }
        }
    }
}

/// Separable Gaussian blur over a premultiplied RGBA8 buffer with clamp-to-edge sampling.
///
/// A constant image comes back unchanged. `radius == 0` is a copy.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> PadframeResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let len = w
        .checked_mul(h)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(|| PadframeError::render("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(PadframeError::render(format!(
            "blur source is {} bytes, expected {len} for {width}x{height}",
            src.len()
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = GaussianKernel::new(radius, sigma)?;
    let mut rows = vec![0u8; len];
    let mut out = vec![0u8; len];
    kernel.convolve(src, &mut rows, w, h, 1, w);
    kernel.convolve(&rows, &mut out, h, w, w, 1);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
