use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::unit_to_u8;

/// Straight-alpha color with normalized `0..1` channels.
///
/// Deserializes from `"#RRGGBB"` / `"#RRGGBBAA"`, `{r,g,b[,a]}`, `{h,s,l[,a]}` or a
/// `[r,g,b(,a)]` array. Serializes back to a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Quantize to premultiplied RGBA8, clamping every channel into `0..1` first.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let alpha = self.a.clamp(0.0, 1.0);
        let [r, g, b] = [self.r, self.g, self.b].map(|c| unit_to_u8(c.clamp(0.0, 1.0) * alpha));
        Rgba8Premul {
            r,
            g,
            b,
            a: unit_to_u8(alpha),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = (
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a),
        );
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn opaque() -> f64 {
    1.0
}

/// Every accepted input shape of a [`Color`].
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "opaque")]
        a: f64,
    },
    Hsl {
        h: f64,
        s: f64,
        l: f64,
        #[serde(default = "opaque")]
        a: f64,
    },
    Channels(Vec<f64>),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(text) => parse_hex(&text),
            ColorRepr::Rgb { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            ColorRepr::Hsl { h, s, l, a } => Ok(from_hsl(h, s, l).with_alpha(a)),
            ColorRepr::Channels(v) => match *v.as_slice() {
                [r, g, b] => Ok(Self::rgba(r, g, b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(format!(
                    "color array needs 3 or 4 channels, got {}",
                    v.len()
                )),
            },
        }
    }
}

fn parse_hex(text: &str) -> Result<Color, String> {
    let digits = text.trim().trim_start_matches('#');
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!(
            "invalid color \"{text}\": expected #RRGGBB or #RRGGBBAA"
        ));
    }

    let mut channels = [255u8; 4];
    for (slot, pair) in channels.iter_mut().zip(digits.as_bytes().chunks_exact(2)) {
        let pair = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
        *slot = u8::from_str_radix(pair, 16).map_err(|e| format!("invalid color \"{text}\": {e}"))?;
    }
    let [r, g, b, a] = channels.map(|c| f64::from(c) / 255.0);
    Ok(Color::rgba(r, g, b, a))
}

/// HSL to RGB through chroma. `h` is in degrees, `s` and `l` in `0..1`.
fn from_hsl(h: f64, s: f64, l: f64) -> Color {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    Color::rgba(r + m, g + m, b + m, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
