//! Color model: hex parsing, HSL conversion and per-shape color adjustment.
//!
//! Colors live in HSL while shapes are lit and only resolve to RGBA at the
//! surface. Hue is carried in degrees and is never normalized here; saturation
//! and lightness are percentages.
use std::fmt;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::random;

/// Maximum hue and saturation jitter applied per shape, in degrees and percent.
pub const VARIATION_JITTER: f32 = 3.0;

/// Lightness removed from the base color before computing stroke colors.
pub const STROKE_DARKEN: f32 = 20.0;

/// A color in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees. Not normalized; may leave 0..360 after jitter.
    pub h: f32,
    /// Saturation in percent.
    pub s: f32,
    /// Lightness in percent.
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Parse a 6-digit hex color (leading `#` optional) into HSL.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor { input: hex.into() });
        }

        let channel = |range: std::ops::Range<usize>| -> Result<f32> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| Error::InvalidColor { input: hex.into() })
        };
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;

        Ok(Self::from_rgb(r, g, b))
    }

    /// Convert normalized RGB channels into HSL.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        let h = sector / 6.0;

        Self::new(h * 360.0, s * 100.0, l * 100.0)
    }

    /// Same hue and saturation with lightness reduced by `amount`, floored at 0.
    pub fn darkened(self, amount: f32) -> Self {
        Self {
            l: (self.l - amount).max(0.0),
            ..self
        }
    }

    /// Resolve to opaque 8-bit RGBA.
    ///
    /// Hue wraps into [0, 360) and saturation/lightness clamp to [0, 100] before
    /// the standard HSL to RGB conversion.
    pub fn to_rgba8(self) -> [u8; 4] {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_u8(r), to_u8(g), to_u8(b), 255]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Jitter hue and saturation by an independent draw in [-3, 3]; lightness is kept.
pub fn create_color_variation(base: Hsl, rng: &mut dyn RngCore) -> Hsl {
    let h = base.h + random::range(rng, -VARIATION_JITTER, VARIATION_JITTER);
    let s = base.s + random::range(rng, -VARIATION_JITTER, VARIATION_JITTER);
    Hsl::new(h, s, base.l)
}

/// Per-shape color: a fresh variation of `base` whose lightness is scaled by
/// height (0.3..1.0) and light intensity (0.5..1.0), capped at 100.
pub fn adjust_color(base: Hsl, height: f32, light_intensity: f32, rng: &mut dyn RngCore) -> Hsl {
    let variation = create_color_variation(base, rng);
    let l = (variation.l * (0.3 + height * 0.7) * (0.5 + light_intensity * 0.5)).min(100.0);
    Hsl { l, ..variation }
}

/// Base color used for outlines: 20 points darker than the fill base.
pub fn stroke_base(base: Hsl) -> Hsl {
    base.darkened(STROKE_DARKEN)
}
