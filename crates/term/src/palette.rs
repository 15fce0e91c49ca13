//! Pixel to (glyph, color) quantization.
//!
//! Color goes through HSV: value picks the dim or bold family, saturation picks
//! gray versus a hue, and the hue falls into one of six 60° sectors centred on
//! the six standard terminal colors.

use crate::types::{Rgb, GLYPH_RAMP};

/// Value at or below which a pixel uses the dim family.
const DIM_VALUE_MAX: f32 = 0.3;

/// Saturation below which a pixel is rendered gray.
const GRAY_SATURATION_MAX: f32 = 0.5;

/// Hue (degrees, `[0, 360)`), saturation and value (`[0, 1]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f32 / 255.0;
        let g = rgb.g as f32 / 255.0;
        let b = rgb.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let h = if h < 0.0 { h + 360.0 } else { h };

        let s = if max == 0.0 { 0.0 } else { delta / max };

        Hsv { h, s, v: max }
    }
}

/// One of the seven 4-bit foreground colors the encoder uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
}

impl Tone {
    /// ASCII digit of the `3x` foreground code.
    const fn digit(self) -> u8 {
        match self {
            Tone::Red => b'1',
            Tone::Green => b'2',
            Tone::Yellow => b'3',
            Tone::Blue => b'4',
            Tone::Magenta => b'5',
            Tone::Cyan => b'6',
            Tone::Gray => b'7',
        }
    }

    fn from_hue(h: f32) -> Self {
        if !(30.0..330.0).contains(&h) {
            Tone::Red
        } else if h < 90.0 {
            Tone::Yellow
        } else if h < 150.0 {
            Tone::Green
        } else if h < 210.0 {
            Tone::Cyan
        } else if h < 270.0 {
            Tone::Blue
        } else {
            Tone::Magenta
        }
    }
}

/// Quantized SGR color: bold or normal intensity plus a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SgrColor {
    pub bold: bool,
    pub tone: Tone,
}

impl SgrColor {
    /// SGR parameter bytes, e.g. `1;31`.
    pub const fn code(self) -> [u8; 4] {
        [
            if self.bold { b'1' } else { b'0' },
            b';',
            b'3',
            self.tone.digit(),
        ]
    }
}

/// Classify a color into one of the 14 terminal color states.
pub fn classify(rgb: Rgb) -> SgrColor {
    let hsv = Hsv::from(rgb);
    let bold = hsv.v > DIM_VALUE_MAX;
    let tone = if hsv.s < GRAY_SATURATION_MAX {
        Tone::Gray
    } else {
        Tone::from_hue(hsv.h)
    };
    SgrColor { bold, tone }
}

/// Brightness glyph for a color. Depends only on `r + g + b`.
#[inline]
pub fn glyph_for(rgb: Rgb) -> u8 {
    // 766 keeps the index below the ramp length for pure white.
    GLYPH_RAMP[(rgb.sum() * GLYPH_RAMP.len() as u32 / 766) as usize]
}
