//! Frame encoder: pixel grid to ANSI byte stream.
//!
//! Frame layout:
//!
//! ```text
//! [ESC[1;1H ESC[2J]      first frame only: home + clear
//! ESC[;H ESC[1m          home + bold
//! rows                   per pixel: [ESC[<b>;3<t>m] glyph glyph, then '\n' per row
//! ESC[0m                 reset
//! ```

use crossterm::{cursor, style::ResetColor, terminal, QueueableCommand};

use crate::palette::{classify, glyph_for};
use crate::types::{Error, PixelBuffer, Result, Rgb};

const HOME: &[u8] = b"\x1b[;H";

/// Written as bytes: crossterm formats `SetAttribute` through a `String`.
const BOLD: &[u8] = b"\x1b[1m";

/// Longest color escape: `ESC [ 1 ; 3 x m`.
const COLOR_ESCAPE_LEN: usize = 7;

/// Glyphs emitted per pixel.
const GLYPHS_PER_PIXEL: usize = 2;

/// `ESC[1;1H ESC[2J` + `ESC[;H ESC[1m` + `ESC[0m`.
const FRAMING_LEN: usize = 6 + 4 + 4 + 4 + 4;

/// How long the last emitted color is remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Remember the color across frames. Two identical frames in a row emit a
    /// single color escape in total.
    #[default]
    Persistent,
    /// Forget the color at the start of every frame, so each frame re-establishes
    /// its colors after the previous frame's trailing reset.
    PerFrame,
}

/// Encodes frames into a reusable buffer.
#[derive(Debug)]
pub struct FrameEncoder {
    buf: Vec<u8>,
    color: Option<Rgb>,
    first_frame: bool,
    mode: ColorMode,
}

impl FrameEncoder {
    pub fn new(width: u16, height: u16, mode: ColorMode) -> Self {
        Self {
            buf: Vec::with_capacity(Self::worst_case_len(width, height)),
            color: None,
            first_frame: true,
            mode,
        }
    }

    /// Bytes needed when every pixel changes color.
    pub fn worst_case_len(width: u16, height: u16) -> usize {
        let pixels = width as usize * height as usize;
        (COLOR_ESCAPE_LEN + GLYPHS_PER_PIXEL) * pixels + height as usize + FRAMING_LEN
    }

    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    /// Last emitted color, `None` before the first color escape.
    pub fn color_state(&self) -> Option<Rgb> {
        self.color
    }

    /// Encode one frame and return the bytes to write.
    ///
    /// The returned slice stays valid until the next call to `encode` or
    /// [`recycle`](Self::recycle).
    pub fn encode(&mut self, fb: &PixelBuffer) -> Result<&[u8]> {
        self.buf.clear();
        if self.mode == ColorMode::PerFrame {
            self.color = None;
        }

        if self.first_frame {
            self.first_frame = false;
            tracing::debug!(
                width = fb.width(),
                height = fb.height(),
                "first frame, clearing screen"
            );
            self.buf.queue(cursor::MoveTo(0, 0)).map_err(Error::write)?;
            self.buf
                .queue(terminal::Clear(terminal::ClearType::All))
                .map_err(Error::write)?;
        }

        self.buf.extend_from_slice(HOME);
        self.buf.extend_from_slice(BOLD);

        for row in fb.rows() {
            for pixel in row {
                let rgb = pixel.rgb();
                if self.color != Some(rgb) {
                    self.push_color(rgb);
                    self.color = Some(rgb);
                }
                let glyph = glyph_for(rgb);
                self.buf.extend_from_slice(&[glyph, glyph]);
            }
            self.buf.push(b'\n');
        }

        self.buf.queue(ResetColor).map_err(Error::write)?;
        Ok(&self.buf)
    }

    fn push_color(&mut self, rgb: Rgb) {
        self.buf.extend_from_slice(b"\x1b[");
        self.buf.extend_from_slice(&classify(rgb).code());
        self.buf.push(b'm');
    }

    /// Zero the bytes written by the last frame and empty the buffer, keeping the
    /// allocation.
    pub fn recycle(&mut self) {
        self.buf.fill(0);
        self.buf.clear();
    }
}
