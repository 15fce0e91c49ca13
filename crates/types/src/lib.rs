//! Shared types for the terminal backend.
//!
//! Everything in here is plain data: pixels and the pixel grid the engine draws
//! into, the engine's key codes, key events, and the constants that size the
//! backend's fixed buffers. The error type lives here too so that every crate in
//! the workspace reports failures the same way.
//!
//! # Buffer Sizing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_RESX` | 320 | Engine framebuffer width in pixels |
//! | `DEFAULT_RESY` | 200 | Engine framebuffer height in pixels |
//! | `HELD_KEY_CAPACITY` | 15 | Raw bytes read per poll, and held keys per generation |
//! | `EVENT_QUEUE_CAPACITY` | 31 | Events produced by a single poll |
//!
//! # Key Codes
//!
//! Printable keys travel as their lower-cased ASCII byte. The named keys use the
//! engine's own numbering:
//!
//! | Key | Code |
//! |-----|------|
//! | Enter | 13 |
//! | Escape | 27 |
//! | Left arrow | `0xAC` |
//! | Up arrow | `0xAD` |
//! | Right arrow | `0xAE` |
//! | Down arrow | `0xAF` |
//! | Fire (space) | `0x9D` |
//!
//! # Examples
//!
//! ```
//! use doomgeneric_tty_types::{Direction, KeyCode, KeyEvent, Pixel, Rgb};
//!
//! let px = Pixel::from_packed(0xFF_FF_00_00);
//! assert_eq!(px.rgb(), Rgb::new(255, 0, 0));
//!
//! assert_eq!(KeyCode::from_ascii(b'W'), KeyCode(b'w'));
//!
//! let ev = KeyEvent::new(Direction::Pressed, KeyCode::ENTER);
//! assert_eq!(ev.packed(), 0x0100 | 13);
//! ```

use std::fmt;
use std::io;

/// Engine framebuffer width in pixels.
pub const DEFAULT_RESX: u16 = 320;

/// Engine framebuffer height in pixels.
pub const DEFAULT_RESY: u16 = 200;

/// Maximum number of raw input bytes consumed per poll.
///
/// Every decoded key consumes at least one byte, so this also bounds the size of
/// one held-key generation.
pub const HELD_KEY_CAPACITY: usize = 15;

/// Maximum number of events a single poll can produce.
///
/// Both generations are sized from the same 16-slot raw buffer (15 bytes plus a
/// terminator slot), and the queue keeps one slot per generation slot minus the
/// terminator.
pub const EVENT_QUEUE_CAPACITY: usize = 2 * (HELD_KEY_CAPACITY + 1) - 1;

/// Brightness ramp, darkest to brightest.
pub const GLYPH_RAMP: &[u8; 7] = b" .-+1x@";

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of the three channels (0..=765).
    #[inline]
    pub const fn sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

/// One engine pixel: four 8-bit channels, the last one unused.
///
/// The field order matches the engine's in-memory layout (a little-endian
/// `0xAARRGGBB` word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 0 }
    }

    /// Unpack a `0xAARRGGBB` word.
    pub const fn from_packed(word: u32) -> Self {
        Self {
            b: word as u8,
            g: (word >> 8) as u8,
            r: (word >> 16) as u8,
            a: (word >> 24) as u8,
        }
    }

    pub const fn packed(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Color channels without the alpha byte.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Pixel {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b)
    }
}

/// Row-major grid of engine pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); len],
        }
    }

    /// Wrap existing pixels. Returns `None` when the length does not match.
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<Pixel>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Pixel> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u16, y: u16, pixel: Pixel) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = pixel;
        }
    }

    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels.fill(pixel);
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // `chunks_exact(0)` panics; an empty grid has no rows anyway.
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }
}

/// Engine key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const LEFT_ARROW: KeyCode = KeyCode(0xAC);
    pub const UP_ARROW: KeyCode = KeyCode(0xAD);
    pub const RIGHT_ARROW: KeyCode = KeyCode(0xAE);
    pub const DOWN_ARROW: KeyCode = KeyCode(0xAF);
    /// Right ctrl in the engine's numbering; the terminal sends it as a space.
    pub const FIRE: KeyCode = KeyCode(0x80 + 0x1D);

    /// A plain character key. ASCII letters are lower-cased, every other byte is
    /// used unchanged.
    pub const fn from_ascii(byte: u8) -> Self {
        KeyCode(byte.to_ascii_lowercase())
    }

    pub const fn code(self) -> u8 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            KeyCode::ENTER => f.write_str("enter"),
            KeyCode::ESCAPE => f.write_str("escape"),
            KeyCode::LEFT_ARROW => f.write_str("left"),
            KeyCode::UP_ARROW => f.write_str("up"),
            KeyCode::RIGHT_ARROW => f.write_str("right"),
            KeyCode::DOWN_ARROW => f.write_str("down"),
            KeyCode::FIRE => f.write_str("fire"),
            KeyCode(c) if c.is_ascii_graphic() => write!(f, "'{}'", c as char),
            KeyCode(c) => write!(f, "0x{c:02x}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Pressed,
    Released,
}

/// A discrete key transition produced by one input poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub direction: Direction,
    pub key: KeyCode,
}

impl KeyEvent {
    pub const fn new(direction: Direction, key: KeyCode) -> Self {
        Self { direction, key }
    }

    pub const fn pressed(key: KeyCode) -> Self {
        Self::new(Direction::Pressed, key)
    }

    pub const fn released(key: KeyCode) -> Self {
        Self::new(Direction::Released, key)
    }

    pub const fn is_pressed(self) -> bool {
        matches!(self.direction, Direction::Pressed)
    }

    /// Engine wire form: `pressed << 8 | key`.
    pub const fn packed(self) -> u16 {
        (self.is_pressed() as u16) << 8 | self.key.0 as u16
    }
}

/// Backend failure. None of these are recoverable; see `doomgeneric-tty-backend`
/// for the fatal-error policy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("write to terminal failed: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
    #[error("read from terminal failed: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("{op} failed: {source}")]
    TerminalMode {
        op: &'static str,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn write(source: io::Error) -> Self {
        Error::Write { source }
    }

    pub fn read(source: io::Error) -> Self {
        Error::Read { source }
    }

    pub fn mode(op: &'static str, source: io::Error) -> Self {
        Error::TerminalMode { op, source }
    }

    fn io(&self) -> &io::Error {
        match self {
            Error::Write { source } | Error::Read { source } => source,
            Error::TerminalMode { source, .. } => source,
        }
    }

    /// Raw OS error code, when the failure came from a syscall.
    pub fn os_code(&self) -> Option<i32> {
        self.io().raw_os_error()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_packing_matches_engine_layout() {
        let px = Pixel::from_packed(0x80_11_22_33);
        assert_eq!((px.r, px.g, px.b, px.a), (0x11, 0x22, 0x33, 0x80));
        assert_eq!(px.packed(), 0x80_11_22_33);
        assert_eq!(px.rgb(), Rgb::new(0x11, 0x22, 0x33));
    }

    #[test]
    fn pixel_buffer_bounds() {
        let mut fb = PixelBuffer::new(3, 2);
        fb.set(2, 1, Pixel::new(1, 2, 3));
        fb.set(3, 0, Pixel::new(9, 9, 9));
        assert_eq!(fb.get(2, 1), Some(Pixel::new(1, 2, 3)));
        assert_eq!(fb.get(3, 0), None);
        assert_eq!(fb.rows().count(), 2);
        assert_eq!(fb.as_slice()[5], Pixel::new(1, 2, 3));
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(PixelBuffer::from_pixels(2, 2, vec![Pixel::default(); 3]).is_none());
        assert!(PixelBuffer::from_pixels(2, 2, vec![Pixel::default(); 4]).is_some());
    }

    #[test]
    fn key_codes() {
        assert_eq!(KeyCode::from_ascii(b'Q'), KeyCode(b'q'));
        assert_eq!(KeyCode::from_ascii(b'1'), KeyCode(b'1'));
        assert_eq!(KeyCode::FIRE.code(), 0x9D);
        assert_eq!(KeyCode::UP_ARROW.to_string(), "up");
        assert_eq!(KeyCode(b'x').to_string(), "'x'");
    }

    #[test]
    fn packed_events() {
        assert_eq!(KeyEvent::pressed(KeyCode(b'a')).packed(), 0x0161);
        assert_eq!(KeyEvent::released(KeyCode(b'a')).packed(), 0x0061);
    }

    #[test]
    fn error_reports_os_code() {
        let err = Error::mode("tcsetattr", io::Error::from_raw_os_error(25));
        assert_eq!(err.os_code(), Some(25));
        assert!(err.to_string().starts_with("tcsetattr failed"));
    }

    #[test]
    fn event_queue_fits_two_full_generations() {
        assert!(EVENT_QUEUE_CAPACITY >= 2 * HELD_KEY_CAPACITY);
    }
}
