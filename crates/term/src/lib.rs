//! Terminal frame encoder.
//!
//! Turns the engine's RGB framebuffer into a stream of ANSI escapes and glyphs.
//! Each pixel becomes two identical glyphs picked from a brightness ramp (terminal
//! cells are roughly twice as tall as they are wide), colored with one of the
//! fourteen 4-bit SGR states chosen from the pixel's hue, saturation and value.
//!
//! Goals:
//! - Emit a color escape only when the color actually changes
//! - Build the whole frame in one reusable buffer and hand it to the terminal in
//!   a single write
//! - Keep encoding pure so it can be tested without a terminal

pub mod encoder;
pub mod palette;
pub mod renderer;

pub use doomgeneric_tty_types as types;

pub use encoder::{ColorMode, FrameEncoder};
pub use palette::{classify, glyph_for, Hsv, SgrColor, Tone};
pub use renderer::TerminalRenderer;
