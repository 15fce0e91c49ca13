//! Terminal input module (engine-facing).
//!
//! Terminals do not report key releases, so this crate derives them. Every poll
//! reads whatever raw bytes arrived since the last one, decodes them into engine
//! key codes, and diffs that set of "held" keys against the previous poll's set:
//! keys that appeared are pressed, keys that disappeared are released.
//!
//! Raw capture goes through the [`RawInputSource`] capability so the derivation
//! runs the same against a real terminal, a console, or a scripted replay.

pub mod decode;
pub mod deriver;
pub mod source;

#[cfg(unix)]
pub mod tty;

#[cfg(any(not(unix), test))]
pub mod console;

pub use doomgeneric_tty_types as types;

pub use decode::{decode_key, Keys};
pub use deriver::{HeldKeys, InputDeriver};
pub use source::{RawInputSource, RawModeScope, ScriptedInput};

#[cfg(unix)]
pub use tty::TtyInput as PlatformInput;

#[cfg(not(unix))]
pub use console::ConsoleInput as PlatformInput;
