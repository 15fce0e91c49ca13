//! Engine-facing backend context.
//!
//! The engine drives the backend through a fixed set of hooks, once per tick:
//!
//! | Hook | Method |
//! |------|--------|
//! | init | [`Backend::init`] |
//! | draw frame | [`Backend::draw_frame`] |
//! | read input | [`Backend::read_input`] |
//! | get key | [`Backend::pop_event`] / [`Backend::get_key`] |
//! | sleep | [`Backend::sleep_ms`] |
//! | get ticks | [`Backend::ticks_ms`] |
//! | set window title | [`Backend::set_window_title`] |
//!
//! All process-wide state (color state, output buffer, both held-key
//! generations, the event queue cursor) lives in the [`Backend`] value.
//!
//! # Example
//!
//! ```
//! use doomgeneric_tty_backend::{Backend, BackendConfig};
//! use doomgeneric_tty_backend::input::ScriptedInput;
//! use doomgeneric_tty_backend::types::{KeyCode, KeyEvent, Pixel};
//!
//! let config = BackendConfig { width: 2, height: 1, ..BackendConfig::default() };
//! let input = ScriptedInput::from_bursts([b"w"]);
//! let mut backend = Backend::with_io(config, input, Vec::new());
//!
//! backend.screen_mut().fill(Pixel::new(255, 0, 0));
//! backend.render().unwrap();
//! backend.poll().unwrap();
//! assert_eq!(backend.pop_event(), Some(KeyEvent::pressed(KeyCode(b'w'))));
//! assert_eq!(backend.pop_event(), None);
//! ```

pub mod backend;
pub mod config;
pub mod fatal;

pub use doomgeneric_tty_input as input;
pub use doomgeneric_tty_term as term;
pub use doomgeneric_tty_types as types;

pub use backend::Backend;
pub use config::BackendConfig;
pub use fatal::{fatal_message, OrFatal};
