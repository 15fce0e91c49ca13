//! Terminal platform backend (workspace facade crate).
//!
//! Re-exports the workspace crates under short module names:
//! `types` (pixels, key codes, errors), `term` (frame encoder), `input`
//! (held-key event deriver) and `backend` (the engine hook context).

pub use doomgeneric_tty_backend as backend;
pub use doomgeneric_tty_input as input;
pub use doomgeneric_tty_term as term;
pub use doomgeneric_tty_types as types;

pub use backend::{Backend, BackendConfig};

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Stdout carries the frame stream, so logs never go there.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
