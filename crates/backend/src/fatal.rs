//! Fatal-error policy.
//!
//! Nothing in the backend has a degraded mode: a terminal that cannot be written
//! to or read from ends the process. Hooks that the engine calls without a
//! `Result` go through [`OrFatal`].

use crate::types::{Error, Result};

/// Diagnostic line printed before exiting. OS failures already render as
/// `... (os error N)` through their `io::Error` source.
pub fn fatal_message(hook: &str, err: &Error) -> String {
    format!("{hook}: {err}")
}

fn die(hook: &'static str, err: &Error) -> ! {
    tracing::error!(hook, error = %err, os_code = ?err.os_code(), "fatal backend error");
    eprintln!("{}", fatal_message(hook, err));
    std::process::exit(1)
}

pub trait OrFatal<T> {
    /// Unwrap, or report the error against `hook` and exit with status 1.
    fn or_fatal(self, hook: &'static str) -> T;
}

impl<T> OrFatal<T> for Result<T> {
    fn or_fatal(self, hook: &'static str) -> T {
        match self {
            Ok(v) => v,
            Err(err) => die(hook, &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn message_includes_os_code() {
        let err = Error::mode("tcgetattr", io::Error::from_raw_os_error(25));
        let msg = fatal_message("read_input", &err);
        assert!(msg.starts_with("read_input: tcgetattr failed"));
        assert!(msg.ends_with("(os error 25)"));
        assert_eq!(msg.matches("os error").count(), 1, "{msg}");
    }

    #[test]
    fn message_without_os_code() {
        let err = Error::write(io::Error::new(io::ErrorKind::WriteZero, "short write"));
        assert_eq!(
            fatal_message("draw_frame", &err),
            "draw_frame: write to terminal failed: short write"
        );
    }

    #[test]
    fn ok_passes_through() {
        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.or_fatal("test"), 7);
    }
}
