//! Unix terminal input via termios.
//!
//! Raw mode here is narrower than `cfmakeraw`: only canonical line buffering and
//! echo are switched off, with `VMIN = 0` and `VTIME = 0` so a read returns at
//! once with whatever is pending. Output processing and signals are untouched.

use std::io;

use rustix::termios::{
    self, LocalModes, OptionalActions, QueueSelector, SpecialCodeIndex, Termios,
};

use crate::source::RawInputSource;
use crate::types::{Error, Result};

/// Standard input of the controlling terminal.
#[derive(Debug, Default)]
pub struct TtyInput {
    saved: Option<Termios>,
}

impl TtyInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raw(&self) -> bool {
        self.saved.is_some()
    }
}

impl RawInputSource for TtyInput {
    fn configure_raw_mode(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let original =
            termios::tcgetattr(&stdin).map_err(|e| Error::mode("tcgetattr", e.into()))?;

        let mut raw = original.clone();
        raw.local_modes.remove(LocalModes::ICANON | LocalModes::ECHO);
        raw.special_codes[SpecialCodeIndex::VMIN] = 0;
        raw.special_codes[SpecialCodeIndex::VTIME] = 0;

        termios::tcsetattr(&stdin, OptionalActions::Now, &raw)
            .map_err(|e| Error::mode("tcsetattr", e.into()))?;
        self.saved = Some(original);
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if let Some(original) = self.saved.take() {
            termios::tcsetattr(io::stdin(), OptionalActions::Now, &original)
                .map_err(|e| Error::mode("tcsetattr", e.into()))?;
        }
        Ok(())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        match rustix::io::read(io::stdin(), buf) {
            Ok(n) => Ok(n),
            Err(e) if e == rustix::io::Errno::INTR => Ok(0),
            Err(e) => Err(Error::read(e.into())),
        }
    }

    fn discard_pending(&mut self) -> Result<()> {
        termios::tcflush(io::stdin(), QueueSelector::IFlush)
            .map_err(|e| Error::mode("tcflush", e.into()))
    }
}

impl Drop for TtyInput {
    fn drop(&mut self) {
        if let Err(err) = self.restore_mode() {
            tracing::warn!(error = %err, "failed to restore terminal mode");
        }
    }
}
