//! Raw input capability.

use std::collections::VecDeque;
use std::io;

use crate::types::{Error, Result};

/// A terminal-like device that can be switched into raw mode and drained of
/// whatever bytes are pending.
pub trait RawInputSource {
    /// Switch to non-canonical, no-echo, non-blocking reads.
    fn configure_raw_mode(&mut self) -> Result<()>;

    /// Undo [`configure_raw_mode`](Self::configure_raw_mode).
    fn restore_mode(&mut self) -> Result<()>;

    /// Read up to `buf.len()` pending bytes without waiting for more.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Drop input left over past the read bound.
    fn discard_pending(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Raw mode held for the lifetime of the scope.
///
/// Dropping the scope restores the previous mode on every exit path, including
/// `?` returns and panics. Use [`finish`](Self::finish) on the success path to
/// see restore errors.
pub struct RawModeScope<'a, S: RawInputSource + ?Sized> {
    source: &'a mut S,
    active: bool,
}

impl<'a, S: RawInputSource + ?Sized> RawModeScope<'a, S> {
    pub fn acquire(source: &'a mut S) -> Result<Self> {
        source.configure_raw_mode()?;
        Ok(Self {
            source,
            active: true,
        })
    }

    pub fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.source.read_available(buf)
    }

    /// Restore the previous mode, reporting failure.
    pub fn finish(mut self) -> Result<()> {
        self.active = false;
        self.source.restore_mode()
    }
}

impl<S: RawInputSource + ?Sized> Drop for RawModeScope<'_, S> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = self.source.restore_mode() {
                tracing::warn!(error = %err, "failed to restore terminal mode");
            }
        }
    }
}

/// In-memory input: each read returns the next queued burst.
///
/// Useful for tests and for replaying recorded input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    bursts: VecDeque<Vec<u8>>,
    raw_mode: bool,
    configured: usize,
    restored: usize,
    discarded: usize,
    fail_read: Option<i32>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bursts<I, B>(bursts: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut input = Self::new();
        for burst in bursts {
            input.push(burst);
        }
        input
    }

    pub fn push(&mut self, burst: impl AsRef<[u8]>) {
        self.bursts.push_back(burst.as_ref().to_vec());
    }

    /// Make the next read fail with the given OS error code.
    pub fn fail_next_read(&mut self, os_code: i32) {
        self.fail_read = Some(os_code);
    }

    pub fn is_raw(&self) -> bool {
        self.raw_mode
    }

    /// Number of `(configure, restore)` calls seen.
    pub fn mode_switches(&self) -> (usize, usize) {
        (self.configured, self.restored)
    }

    /// Bytes dropped because a burst was longer than the read bound.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl RawInputSource for ScriptedInput {
    fn configure_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = true;
        self.configured += 1;
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        self.raw_mode = false;
        self.restored += 1;
        Ok(())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        if let Some(code) = self.fail_read.take() {
            return Err(Error::read(io::Error::from_raw_os_error(code)));
        }
        let Some(burst) = self.bursts.pop_front() else {
            return Ok(0);
        };
        let n = burst.len().min(buf.len());
        buf[..n].copy_from_slice(&burst[..n]);
        self.discarded += burst.len() - n;
        Ok(n)
    }
}
