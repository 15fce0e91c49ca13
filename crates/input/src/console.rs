//! Console input for platforms without termios.
//!
//! There is no byte stream to read here, so pending key-press events are drained
//! from crossterm and re-encoded as the bytes a VT terminal would have sent.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::source::RawInputSource;
use crate::types::{Error, Result};

#[derive(Debug, Default)]
pub struct ConsoleInput {
    raw: bool,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Bytes a VT terminal sends for this key; empty for keys it has no byte for.
fn key_bytes(code: KeyCode, modifiers: KeyModifiers, scratch: &mut [u8; 4]) -> &[u8] {
    match code {
        KeyCode::Char(c) if c.is_ascii() => {
            scratch[0] = if modifiers.contains(KeyModifiers::CONTROL) {
                control_byte(c as u8)
            } else {
                c as u8
            };
            // NUL would end the burst.
            if scratch[0] == 0 {
                return &[];
            }
            &scratch[..1]
        }
        KeyCode::Enter => b"\n",
        KeyCode::Tab => b"\t",
        KeyCode::Backspace => b"\x08",
        KeyCode::Esc => b"\x1b",
        KeyCode::Up => b"\x1b[A",
        KeyCode::Down => b"\x1b[B",
        KeyCode::Right => b"\x1b[C",
        KeyCode::Left => b"\x1b[D",
        _ => &[],
    }
}

/// Ctrl-letter and Ctrl-`@`..`_` fold into C0 control codes.
fn control_byte(c: u8) -> u8 {
    match c {
        b'a'..=b'z' | b'@'..=b'_' => c & 0x1f,
        _ => c,
    }
}

impl RawInputSource for ConsoleInput {
    fn configure_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode().map_err(|e| Error::mode("enable_raw_mode", e))?;
        self.raw = true;
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<()> {
        if self.raw {
            self.raw = false;
            terminal::disable_raw_mode().map_err(|e| Error::mode("disable_raw_mode", e))?;
        }
        Ok(())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut n = 0;
        let mut scratch = [0u8; 4];
        while n < buf.len() && event::poll(Duration::ZERO).map_err(Error::read)? {
            let Event::Key(key) = event::read().map_err(Error::read)? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let bytes = key_bytes(key.code, key.modifiers, &mut scratch);
            if n + bytes.len() > buf.len() {
                break;
            }
            buf[n..n + bytes.len()].copy_from_slice(bytes);
            n += bytes.len();
        }
        Ok(n)
    }
}

impl Drop for ConsoleInput {
    fn drop(&mut self) {
        if let Err(err) = self.restore_mode() {
            tracing::warn!(error = %err, "failed to restore console mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Keys;
    use crate::types::KeyCode as Key;

    fn bytes(code: KeyCode, modifiers: KeyModifiers) -> Vec<u8> {
        key_bytes(code, modifiers, &mut [0; 4]).to_vec()
    }

    #[test]
    fn editing_keys_match_the_tty_bytes() {
        assert_eq!(bytes(KeyCode::Tab, KeyModifiers::NONE), b"\t");
        assert_eq!(bytes(KeyCode::Backspace, KeyModifiers::NONE), b"\x08");
        assert_eq!(bytes(KeyCode::Enter, KeyModifiers::NONE), b"\n");
        assert_eq!(bytes(KeyCode::Left, KeyModifiers::NONE), b"\x1b[D");
        assert!(bytes(KeyCode::F(1), KeyModifiers::NONE).is_empty());
    }

    #[test]
    fn control_chords_become_c0_bytes() {
        assert_eq!(bytes(KeyCode::Char('c'), KeyModifiers::CONTROL), [0x03]);
        assert_eq!(bytes(KeyCode::Char('C'), KeyModifiers::CONTROL), [0x03]);
        assert_eq!(bytes(KeyCode::Char('['), KeyModifiers::CONTROL), [0x1b]);
        assert_eq!(bytes(KeyCode::Char('1'), KeyModifiers::CONTROL), b"1");
        assert!(bytes(KeyCode::Char('@'), KeyModifiers::CONTROL).is_empty());
        assert_eq!(bytes(KeyCode::Char('W'), KeyModifiers::SHIFT), b"W");
    }

    #[test]
    fn tab_decodes_to_the_same_key_as_on_a_tty() {
        let tab = bytes(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(Keys::new(&tab).collect::<Vec<_>>(), [Key(b'\t')]);
    }

    #[test]
    fn restore_without_raw_mode_is_a_no_op() {
        let mut input = ConsoleInput::new();
        assert!(input.restore_mode().is_ok());
    }
}
