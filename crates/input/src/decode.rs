//! Raw terminal bytes to engine key codes.

use crate::types::KeyCode;

const ESC: u8 = 0x1b;

/// Decode the key at the start of `bytes`.
///
/// Returns the number of bytes consumed and the key, or `None` at the end of
/// the burst (empty input or a NUL byte).
///
/// | Bytes | Key |
/// |-------|-----|
/// | `\n` | enter |
/// | `ESC [ A`..`ESC [ D` | up, down, right, left |
/// | `ESC [` + anything else | escape (both bytes consumed) |
/// | `ESC` | escape |
/// | space | fire |
/// | other | the byte, lower-cased |
pub fn decode_key(bytes: &[u8]) -> Option<(usize, KeyCode)> {
    match *bytes {
        [] | [0, ..] => None,
        [b'\n', ..] => Some((1, KeyCode::ENTER)),
        [ESC, b'[', b'A', ..] => Some((3, KeyCode::UP_ARROW)),
        [ESC, b'[', b'B', ..] => Some((3, KeyCode::DOWN_ARROW)),
        [ESC, b'[', b'C', ..] => Some((3, KeyCode::RIGHT_ARROW)),
        [ESC, b'[', b'D', ..] => Some((3, KeyCode::LEFT_ARROW)),
        [ESC, b'[', ..] => Some((2, KeyCode::ESCAPE)),
        [ESC, ..] => Some((1, KeyCode::ESCAPE)),
        [b' ', ..] => Some((1, KeyCode::FIRE)),
        [byte, ..] => Some((1, KeyCode::from_ascii(byte))),
    }
}

/// Iterator over the keys in a raw burst.
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Keys<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Keys<'_> {
    type Item = KeyCode;

    fn next(&mut self) -> Option<KeyCode> {
        let (used, key) = decode_key(&self.bytes[self.pos..])?;
        self.pos += used;
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(bytes: &[u8]) -> Vec<KeyCode> {
        Keys::new(bytes).collect()
    }

    #[test]
    fn arrows() {
        assert_eq!(keys(b"\x1b[A"), vec![KeyCode::UP_ARROW]);
        assert_eq!(keys(b"\x1b[B"), vec![KeyCode::DOWN_ARROW]);
        assert_eq!(keys(b"\x1b[C"), vec![KeyCode::RIGHT_ARROW]);
        assert_eq!(keys(b"\x1b[D"), vec![KeyCode::LEFT_ARROW]);
    }

    #[test]
    fn named_keys() {
        assert_eq!(keys(b"\n"), vec![KeyCode::ENTER]);
        assert_eq!(keys(b" "), vec![KeyCode::FIRE]);
        assert_eq!(keys(b"\x1b"), vec![KeyCode::ESCAPE]);
    }

    #[test]
    fn characters_are_lower_cased() {
        assert_eq!(keys(b"Wa1"), vec![KeyCode(b'w'), KeyCode(b'a'), KeyCode(b'1')]);
    }

    #[test]
    fn bare_escape_before_other_bytes() {
        assert_eq!(keys(b"\x1bq"), vec![KeyCode::ESCAPE, KeyCode(b'q')]);
        assert_eq!(keys(b"\x1b\x1b[A"), vec![KeyCode::ESCAPE, KeyCode::UP_ARROW]);
    }

    #[test]
    fn truncated_or_unknown_csi() {
        assert_eq!(decode_key(b"\x1b["), Some((2, KeyCode::ESCAPE)));
        assert_eq!(keys(b"\x1b[Zx"), vec![KeyCode::ESCAPE, KeyCode(b'z'), KeyCode(b'x')]);
    }

    #[test]
    fn nul_ends_the_burst() {
        let mut it = Keys::new(b"a\0b");
        assert_eq!(it.next(), Some(KeyCode(b'a')));
        assert_eq!(it.next(), None);
        assert_eq!(it.position(), 1);
    }

    #[test]
    fn mixed_burst() {
        assert_eq!(
            keys(b"\x1b[Cd \n"),
            vec![KeyCode::RIGHT_ARROW, KeyCode(b'd'), KeyCode::FIRE, KeyCode::ENTER]
        );
    }
}
