//! End-to-end frame encoding through the public renderer.

use doomgeneric_tty::term::{ColorMode, FrameEncoder, TerminalRenderer};
use doomgeneric_tty::types::{Pixel, PixelBuffer};

use proptest::prelude::*;

fn renderer(w: u16, h: u16) -> TerminalRenderer<Vec<u8>> {
    TerminalRenderer::with_sink(Vec::new(), FrameEncoder::new(w, h, ColorMode::Persistent))
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn color_escapes(bytes: &[u8]) -> usize {
    [&b"\x1b[0;3"[..], &b"\x1b[1;3"[..]]
        .iter()
        .map(|p| count(bytes, p))
        .sum()
}

#[test]
fn two_red_pixels() {
    let mut r = renderer(2, 1);
    let mut fb = PixelBuffer::new(2, 1);
    fb.fill(Pixel::new(255, 0, 0));
    r.draw(&fb).unwrap();

    let out = r.into_sink();
    let body = out
        .strip_prefix(b"\x1b[1;1H\x1b[2J\x1b[;H\x1b[1m".as_slice())
        .expect("clear, home and bold prefix");
    assert_eq!(body, b"\x1b[1;31m----\n\x1b[0m");
}

#[test]
fn identical_frames_share_one_color_escape() {
    let mut r = renderer(16, 10);
    let mut fb = PixelBuffer::new(16, 10);
    fb.fill(Pixel::new(30, 60, 200));

    r.draw(&fb).unwrap();
    let first_len = r.sink().len();
    r.draw(&fb).unwrap();

    let out = r.into_sink();
    assert_eq!(color_escapes(&out[..first_len]), 1);
    assert_eq!(color_escapes(&out[first_len..]), 0);
    assert_eq!(count(&out, b"\x1b[2J"), 1);
}

#[test]
fn frame_has_one_line_per_row_and_doubled_glyphs() {
    let (w, h) = (7, 3);
    let mut r = renderer(w, h);
    let mut fb = PixelBuffer::new(w, h);
    for x in 0..w {
        let v = (x as u32 * 255 / (w as u32 - 1)) as u8;
        for y in 0..h {
            fb.set(x, y, Pixel::new(v, v, v));
        }
    }
    r.draw(&fb).unwrap();

    let out = r.into_sink();
    let text: Vec<u8> = strip_escapes(&out);
    let lines: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();
    // trailing empty piece after the last newline
    assert_eq!(lines.len(), h as usize + 1);
    for line in &lines[..h as usize] {
        assert_eq!(line.len(), 2 * w as usize);
        assert_eq!(*line, b"  ..--++11xx@@".as_slice());
    }
}

fn strip_escapes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1b {
            // skip to the final byte of the CSI sequence
            i += 2;
            while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            i += 1;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

proptest! {
    #[test]
    fn glyph_ignores_channel_split(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let mut enc = FrameEncoder::new(1, 1, ColorMode::Persistent);
        let mut a = PixelBuffer::new(1, 1);
        a.fill(Pixel::new(r, g, b));
        let mut c = PixelBuffer::new(1, 1);
        c.fill(Pixel::new(b, r, g));

        let ga = strip_escapes(enc.encode(&a).unwrap());
        enc.recycle();
        let gc = strip_escapes(enc.encode(&c).unwrap());
        prop_assert_eq!(ga, gc);
    }

    #[test]
    fn encoded_size_stays_within_worst_case(pixels in proptest::collection::vec(any::<u32>(), 12)) {
        let fb = PixelBuffer::from_pixels(4, 3, pixels.into_iter().map(Pixel::from_packed).collect()).unwrap();
        let mut enc = FrameEncoder::new(4, 3, ColorMode::PerFrame);
        let len = enc.encode(&fb).unwrap().len();
        prop_assert!(len <= FrameEncoder::worst_case_len(4, 3));
    }
}
