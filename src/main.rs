//! Terminal backend demo (default binary).
//!
//! Drives the backend the way an engine would: draw a frame, read input, drain
//! events, sleep until the next tick. The frame is a scrolling color ramp with a
//! square that the arrow keys (or WASD) move around. `q` or escape quits.
//!
//! Environment:
//! - `DG_TTY_WIDTH`, `DG_TTY_HEIGHT`, `DG_TTY_COLOR_MODE`: see `BackendConfig`
//! - `RUST_LOG`: log filter, logs go to stderr

use anyhow::Result;

use doomgeneric_tty::init_logging;
use doomgeneric_tty::types::{KeyCode, KeyEvent, Pixel, PixelBuffer};
use doomgeneric_tty::{Backend, BackendConfig};

/// Engine tick rate (35 Hz).
const TICK_MS: u32 = 1000 / 35;

const CURSOR_SIZE: u16 = 4;

#[derive(Debug, Default)]
struct Cursor {
    x: u16,
    y: u16,
    dx: i8,
    dy: i8,
}

impl Cursor {
    fn apply(&mut self, ev: KeyEvent) {
        let d: i8 = if ev.is_pressed() { 1 } else { -1 };
        match ev.key {
            KeyCode::LEFT_ARROW | KeyCode(b'a') => self.dx -= d,
            KeyCode::RIGHT_ARROW | KeyCode(b'd') => self.dx += d,
            KeyCode::UP_ARROW | KeyCode(b'w') => self.dy -= d,
            KeyCode::DOWN_ARROW | KeyCode(b's') => self.dy += d,
            _ => {}
        }
        self.dx = self.dx.clamp(-1, 1);
        self.dy = self.dy.clamp(-1, 1);
    }

    fn step(&mut self, width: u16, height: u16) {
        let max_x = width.saturating_sub(CURSOR_SIZE);
        let max_y = height.saturating_sub(CURSOR_SIZE);
        self.x = (self.x as i32 + self.dx as i32).clamp(0, max_x as i32) as u16;
        self.y = (self.y as i32 + self.dy as i32).clamp(0, max_y as i32) as u16;
    }
}

fn paint(screen: &mut PixelBuffer, ticks: u32, cursor: &Cursor) {
    let (w, h) = (screen.width().max(1) as u32, screen.height().max(1) as u32);
    let shift = ticks / 20;
    for y in 0..screen.height() {
        for x in 0..screen.width() {
            let r = ((x as u32 * 255 / w + shift) % 256) as u8;
            let g = (y as u32 * 255 / h) as u8;
            let b = 255 - r;
            screen.set(x, y, Pixel::new(r, g, b));
        }
    }
    for dy in 0..CURSOR_SIZE {
        for dx in 0..CURSOR_SIZE {
            screen.set(cursor.x + dx, cursor.y + dy, Pixel::new(255, 255, 255));
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let config = BackendConfig::from_env();
    let mut backend = Backend::init(config)?;
    let mut cursor = Cursor::default();

    'game: loop {
        let frame_start = backend.ticks_ms();

        paint(backend.screen_mut(), frame_start, &cursor);
        backend.draw_frame();

        backend.read_input();
        while let Some(ev) = backend.pop_event() {
            tracing::debug!(key = %ev.key, pressed = ev.is_pressed(), "key event");
            if ev.is_pressed() && matches!(ev.key, KeyCode::ESCAPE | KeyCode(b'q')) {
                break 'game;
            }
            cursor.apply(ev);
        }
        cursor.step(config.width, config.height);

        let spent = backend.ticks_ms().wrapping_sub(frame_start);
        backend.sleep_ms(TICK_MS.saturating_sub(spent));
    }

    backend.shutdown()?;
    Ok(())
}
