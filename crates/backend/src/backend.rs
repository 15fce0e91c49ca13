//! The backend context value.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::BackendConfig;
use crate::fatal::OrFatal;
use crate::input::{InputDeriver, PlatformInput, RawInputSource};
use crate::term::{FrameEncoder, TerminalRenderer};
use crate::types::{Error, KeyEvent, PixelBuffer, Result};

/// Renderer, input deriver and timing state for one engine instance.
pub struct Backend<S: RawInputSource = PlatformInput, W: Write = io::Stdout> {
    config: BackendConfig,
    screen: PixelBuffer,
    renderer: TerminalRenderer<W>,
    input: InputDeriver,
    source: S,
    epoch: Instant,
}

impl Backend {
    /// Set up the backend on the process's own terminal.
    pub fn init(config: BackendConfig) -> Result<Self> {
        #[cfg(windows)]
        require_vt_processing(
            crossterm::ansi_support::supports_ansi(),
            io::Error::last_os_error,
        )?;

        tracing::debug!(
            width = config.width,
            height = config.height,
            color_mode = ?config.color_mode,
            "backend init"
        );
        Ok(Self::with_io(config, PlatformInput::new(), io::stdout()))
    }
}

/// Fail when the console cannot interpret escape sequences. `last_error` is
/// consulted only on failure; a zero code becomes `Unsupported`.
#[cfg_attr(not(windows), allow(dead_code))]
fn require_vt_processing(supported: bool, last_error: impl FnOnce() -> io::Error) -> Result<()> {
    if supported {
        return Ok(());
    }
    let err = last_error();
    let source = match err.raw_os_error() {
        Some(code) if code != 0 => err,
        _ => io::Error::new(
            io::ErrorKind::Unsupported,
            "console does not accept VT sequences",
        ),
    };
    Err(Error::mode("enable_vt_processing", source))
}

impl<S: RawInputSource, W: Write> Backend<S, W> {
    /// Backend over an arbitrary input source and output sink.
    pub fn with_io(config: BackendConfig, source: S, sink: W) -> Self {
        let encoder = FrameEncoder::new(config.width, config.height, config.color_mode);
        Self {
            config,
            screen: PixelBuffer::new(config.width, config.height),
            renderer: TerminalRenderer::with_sink(sink, encoder),
            input: InputDeriver::new(),
            source,
            epoch: Instant::now(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The pixel grid the engine draws into.
    pub fn screen(&self) -> &PixelBuffer {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut PixelBuffer {
        &mut self.screen
    }

    /// Encode and write the current screen.
    pub fn render(&mut self) -> Result<()> {
        self.renderer.draw(&self.screen)
    }

    /// Read pending input and rebuild the event queue. Returns the event count.
    pub fn poll(&mut self) -> Result<usize> {
        self.input.poll(&mut self.source)
    }

    /// Draw-frame hook: [`render`](Self::render), exiting the process on failure.
    pub fn draw_frame(&mut self) {
        self.render().or_fatal("draw_frame");
    }

    /// Read-input hook: [`poll`](Self::poll), exiting the process on failure.
    pub fn read_input(&mut self) {
        self.poll().or_fatal("read_input");
    }

    pub fn pop_event(&mut self) -> Option<KeyEvent> {
        self.input.pop_event()
    }

    /// Get-key hook in the engine's `(pressed, key)` form.
    pub fn get_key(&mut self) -> Option<(bool, u8)> {
        self.pop_event().map(|ev| (ev.is_pressed(), ev.key.code()))
    }

    pub fn sleep_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }

    /// Milliseconds since the backend was created. Wraps after ~49 days.
    pub fn ticks_ms(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }

    /// Terminals have no window title to set; accepted and ignored.
    pub fn set_window_title(&mut self, title: &str) {
        tracing::debug!(title, "window title ignored");
    }

    pub fn input(&self) -> &InputDeriver {
        &self.input
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    /// Reset terminal formatting and hand back the sink.
    pub fn shutdown(mut self) -> Result<W> {
        self.renderer.exit()?;
        Ok(self.renderer.into_sink())
    }
}
