//! TerminalRenderer: flushes encoded frames to a terminal.
//!
//! One `write_all` per frame. Any write failure is returned to the caller; the
//! backend treats it as fatal.

use std::io::{self, Write};

use crossterm::{style::ResetColor, QueueableCommand};

use crate::encoder::{ColorMode, FrameEncoder};
use crate::types::{Error, PixelBuffer, Result};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    sink: W,
    encoder: FrameEncoder,
    frames: u64,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new(width: u16, height: u16, mode: ColorMode) -> Self {
        Self::with_sink(io::stdout(), FrameEncoder::new(width, height, mode))
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_sink(sink: W, encoder: FrameEncoder) -> Self {
        Self {
            sink,
            encoder,
            frames: 0,
        }
    }

    /// Encode `fb` and write it out in a single write.
    pub fn draw(&mut self, fb: &PixelBuffer) -> Result<()> {
        let frame = self.encoder.encode(fb)?;
        self.sink.write_all(frame).map_err(Error::write)?;
        self.sink.flush().map_err(Error::write)?;
        tracing::trace!(frame = self.frames, bytes = frame.len(), "frame flushed");
        self.encoder.recycle();
        self.frames += 1;
        Ok(())
    }

    /// Reset terminal formatting on the way out.
    pub fn exit(&mut self) -> Result<()> {
        self.sink.queue(ResetColor).map_err(Error::write)?;
        self.sink.flush().map_err(Error::write)?;
        Ok(())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn encoder(&self) -> &FrameEncoder {
        &self.encoder
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}
