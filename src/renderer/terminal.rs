//! ANSI terminal output
//!
//! Frames are written whole: home the cursor, then every row. The screen is
//! cleared only before the first frame so redraws don't flicker.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::ResetColor;
use crossterm::terminal::{Clear, ClearType};

use super::frame::Frame;

/// Buffered ANSI renderer for fixed-size frames
pub struct Renderer<W: Write> {
    out: BufWriter<W>,
    width: usize,
    height: usize,
    cleared_once: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out: BufWriter::with_capacity(64 * 1024, out),
            width,
            height,
            cleared_once: false,
        }
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.out.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()
    }

    /// Draw a frame. Rows are joined with CRLF since raw mode disables
    /// output newline translation; no newline after the last row so the
    /// screen never scrolls.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "frame size {}x{} != renderer {}x{}",
                    frame.width, frame.height, self.width, self.height
                ),
            ));
        }
        if frame.cells.len() != frame.width * frame.height {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "frame has {} cells, expected {}x{}",
                    frame.cells.len(),
                    frame.width,
                    frame.height
                ),
            ));
        }

        if !self.cleared_once {
            queue!(self.out, Clear(ClearType::All))?;
            self.cleared_once = true;
        }
        queue!(self.out, MoveTo(0, 0))?;

        for y in 0..self.height {
            self.out.write_all(frame.row(y))?;
            if y + 1 != self.height {
                self.out.write_all(b"\r\n")?;
            }
        }

        self.out.flush()
    }

    /// Reset attributes, wipe the screen and bring the cursor back
    pub fn leave(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        self.show_cursor()
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}
