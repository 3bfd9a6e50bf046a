//! Line-oriented terminal I/O for the interactive menu.
//!
//! Generic over the reader and writer so the menu can be driven from a
//! script in tests.

use std::io::{self, BufRead, Write};

/// ANSI "cursor home" followed by "erase display".
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Prompt-and-read wrapper around an input/output pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screens: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap `input`/`output`. `clear_screens` controls whether
    /// [`clear_screen`](Self::clear_screen) emits escape codes.
    pub fn new(input: R, output: W, clear_screens: bool) -> Self {
        Self {
            input,
            output,
            clear_screens,
        }
    }

    /// Print `message`, then read one line.
    ///
    /// Returns the line with surrounding whitespace removed, or `None` at
    /// end of input. Bytes that are not valid UTF-8 are replaced with
    /// U+FFFD, so a garbled line is just another answer to validate.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.output.write_all(message.as_bytes())?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Wait for Enter. End of input counts as Enter.
    pub fn pause(&mut self) -> io::Result<()> {
        self.prompt("Press Enter to continue...").map(drop)
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.clear_screens {
            self.output.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        Ok(())
    }

    /// Consume the console and return the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
