//! The line source seam.
//!
//! The segmentation engine never talks to a serial port directly; it
//! drains any [`LineSource`]. The transport adapter lives in the CLI
//! crate, and tests substitute [`IterSource`].

use std::io;

/// A sequential, timeout-bounded source of text lines.
///
/// `Ok(None)` means the stream ended or the read timed out - normal
/// termination, never an error. `Err` is reserved for hard transport
/// failures. Yielded lines carry no trailing newline.
pub trait LineSource {
    /// Block until the next line arrives, the stream ends, or the
    /// transport's read timeout elapses.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// A `LineSource` over an in-memory sequence of lines.
///
/// The test double for the serial transport; also usable to replay a
/// captured stream.
#[derive(Debug)]
pub struct IterSource {
    lines: std::vec::IntoIter<String>,
}

impl IterSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineSource for IterSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.next())
    }
}
