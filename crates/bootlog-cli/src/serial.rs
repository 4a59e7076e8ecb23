//! Serial transport adapter.
//!
//! Adapts a serial port to the [`LineSource`] seam. A read timeout is
//! end-of-stream here, not an error: the engine treats a device that
//! went quiet for the full timeout as finished.

use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use bootlog_core::LineSource;

/// Monitored devices talk at a fixed rate.
const BAUD_RATE: u32 = 115_200;

/// A [`LineSource`] over a live serial port.
pub struct SerialSource {
    reader: BufReader<Box<dyn serialport::SerialPort>>,
}

impl SerialSource {
    /// Open `device` at 115200 baud with the given read timeout. The
    /// port is released when the source drops.
    pub fn open(device: &str, timeout: Duration) -> serialport::Result<Self> {
        let port = serialport::new(device, BAUD_RATE).timeout(timeout).open()?;
        tracing::info!(device, baud = BAUD_RATE, "serial port opened");
        Ok(Self {
            reader: BufReader::new(port),
        })
    }
}

impl LineSource for SerialSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => {
                // Firmware output is not guaranteed clean UTF-8; line
                // noise gets replacement characters rather than
                // aborting the session.
                let mut line = String::from_utf8_lossy(&buf).into_owned();
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Ok(Some(line))
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                tracing::debug!("serial read timed out");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
