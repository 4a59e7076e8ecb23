//! Boot banner scanning.
//!
//! After a reboot the firmware prints a banner containing the device's
//! serial number. The scanner reads lines until it finds one, keeping
//! everything it consumed so the next session can be seeded with the
//! full banner.

use bootlog_core::pattern::extract_serial;
use bootlog_core::{Error, LineSource, Result};

/// Lines read while searching for the next device identifier.
#[derive(Debug, Clone, Default)]
pub struct BannerCapture {
    /// Extracted serial number, or `None` when the source ended before
    /// a match.
    pub identifier: Option<String>,
    /// Every line consumed, including the matching line.
    pub lines: Vec<String>,
}

/// Scans a line source for the device-identifier banner line.
pub struct BannerScanner {
    max_lines: usize,
}

impl BannerScanner {
    pub fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }

    /// Read lines until one carries a serial number.
    ///
    /// Returns the capture with `identifier: None` if the source ends
    /// first; the caller treats that as end of monitoring, not an
    /// error. Consuming more than `max_lines` without a match means
    /// signature detection has desynchronized from the boot sequence
    /// and fails with [`Error::BannerOverflow`].
    pub fn scan(&self, source: &mut dyn LineSource) -> Result<BannerCapture> {
        let mut capture = BannerCapture::default();

        while let Some(line) = source.next_line()? {
            let serial = extract_serial(&line).map(str::to_string);
            capture.lines.push(line);

            if let Some(serial) = serial {
                tracing::debug!(
                    identifier = %serial,
                    banner_lines = capture.lines.len(),
                    "banner matched"
                );
                capture.identifier = Some(serial);
                return Ok(capture);
            }

            if capture.lines.len() > self.max_lines {
                return Err(Error::BannerOverflow {
                    limit: self.max_lines,
                });
            }
        }

        tracing::debug!(
            banner_lines = capture.lines.len(),
            "source ended before a banner match"
        );
        Ok(capture)
    }
}
