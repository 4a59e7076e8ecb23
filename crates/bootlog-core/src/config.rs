//! Configuration for bootlog.
//!
//! There is no configuration file; the thresholds here are fixed
//! properties of the monitored firmware and only the output directory
//! and read timeout are expected to vary between deployments. The
//! destination directory is carried per-instance so independent
//! controller instances can target separate namespaces.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Sessions with this many data lines or fewer are deleted on close.
/// A genuine boot banner runs 10-16 lines depending on firmware, so
/// this only filters sessions aborted very early in a boot.
pub const UNKEEPABLE_LINE_COUNT: usize = 10;

/// Maximum lines a boot banner may span before the scan is declared
/// desynchronized.
pub const BANNER_MAX_LINES: usize = 50;

/// Default serial read timeout: 30 minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 1800;

/// Default destination directory for session artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp/logs";

/// Runtime configuration for a single controller instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory session artifacts are written to.
    pub output_dir: PathBuf,
    /// Retention threshold: sessions at or below this line count are
    /// discarded on close.
    pub unkeepable_line_count: usize,
    /// Banner scan line cap.
    pub banner_max_lines: usize,
    /// Serial read timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            unkeepable_line_count: UNKEEPABLE_LINE_COUNT,
            banner_max_lines: BANNER_MAX_LINES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Create a config writing to the given directory, with all
    /// thresholds at their defaults.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output_dir cannot be empty".into()));
        }

        if self.banner_max_lines == 0 {
            return Err(Error::Config(
                "banner_max_lines must be greater than 0".into(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".into()));
        }

        // A retention threshold above the banner cap would discard every
        // session that rotates on a fast reboot.
        if self.unkeepable_line_count >= self.banner_max_lines {
            return Err(Error::Config(format!(
                "unkeepable_line_count ({}) must be below banner_max_lines ({})",
                self.unkeepable_line_count, self.banner_max_lines
            )));
        }

        Ok(())
    }
}
