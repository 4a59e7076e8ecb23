//! Session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session state in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Recording is in progress and the artifact is exclusively owned
    /// by the recorder.
    Open,
    /// Closed with enough content to keep; the artifact persists.
    ClosedKept,
    /// Closed below the retention threshold; the artifact was deleted.
    ClosedDiscarded,
}

/// Why a session stopped recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// A reboot signature appeared in the stream.
    RebootDetected,
    /// The source ended or the read timed out.
    EndOfStream,
}

impl CloseReason {
    /// The reason text written into the close marker line. Must stay
    /// bit-exact; downstream tooling parses these markers.
    pub fn as_str(self) -> &'static str {
        match self {
            CloseReason::RebootDetected => "Reboot detected",
            CloseReason::EndOfStream => "EOF/timeout",
        }
    }
}

/// One boot-to-reboot capture interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Device serial number, or the `"Unknown"` sentinel.
    pub identifier: String,
    /// UTC time recording began.
    pub started_at: DateTime<Utc>,
    /// Data lines written, excluding the open/close marker lines.
    pub line_count: usize,
    /// Current lifecycle state.
    pub state: SessionState,
    /// Artifact path, derived from `started_at` and `identifier`.
    pub path: PathBuf,
}

impl Session {
    /// Open a new session in the given directory. The artifact name is
    /// `<YYYYMMDD_HHMMSS>-<identifier>` so that sessions starting the
    /// same second for different devices never collide.
    pub fn open(output_dir: &Path, identifier: &str) -> Self {
        let started_at = Utc::now();
        let path = output_dir.join(format!(
            "{}-{}",
            started_at.format("%Y%m%d_%H%M%S"),
            identifier
        ));
        Self {
            identifier: identifier.to_string(),
            started_at,
            line_count: 0,
            state: SessionState::Open,
            path,
        }
    }

    /// Whether the artifact survived retention.
    pub fn is_kept(&self) -> bool {
        self.state == SessionState::ClosedKept
    }
}

/// Format a timestamp the way marker lines carry it: ctime-style,
/// e.g. `Tue May  4 07:30:59 2021`.
pub(crate) fn marker_time(ts: DateTime<Utc>) -> String {
    ts.format("%a %b %e %H:%M:%S %Y").to_string()
}
