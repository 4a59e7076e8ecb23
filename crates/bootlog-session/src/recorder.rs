//! Session recording.
//!
//! The recorder owns exactly one artifact at a time. It appends stream
//! lines, watches for the reboot signature, stamps open/close markers,
//! and applies the retention policy when the session closes.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use chrono::Utc;

use bootlog_core::pattern::is_reboot_signature;
use bootlog_core::{Config, LineSource, Result};

use crate::session::{marker_time, CloseReason, Session, SessionState};

/// Result of one recorded session.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// The closed session. `state` is terminal.
    pub session: Session,
    /// Why recording stopped.
    pub reason: CloseReason,
}

impl RecordOutcome {
    /// Whether the session ended because the device rebooted (and the
    /// controller should scan for the next boot banner).
    pub fn reboot_detected(&self) -> bool {
        self.reason == CloseReason::RebootDetected
    }
}

/// Records sessions into a fixed output directory.
pub struct SessionRecorder {
    config: Config,
}

impl SessionRecorder {
    /// Create a recorder targeting `config.output_dir`, creating the
    /// directory if needed. An unwritable directory is fatal here
    /// rather than at first rotation.
    pub fn new(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.output_dir)?;
        Ok(Self { config })
    }

    /// Record one session until a reboot signature appears or the
    /// source ends.
    ///
    /// `seed_lines` (the banner captured while identifying the device)
    /// are written first and count toward the session's line count.
    /// Artifact-creation failure propagates; logging is the system's
    /// sole purpose and there is no degraded fallback.
    pub fn record_until_reboot(
        &self,
        source: &mut dyn LineSource,
        identifier: &str,
        seed_lines: &[String],
    ) -> Result<RecordOutcome> {
        let mut session = Session::open(&self.config.output_dir, identifier);
        let file = File::create(&session.path)?;
        let mut writer = BufWriter::new(file);

        tracing::info!(
            identifier,
            path = %session.path.display(),
            "session opened"
        );

        writeln!(
            writer,
            "--- Logfile started for '{}' at {} GMT ---",
            session.identifier,
            marker_time(session.started_at)
        )?;

        for line in seed_lines {
            writeln!(writer, "{line}")?;
            session.line_count += 1;
        }

        let reason = loop {
            match source.next_line()? {
                Some(line) => {
                    writeln!(writer, "{line}")?;
                    session.line_count += 1;
                    if is_reboot_signature(&line) {
                        break CloseReason::RebootDetected;
                    }
                }
                None => break CloseReason::EndOfStream,
            }
        };

        writeln!(
            writer,
            "--- Logfile closed for '{}' at {} GMT ({}) ---",
            session.identifier,
            marker_time(Utc::now()),
            reason.as_str()
        )?;
        writer.flush()?;
        drop(writer);

        self.apply_retention(&mut session)?;

        Ok(RecordOutcome { session, reason })
    }

    /// Delete sessions too short to represent useful diagnostic
    /// content. This can discard a legitimate fast boot; accepted
    /// trade-off.
    fn apply_retention(&self, session: &mut Session) -> Result<()> {
        if session.line_count <= self.config.unkeepable_line_count {
            fs::remove_file(&session.path)?;
            session.state = SessionState::ClosedDiscarded;
            tracing::warn!(
                identifier = %session.identifier,
                line_count = session.line_count,
                "session discarded below retention threshold"
            );
        } else {
            session.state = SessionState::ClosedKept;
            tracing::info!(
                identifier = %session.identifier,
                line_count = session.line_count,
                path = %session.path.display(),
                "session closed"
            );
        }
        Ok(())
    }
}
