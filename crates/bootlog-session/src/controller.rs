//! Session orchestration.
//!
//! The controller drives the recorder and scanner through the
//! record -> rotate -> scan cycle for as long as the source produces
//! data. Single sequential flow; the blocking source read is the only
//! suspension point.

use bootlog_core::pattern::UNKNOWN_IDENTIFIER;
use bootlog_core::{Config, LineSource, Result};

use crate::recorder::SessionRecorder;
use crate::scanner::BannerScanner;

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// First session; the stream position at process start is unknown,
    /// so no banner is expected and the identifier is the sentinel.
    InitialRecording,
    /// A reboot was seen; resolving the new device identity.
    AwaitingBanner,
    /// Recording a session for an identified device.
    Recording,
    /// Source exhausted; no more work. Absorbing.
    Terminated,
}

/// Drives session segmentation over one line source.
pub struct Controller {
    recorder: SessionRecorder,
    scanner: BannerScanner,
    state: ControllerState,
}

impl Controller {
    /// Build a controller from a validated config.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let scanner = BannerScanner::new(config.banner_max_lines);
        let recorder = SessionRecorder::new(config)?;
        Ok(Self {
            recorder,
            scanner,
            state: ControllerState::InitialRecording,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    fn transition(&mut self, next: ControllerState) {
        tracing::debug!(from = ?self.state, to = ?next, "controller transition");
        self.state = next;
    }

    /// Run until the source is exhausted or a fatal error occurs.
    ///
    /// A banner overflow or artifact IO failure propagates immediately;
    /// the open artifact has already been closed by the recorder on
    /// every non-panicking path. On `Ok`, the controller is
    /// [`ControllerState::Terminated`] and the caller should release
    /// the source.
    pub fn run(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let mut identifier = UNKNOWN_IDENTIFIER.to_string();
        let mut seed_lines: Vec<String> = Vec::new();

        loop {
            let outcome = self
                .recorder
                .record_until_reboot(source, &identifier, &seed_lines)?;

            if !outcome.reboot_detected() {
                self.transition(ControllerState::Terminated);
                return Ok(());
            }

            self.transition(ControllerState::AwaitingBanner);
            let capture = self.scanner.scan(source)?;

            match capture.identifier {
                Some(serial) => {
                    identifier = serial;
                    seed_lines = capture.lines;
                    self.transition(ControllerState::Recording);
                }
                None => {
                    // Source ended mid-banner: end of monitoring, not
                    // an error.
                    self.transition(ControllerState::Terminated);
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use bootlog_core::source::IterSource;
    use bootlog_core::Error;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_controller() -> (Controller, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_output_dir(temp_dir.path());
        let controller = Controller::new(config).unwrap();
        (controller, temp_dir)
    }

    fn artifacts(dir: &TempDir) -> Vec<std::path::PathBuf> {
        let mut paths: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        paths.sort();
        paths
    }

    fn filler(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("kernel message {i}")).collect()
    }

    #[test]
    fn test_short_stream_terminates_and_discards() {
        let (mut controller, tmp) = create_test_controller();
        let mut source = IterSource::new(filler(5));

        controller.run(&mut source).unwrap();

        assert_eq!(controller.state(), ControllerState::Terminated);
        assert!(artifacts(&tmp).is_empty());
    }

    #[test]
    fn test_reboot_then_banner_rotates_into_identified_session() {
        let (mut controller, tmp) = create_test_controller();

        let mut lines = filler(12);
        lines.push("Forthmacs ok".to_string());
        // Banner of the freshly booted device.
        lines.push("OpenFirmware CL1".to_string());
        lines.push("S/N SHC12345678".to_string());
        // Enough post-banner output to keep the second session.
        lines.extend(filler(9).into_iter().map(|l| format!("second {l}")));
        let mut source = IterSource::new(lines);

        controller.run(&mut source).unwrap();

        assert_eq!(controller.state(), ControllerState::Terminated);
        let paths = artifacts(&tmp);
        // Both sessions above threshold: 13 lines, then 2 seed + 9.
        assert_eq!(paths.len(), 2);

        let first = paths
            .iter()
            .find(|p| p.to_str().unwrap().ends_with("-Unknown"))
            .expect("initial session recorded under the sentinel");
        let second = paths
            .iter()
            .find(|p| p.to_str().unwrap().ends_with("-SHC12345678"))
            .expect("second session named after the banner serial");

        let first_content = fs::read_to_string(first).unwrap();
        assert!(first_content.contains("Forthmacs ok"));
        assert!(first_content.contains("(Reboot detected)"));

        let second_content = fs::read_to_string(second).unwrap();
        // Banner lines seeded into the new session, in order.
        assert!(second_content.contains("OpenFirmware CL1\nS/N SHC12345678\n"));
        assert!(second_content.contains("(EOF/timeout)"));
    }

    #[test]
    fn test_source_ending_mid_banner_terminates_cleanly() {
        let (mut controller, tmp) = create_test_controller();

        let mut lines = filler(12);
        lines.push("CForth built 2021".to_string());
        lines.push("partial banner".to_string());
        let mut source = IterSource::new(lines);

        controller.run(&mut source).unwrap();

        assert_eq!(controller.state(), ControllerState::Terminated);
        // Only the first session was kept.
        assert_eq!(artifacts(&tmp).len(), 1);
    }

    #[test]
    fn test_banner_overflow_is_fatal() {
        let (mut controller, _tmp) = create_test_controller();

        let mut lines = filler(12);
        lines.push("Forthmacs".to_string());
        lines.extend((0..51).map(|i| format!("runaway {i}")));
        let mut source = IterSource::new(lines);

        let err = controller.run(&mut source).unwrap_err();
        assert!(matches!(err, Error::BannerOverflow { .. }));
        assert_ne!(controller.state(), ControllerState::Terminated);
    }

    #[test]
    fn test_discarded_rotation_still_continues_cycle() {
        let (mut controller, tmp) = create_test_controller();

        // First session rotates after only 3 lines: discarded, but the
        // cycle must continue into the banner scan.
        let mut lines = filler(2);
        lines.push("Forthmacs".to_string());
        lines.push("S/N CHN00000042".to_string());
        lines.extend(filler(11).into_iter().map(|l| format!("post {l}")));
        let mut source = IterSource::new(lines);

        controller.run(&mut source).unwrap();

        assert_eq!(controller.state(), ControllerState::Terminated);
        let paths = artifacts(&tmp);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].to_str().unwrap().ends_with("-CHN00000042"));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = Config::with_output_dir("/tmp/logs");
        config.timeout_secs = 0;
        assert!(matches!(
            Controller::new(config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_state_discarded_kept_exclusivity() {
        // A closed session lands in exactly one terminal state.
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_output_dir(temp_dir.path());
        let recorder = SessionRecorder::new(config).unwrap();

        let mut source = IterSource::new(filler(11));
        let outcome = recorder
            .record_until_reboot(&mut source, "Unknown", &[])
            .unwrap();
        assert_eq!(outcome.session.state, SessionState::ClosedKept);

        let mut source = IterSource::new(filler(3));
        let outcome = recorder
            .record_until_reboot(&mut source, "Unknown", &[])
            .unwrap();
        assert_eq!(outcome.session.state, SessionState::ClosedDiscarded);
    }
}
