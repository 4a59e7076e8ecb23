//! # bootlog-session
//!
//! The session segmentation engine: splits an unbounded serial stream
//! into discrete, timestamped session files, one per boot cycle of the
//! monitored device.
//!
//! - [`SessionRecorder`] owns one artifact at a time and watches for
//!   the reboot signature.
//! - [`BannerScanner`] resolves the identity of a freshly booted device
//!   from its boot banner.
//! - [`Controller`] drives the record -> rotate -> scan cycle for the
//!   lifetime of the process.

pub mod controller;
pub mod recorder;
pub mod scanner;
pub mod session;

pub use controller::{Controller, ControllerState};
pub use recorder::{RecordOutcome, SessionRecorder};
pub use scanner::{BannerCapture, BannerScanner};
pub use session::{CloseReason, Session, SessionState};
