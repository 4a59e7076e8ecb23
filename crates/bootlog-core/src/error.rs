//! Error types for bootlog.
//!
//! Two conditions are fatal: a banner scan that runs past its line cap,
//! and any failure to create, write, or delete a session artifact. A
//! source read timeout is not represented here at all; sources signal it
//! as ordinary end-of-stream (see [`crate::source::LineSource`]).

use thiserror::Error;

/// Result type alias using the bootlog error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bootlog.
#[derive(Error, Debug)]
pub enum Error {
    /// The banner scan consumed more lines than a boot banner can hold.
    /// Signature detection has desynchronized from the boot sequence.
    #[error("Boot banner exceeded {limit} lines without a serial number")]
    BannerOverflow {
        /// The configured cap that was exceeded.
        limit: usize,
    },

    /// A session artifact could not be created, written, or deleted.
    /// Durable logging is the sole purpose of the system, so there is
    /// no degraded fallback.
    #[error("Artifact IO error: {0}")]
    ArtifactIo(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
