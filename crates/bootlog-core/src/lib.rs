//! # bootlog-core
//!
//! Core types and abstractions for bootlog - the serial boot-session logger.
//!
//! This crate provides:
//! - Line classification (reboot signatures, serial-number extraction)
//! - The `LineSource` trait abstracting the serial transport
//! - Configuration with fixed-threshold defaults
//! - Common error types

pub mod config;
pub mod error;
pub mod pattern;
pub mod source;

pub use config::Config;
pub use error::{Error, Result};
pub use source::LineSource;
