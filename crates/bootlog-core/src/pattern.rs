//! Line classification.
//!
//! Pure functions mapping a raw line of device output to a structured
//! match. Nothing here touches the stream or the filesystem, so the
//! firmware-specific matching rules are testable in isolation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel identifier for devices whose serial number is not known.
pub const UNKNOWN_IDENTIFIER: &str = "Unknown";

/// Substrings emitted by device firmware at boot/reboot. Which one
/// appears first varies by device model.
const REBOOT_SIGNATURES: [&str; 2] = ["Forthmacs", "CForth built"];

/// Serial numbers are announced in the boot banner as e.g.
/// `S/N SHC12345678`. The firmware prints `S/N Unknown` on devices
/// that were never serialized.
static SERIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"S/N ([SC][HS][CN][0-9A-Za-z]{8}|Unknown)").expect("serial number regex is valid")
});

/// Whether the line contains a boot/reboot signature.
///
/// Case-sensitive, unanchored substring test.
pub fn is_reboot_signature(line: &str) -> bool {
    REBOOT_SIGNATURES.iter().any(|sig| line.contains(sig))
}

/// Extract the device serial number announced on this line, if any.
pub fn extract_serial(line: &str) -> Option<&str> {
    SERIAL_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
