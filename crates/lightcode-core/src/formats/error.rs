use thiserror::Error;

/// Structural decoding failure shared by every wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("bad magic: expected {}, got {}", hex::encode(expected), hex::encode(actual))]
    BadMagic {
        expected: &'static [u8],
        actual: Vec<u8>,
    },
    #[error("unsupported version: {version} (expected {expected})")]
    UnsupportedVersion { version: u8, expected: u8 },
    #[error("length mismatch: header declares {declared} payload bytes, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("{what} count {count} exceeds maximum {max}")]
    CountExceeded {
        what: &'static str,
        count: usize,
        max: usize,
    },
    #[error("truncated {context}: need {needed} bytes, got {actual}")]
    Truncated {
        context: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
}
