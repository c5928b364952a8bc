use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("not a segment binary (magic {found:02X?})")]
    BadMagic { found: [u8; 4] },
    #[error("unsupported version {0}")]
    UnsupportedVersion(u8),
    #[error("header declares {declared} payload bytes, buffer has {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("{count} segments exceed the limit of {max}")]
    TooManySegments { count: usize, max: usize },
    #[error("segment {index} declares {count} colors (max {max})")]
    TooManyColors { index: usize, count: usize, max: usize },
    #[error("segment {index} truncated at byte {offset}")]
    Truncated { index: usize, offset: usize },
}
