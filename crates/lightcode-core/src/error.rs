use thiserror::Error;

use crate::formats::error::FormatError;

/// Error taxonomy shared by parsers, encoders and decoders.
///
/// # Examples
/// ```
/// use lightcode_core::{CodecError, ErrorKind};
///
/// let err = CodecError::UnknownEffect("laser".to_string());
/// assert_eq!(err.kind(), ErrorKind::Semantic);
/// assert!(err.to_string().contains("laser"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("unknown effect: {0}")]
    UnknownEffect(String),
    #[error("unsupported effect ID: {0}")]
    UnsupportedEffectId(i64),
    #[error("effect '{effect}' cannot be encoded in the {format} format")]
    EffectNotEncodable {
        effect: String,
        format: &'static str,
    },
    #[error("range error: {0}")]
    Range(String),
    #[error("validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Coarse error class, used by callers that only need to branch on category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Range,
    Format,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Syntax(_) => ErrorKind::Syntax,
            CodecError::UnknownEffect(_)
            | CodecError::UnsupportedEffectId(_)
            | CodecError::EffectNotEncodable { .. } => ErrorKind::Semantic,
            CodecError::Range(_) | CodecError::Invalid(_) => ErrorKind::Range,
            CodecError::Format(_) => ErrorKind::Format,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        CodecError::Syntax(message.into())
    }
}
