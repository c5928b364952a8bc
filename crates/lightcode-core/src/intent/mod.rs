//! Intent notation parser.
//!
//! Intent text is a small indentation-scoped notation:
//!
//! ```text
//! effect: fire
//! behavior:
//!   flame_height: tall      # cooling 40
//!   spark_frequency: high
//! appearance:
//!   color_scheme: classic_fire
//! timing:
//!   speed: medium
//! ```
//!
//! Parsing happens in two passes: `parser` splits the text into
//! section-scoped entries, `mapper` turns entries into pattern fields once
//! the effect is known (keys are effect-aware).

mod mapper;
mod parser;

use std::fmt;

use serde::Serialize;

use crate::PatternSpec;
use crate::error::CodecError;
use mapper::Mapper;
use parser::{Section, parse_document};

/// How unrecognized semantic values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Fall back to the field default and report a warning.
    #[default]
    Lenient,
    /// Report unrecognized values as validation errors.
    Strict,
}

impl Strictness {
    /// Whether a diagnostic of `kind` fails validation under this mode.
    pub fn rejects(self, kind: DiagnosticKind) -> bool {
        self == Strictness::Strict && kind == DiagnosticKind::UnknownValue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Semantic value not in the key's table; the default was used.
    UnknownValue,
    /// Key does not apply to the chosen effect; it was ignored.
    InapplicableKey,
    UnknownSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based source line.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIntent {
    pub spec: PatternSpec,
    pub warnings: Vec<Diagnostic>,
}

/// Parses intent text into a pattern.
///
/// Only a missing `effect` is fatal; everything else is reported through
/// `warnings`. An unknown effect name is kept and left for the validator.
///
/// # Examples
/// ```
/// use lightcode_core::parse_intent;
///
/// let parsed = parse_intent("effect: fire\nbehavior:\n  flame_height: tall\n")?;
/// assert_eq!(parsed.spec.cooling, Some(40));
/// assert!(parsed.warnings.is_empty());
/// # Ok::<(), lightcode_core::CodecError>(())
/// ```
pub fn parse_intent(text: &str) -> Result<ParsedIntent, CodecError> {
    let document = parse_document(text);
    let effect = document
        .entries
        .iter()
        .rev()
        .find(|entry| entry.section == Section::Root && entry.key == "effect")
        .ok_or_else(|| CodecError::syntax("missing required key 'effect'"))?;

    let mut mapper = Mapper::new(&effect.value);
    for entry in &document.entries {
        mapper.apply(entry);
    }
    let (spec, mapped) = mapper.finish();

    let mut warnings = document.diagnostics;
    warnings.extend(mapped);
    warnings.sort_by_key(|diagnostic| diagnostic.line);
    log::debug!(
        "parsed intent: effect={} colors={} warnings={}",
        spec.effect,
        spec.colors.len(),
        warnings.len()
    );
    Ok(ParsedIntent { spec, warnings })
}
