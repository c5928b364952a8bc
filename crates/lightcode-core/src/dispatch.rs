//! Compile entry points.
//!
//! Each entry point runs parse -> validate -> encode and stops at the first
//! failing stage. A failure carries the stage, the full validation error
//! list (empty unless validation failed) and the underlying error.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::error::CodecError;
use crate::formats::BinaryFormat;
use crate::formats::compact::{self, layout::MAX_PALETTE};
use crate::formats::segment;
use crate::intent::{Strictness, parse_intent};
use crate::state::parse_state_json;
use crate::tables::colors::resolve_palette;
use crate::validate::{color_count_warnings, validate_spec, validate_state};
use crate::{DeviceState, PatternSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Parse,
    Validate,
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Parse => "parse",
            Stage::Validate => "validate",
            Stage::Encode => "encode",
        })
    }
}

/// Successful compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compiled {
    pub format: BinaryFormat,
    #[serde(serialize_with = "serialize_hex")]
    pub bytecode: Vec<u8>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} failed: {source}")]
pub struct CompileFailure {
    pub stage: Stage,
    /// Every validation message; empty for parse and encode failures.
    pub errors: Vec<String>,
    pub source: CodecError,
}

impl CompileFailure {
    fn at(stage: Stage, source: CodecError) -> Self {
        Self {
            stage,
            errors: Vec::new(),
            source,
        }
    }

    fn invalid(errors: Vec<String>) -> Self {
        Self {
            stage: Stage::Validate,
            errors: errors.clone(),
            source: CodecError::Invalid(errors),
        }
    }
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Compiles intent text (Format A) or a device state document (Format B).
///
/// Input whose first non-blank character is `{` is treated as device
/// state JSON; anything else is intent text.
///
/// # Examples
/// ```
/// use lightcode_core::{BinaryFormat, compile_intent};
///
/// let compiled = compile_intent(r#"{"on":true,"seg":[{"stop":8,"col":[[255,255,255]]}]}"#)?;
/// assert_eq!(compiled.format, BinaryFormat::FormatB);
/// assert_eq!(compiled.bytecode.len(), 30);
/// # Ok::<(), lightcode_core::CompileFailure>(())
/// ```
pub fn compile_intent(text: &str) -> Result<Compiled, CompileFailure> {
    compile_intent_with(text, Strictness::default())
}

pub fn compile_intent_with(text: &str, strictness: Strictness) -> Result<Compiled, CompileFailure> {
    if is_state_document(text) {
        return compile_state_json(text);
    }
    let (spec, warnings) = check_intent(text, strictness)?;
    encode_checked_spec(&spec, warnings)
}

/// Validates without encoding; the JSON/intent split matches `compile_intent`.
pub fn validate_intent(text: &str) -> (bool, Vec<String>) {
    validate_intent_with(text, Strictness::default())
}

pub fn validate_intent_with(text: &str, strictness: Strictness) -> (bool, Vec<String>) {
    let result = if is_state_document(text) {
        parse_state_json(text)
            .map_err(|err| CompileFailure::at(Stage::Parse, err))
            .and_then(|state| check_state(&state))
    } else {
        check_intent(text, strictness).map(|_| ())
    };
    match result {
        Ok(()) => (true, Vec::new()),
        Err(failure) if failure.errors.is_empty() => (false, vec![failure.source.to_string()]),
        Err(failure) => (false, failure.errors),
    }
}

/// Validates and encodes a pattern to Format A.
pub fn compile_spec(spec: &PatternSpec) -> Result<Compiled, CompileFailure> {
    let (ok, errors) = validate_spec(spec);
    if !ok {
        return Err(CompileFailure::invalid(errors));
    }
    encode_checked_spec(spec, Vec::new())
}

/// Parses, validates and encodes a device state document to Format B.
pub fn compile_state_json(text: &str) -> Result<Compiled, CompileFailure> {
    let state = parse_state_json(text).map_err(|err| CompileFailure::at(Stage::Parse, err))?;
    compile_state(&state)
}

/// Validates and encodes a device state to Format B.
pub fn compile_state(state: &DeviceState) -> Result<Compiled, CompileFailure> {
    check_state(state)?;
    let bytecode =
        segment::encode_state(state).map_err(|err| CompileFailure::at(Stage::Encode, err))?;
    log::debug!("compiled state: {} bytes", bytecode.len());
    Ok(Compiled {
        format: BinaryFormat::FormatB,
        bytecode,
        warnings: color_count_warnings(state),
    })
}

fn is_state_document(text: &str) -> bool {
    text.trim_start().starts_with('{')
}

/// Parse and validate stages for intent text; returns the spec and the
/// warnings that did not fail validation.
fn check_intent(
    text: &str,
    strictness: Strictness,
) -> Result<(PatternSpec, Vec<String>), CompileFailure> {
    let parsed = parse_intent(text).map_err(|err| CompileFailure::at(Stage::Parse, err))?;
    log::debug!("intent parsed: effect={}", parsed.spec.effect);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for diagnostic in parsed.warnings {
        if strictness.rejects(diagnostic.kind) {
            errors.push(diagnostic.to_string());
        } else {
            warnings.push(diagnostic.to_string());
        }
    }
    let (_, invalid) = validate_spec(&parsed.spec);
    errors.extend(invalid);
    if !errors.is_empty() {
        log::debug!("intent rejected with {} error(s)", errors.len());
        return Err(CompileFailure::invalid(errors));
    }
    Ok((parsed.spec, warnings))
}

fn check_state(state: &DeviceState) -> Result<(), CompileFailure> {
    let (ok, errors) = validate_state(state);
    if !ok {
        log::debug!("state rejected with {} error(s)", errors.len());
        return Err(CompileFailure::invalid(errors));
    }
    Ok(())
}

fn encode_checked_spec(
    spec: &PatternSpec,
    mut warnings: Vec<String>,
) -> Result<Compiled, CompileFailure> {
    let colors = resolve_palette(&spec.colors).len();
    if colors > MAX_PALETTE {
        warnings.push(format!(
            "palette has {colors} colors; only the first {MAX_PALETTE} are encoded"
        ));
    }
    let bytecode =
        compact::encode_spec(spec).map_err(|err| CompileFailure::at(Stage::Encode, err))?;
    log::debug!("compiled spec: {} bytes", bytecode.len());
    Ok(Compiled {
        format: BinaryFormat::FormatA,
        bytecode,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_brace_selects_state_path() {
        let compiled =
            compile_intent("  \n{\"on\":true,\"seg\":[{\"stop\":4,\"col\":[[1,2,3]]}]}").unwrap();
        assert_eq!(compiled.format, BinaryFormat::FormatB);
    }

    #[test]
    fn parse_failure_has_no_error_list() {
        let failure = compile_intent("name: nothing here\n").unwrap_err();
        assert_eq!(failure.stage, Stage::Parse);
        assert!(failure.errors.is_empty());
        assert!(failure.to_string().starts_with("parse failed: syntax error"));
    }

    #[test]
    fn validation_failure_lists_every_error() {
        let failure = compile_intent("effect: laser\nappearance:\n  color: glitter\n").unwrap_err();
        assert_eq!(failure.stage, Stage::Validate);
        assert_eq!(
            failure.errors,
            vec!["unknown effect 'laser'", "color[0]: cannot resolve 'glitter'"]
        );
        assert_eq!(failure.source, CodecError::Invalid(failure.errors.clone()));
    }

    #[test]
    fn strict_mode_promotes_unknown_values() {
        let text = "effect: fire\nbehavior:\n  flame_height: enormous\n";
        let lenient = compile_intent(text).unwrap();
        assert_eq!(lenient.warnings.len(), 1);
        assert!(lenient.warnings[0].starts_with("line 3: unknown flame_height"));

        let strict = compile_intent_with(text, Strictness::Strict).unwrap_err();
        assert_eq!(strict.stage, Stage::Validate);
        assert_eq!(strict.errors.len(), 1);
    }

    #[test]
    fn wave_count_takes_words_only() {
        let compiled = compile_intent("effect: wave\nbehavior:\n  wave_count: 0\n").unwrap();
        assert_eq!(compiled.bytecode[11], 3);
        assert_eq!(compiled.warnings.len(), 1);
        assert!(compiled.warnings[0].starts_with("line 3: unknown wave_count '0'"));
    }

    #[test]
    fn oversized_palette_warns_about_truncation() {
        let spec = PatternSpec {
            effect: "gradient".to_string(),
            colors: vec!["rainbow".to_string(), "ocean".to_string()],
            ..PatternSpec::default()
        };
        let compiled = compile_spec(&spec).unwrap();
        assert_eq!(compiled.warnings.len(), 1);
        assert!(compiled.warnings[0].contains("11 colors"));
    }

    #[test]
    fn state_with_short_palette_compiles_with_warning() {
        let compiled = compile_state_json(
            r#"{"on":true,"seg":[{"stop":30,"fx":49,"col":[[255,0,0]]}]}"#,
        )
        .unwrap();
        assert_eq!(compiled.format, BinaryFormat::FormatB);
        assert_eq!(
            compiled.warnings,
            vec!["segment[0]: Fire 2012 expects at least 3 colors, got 1"]
        );
    }

    #[test]
    fn validate_intent_reports_parse_errors_as_list() {
        let (ok, errors) = validate_intent("{not json");
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("invalid JSON"));
    }

    #[test]
    fn compiled_serializes_bytecode_as_hex() {
        let compiled = compile_intent("effect: solid\nappearance:\n  color: red\n").unwrap();
        let value = serde_json::to_value(&compiled).unwrap();
        assert_eq!(value["format"], "format_a");
        assert!(value["bytecode"].as_str().unwrap().starts_with("4c434c03"));
    }
}
