//! lightcode core library: LED pattern compiler and bytecode codec.
//!
//! This crate turns authored pattern descriptions into the binary programs
//! consumed by LED controller firmware, and decodes those programs back into
//! structured values for re-editing and preview. The pipeline is:
//! notation (intent text or device-state JSON) -> parser -> specification
//! (`PatternSpec` / `DeviceState`) -> validator -> encoder -> bytecode, and
//! bytecode -> decoder -> specification.
//!
//! Wire formats follow the same layered structure as the rest of the crate:
//! `layout` holds byte offsets, a shared reader does bounds-checked access,
//! encoders and decoders stay free of raw indexing where possible.
//!
//! Invariants:
//! - Every operation is pure: no I/O, no clocks, no randomness.
//! - Encoding is deterministic; identical input yields identical bytes.
//! - Decoding a Format B buffer produced by the encoder reproduces the state.
//! - Failures are returned as values; nothing panics on malformed input.
//!
//! # Examples
//! ```
//! use lightcode_core::{BinaryFormat, compile_intent, detect_binary_format};
//!
//! let compiled = compile_intent("effect: fire\nbehavior:\n  flame_height: tall\n")?;
//! assert_eq!(detect_binary_format(&compiled.bytecode), BinaryFormat::FormatA);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod convert;
mod dispatch;
mod error;
mod formats;
mod intent;
mod state;
mod tables;
mod validate;

pub use convert::spec_to_state;
pub use dispatch::{
    CompileFailure, Compiled, Stage, compile_intent, compile_intent_with, compile_spec,
    compile_state, compile_state_json, validate_intent, validate_intent_with,
};
pub use error::{CodecError, ErrorKind};
pub use formats::compact::{DecodedSpec, decode_spec as decode_format_a, encode_spec};
pub use formats::error::FormatError;
pub use formats::legacy::{
    Instruction, LegacyProgram, disassemble as disassemble_legacy, encode as encode_legacy,
};
pub use formats::segment::{DecodedState, decode_state as decode_format_b, encode_state};
pub use formats::{BinaryFormat, detect_binary_format};
pub use intent::{Diagnostic, DiagnosticKind, ParsedIntent, Strictness, parse_intent};
pub use state::{parse_state_json, state_to_json};
pub use tables::{Effect, EffectInfo, Rgb, SegmentEffect};
pub use validate::{validate_spec, validate_state};

/// Normalized pattern description compiled to Format A.
///
/// Numeric fields are optional so that "unset" can be told apart from an
/// explicit value, and signed so that out-of-range input survives until the
/// validator reports it.
///
/// # Examples
/// ```
/// use lightcode_core::PatternSpec;
///
/// let spec = PatternSpec {
///     effect: "fire".to_string(),
///     colors: vec!["#FF0000".to_string()],
///     cooling: Some(55),
///     sparking: Some(120),
///     ..PatternSpec::default()
/// };
/// assert_eq!(spec.effect, "fire");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Effect name (see [`Effect`] for the recognized set and aliases).
    pub effect: String,
    /// Optional display name carried from the intent text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered palette as color strings (`#RRGGBB` once resolved).
    #[serde(default)]
    pub colors: Vec<String>,
    /// Secondary color used when converting to a device state.
    #[serde(
        default,
        alias = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,
    /// Master brightness, 0-255. Unset or zero encodes as 200.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<i32>,
    /// Animation speed, 0-255. Unset or zero encodes as 128.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<i32>,
    /// Sparkle density.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<i32>,
    /// Fire cooling; higher values give shorter flames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling: Option<i32>,
    /// Fire sparking; chance of new flames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparking: Option<i32>,
    /// Number of waves for wave/chase effects.
    #[serde(default, alias = "waveCount", skip_serializing_if = "Option::is_none")]
    pub wave_count: Option<i32>,
    /// 0 = forward, 1 = reverse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<i32>,
    /// Scanner/chase head width in LEDs.
    #[serde(default, alias = "eyeSize", skip_serializing_if = "Option::is_none")]
    pub eye_size: Option<i32>,
    /// Scanner/chase trail length in LEDs.
    #[serde(default, alias = "tailLength", skip_serializing_if = "Option::is_none")]
    pub tail_length: Option<i32>,
}

/// Segment-based device state compiled to Format B.
///
/// Serializes with the short keys of the WLED JSON API (`bri`, `seg`, ...).
///
/// # Examples
/// ```
/// use lightcode_core::{DeviceState, Segment};
///
/// let state = DeviceState {
///     on: true,
///     brightness: 200,
///     transition: 0,
///     segments: vec![Segment {
///         stop: 8,
///         on: true,
///         colors: vec![vec![255, 255, 255]],
///         ..Segment::default()
///     }],
/// };
/// assert_eq!(state.segments.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceState {
    /// Master power.
    pub on: bool,
    /// Global brightness, 0-255.
    #[serde(rename = "bri")]
    pub brightness: i32,
    /// Transition time in 100 ms units.
    pub transition: i32,
    /// Ordered segments (1-8 when valid).
    #[serde(rename = "seg")]
    pub segments: Vec<Segment>,
}

/// One addressable sub-range of the strip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Segment index on the device, 0-255; defaults to the list position.
    pub id: i32,
    /// First LED index (inclusive).
    pub start: i32,
    /// Last LED index (exclusive).
    pub stop: i32,
    /// Firmware effect ID (see [`SegmentEffect`]).
    #[serde(rename = "fx")]
    pub effect_id: i32,
    #[serde(rename = "sx")]
    pub speed: i32,
    #[serde(rename = "ix")]
    pub intensity: i32,
    #[serde(rename = "c1")]
    pub custom1: i32,
    #[serde(rename = "c2")]
    pub custom2: i32,
    #[serde(rename = "c3")]
    pub custom3: i32,
    #[serde(rename = "pal")]
    pub palette_id: i32,
    #[serde(rename = "rev")]
    pub reverse: bool,
    #[serde(rename = "mi")]
    pub mirror: bool,
    pub on: bool,
    /// RGB triples; 1-3 entries when valid.
    #[serde(rename = "col")]
    pub colors: Vec<Vec<i32>>,
}
