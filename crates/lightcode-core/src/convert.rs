//! Pattern -> device state conversion, used to migrate Format A patterns
//! onto segment-based controllers.

use crate::error::CodecError;
use crate::formats::common::clamp_u8;
use crate::formats::compact::encoder::{
    DEFAULT_BRIGHTNESS, DEFAULT_COOLING, DEFAULT_DENSITY, DEFAULT_SPARKING, DEFAULT_SPEED,
    positive_or,
};
use crate::formats::segment::layout::MAX_COLORS;
use crate::tables::colors::resolve_palette;
use crate::tables::{Effect, Rgb, SegmentEffect, normalize_word};
use crate::{DeviceState, PatternSpec, Segment};

const DEFAULT_INTENSITY: i32 = 128;

/// Maps a pattern onto a single segment covering `led_count` LEDs.
///
/// At most three colors are carried; the background color fills the
/// second slot when only one color is set.
///
/// # Examples
/// ```
/// use lightcode_core::{PatternSpec, spec_to_state};
///
/// let spec = PatternSpec {
///     effect: "fire".to_string(),
///     colors: vec!["#FF0000".to_string()],
///     ..PatternSpec::default()
/// };
/// let state = spec_to_state(&spec, 60)?;
/// let segment = &state.segments[0];
/// assert_eq!((segment.effect_id, segment.intensity, segment.custom1), (49, 55, 120));
/// assert_eq!(segment.stop, 60);
/// # Ok::<(), lightcode_core::CodecError>(())
/// ```
pub fn spec_to_state(spec: &PatternSpec, led_count: u16) -> Result<DeviceState, CodecError> {
    if led_count == 0 {
        return Err(CodecError::Range("led count must be at least 1".to_string()));
    }
    let effect = Effect::parse_name(&spec.effect)
        .ok_or_else(|| CodecError::UnknownEffect(spec.effect.clone()))?;
    let chase = normalize_word(&spec.effect) == "chase";
    let target = segment_effect(effect, chase);

    let mut colors: Vec<Vec<i32>> = resolve_palette(&spec.colors)
        .into_iter()
        .take(MAX_COLORS)
        .map(rgb_triple)
        .collect();
    if colors.is_empty() {
        colors.push(rgb_triple(Rgb::WHITE));
    }
    let background = spec.background_color.as_deref().and_then(Rgb::parse);
    if let (1, Some(background)) = (colors.len(), background) {
        colors.push(rgb_triple(background));
    }

    let (intensity, custom1) = match target {
        SegmentEffect::Breathe => (0, 0),
        SegmentEffect::Sparkle => (positive_or(spec.density, DEFAULT_DENSITY), 0),
        SegmentEffect::Scanner => (
            positive_or(scaled(spec.eye_size, 25), 50),
            positive_or(scaled(spec.tail_length, 16), 64),
        ),
        SegmentEffect::Fire2012 => (
            positive_or(spec.cooling, DEFAULT_COOLING),
            positive_or(spec.sparking, DEFAULT_SPARKING),
        ),
        SegmentEffect::Colorwaves => (positive_or(scaled(spec.wave_count, 25), 75), 0),
        _ => (DEFAULT_INTENSITY, 0),
    };

    let segment = Segment {
        id: 0,
        start: 0,
        stop: i32::from(led_count),
        effect_id: i32::from(target.id()),
        speed: byte(nonzero_or(spec.speed, DEFAULT_SPEED)),
        intensity: byte(intensity),
        custom1: byte(custom1),
        reverse: spec.direction == Some(1),
        on: true,
        colors,
        ..Segment::default()
    };
    log::debug!(
        "converted pattern: effect={} -> fx {}",
        spec.effect,
        target.id()
    );
    Ok(DeviceState {
        on: true,
        brightness: byte(nonzero_or(spec.brightness, DEFAULT_BRIGHTNESS)),
        transition: 0,
        segments: vec![segment],
    })
}

fn segment_effect(effect: Effect, chase: bool) -> SegmentEffect {
    match effect {
        Effect::Solid => SegmentEffect::Solid,
        Effect::Pulse => SegmentEffect::Breathe,
        Effect::Sparkle => SegmentEffect::Sparkle,
        Effect::Gradient => SegmentEffect::Gradient,
        Effect::Fire => SegmentEffect::Fire2012,
        Effect::Candle => SegmentEffect::Candle,
        Effect::Wave if chase => SegmentEffect::Chase,
        Effect::Wave => SegmentEffect::Colorwaves,
        Effect::Rainbow => SegmentEffect::Rainbow,
        Effect::Scanner => SegmentEffect::Scanner,
        Effect::Wipe => SegmentEffect::Wipe,
    }
}

fn nonzero_or(value: Option<i32>, default: i32) -> i32 {
    match value {
        None | Some(0) => default,
        Some(value) => value,
    }
}

fn scaled(value: Option<i32>, factor: i32) -> Option<i32> {
    value.map(|value| value.saturating_mul(factor))
}

/// Segment byte fields hold 0-255.
fn byte(value: i32) -> i32 {
    i32::from(clamp_u8(value))
}

fn rgb_triple(rgb: Rgb) -> Vec<i32> {
    vec![i32::from(rgb.0), i32::from(rgb.1), i32::from(rgb.2)]
}
