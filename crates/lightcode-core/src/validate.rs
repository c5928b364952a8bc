//! Range and structure checks run before anything is encoded.
//!
//! Both entry points collect every violation in one pass and never stop at
//! the first; the message list is meant to be shown to the author as is.

use crate::formats::segment::layout::{MAX_COLORS, MAX_SEGMENTS};
use crate::tables::colors::{ColorValue, resolve_color};
use crate::tables::{Effect, SegmentEffect};
use crate::{DeviceState, PatternSpec, Segment};

const BYTE_MAX: i64 = 255;
const WORD_MAX: i64 = 65_535;

struct Report {
    errors: Vec<String>,
}

impl Report {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn push(&mut self, message: String) {
        self.errors.push(message);
    }

    fn range(&mut self, prefix: &str, field: &str, value: impl Into<i64>, max: i64) {
        let value = value.into();
        if !(0..=max).contains(&value) {
            self.errors
                .push(format!("{prefix}{field} {value} out of range (0-{max})"));
        }
    }

    fn finish(self) -> (bool, Vec<String>) {
        (self.errors.is_empty(), self.errors)
    }
}

/// Validates a pattern before Format A encoding.
///
/// # Examples
/// ```
/// use lightcode_core::{PatternSpec, validate_spec};
///
/// let spec = PatternSpec { effect: "laser".to_string(), ..PatternSpec::default() };
/// let (ok, errors) = validate_spec(&spec);
/// assert!(!ok);
/// assert_eq!(errors, vec!["unknown effect 'laser'", "at least one color is required"]);
/// ```
pub fn validate_spec(spec: &PatternSpec) -> (bool, Vec<String>) {
    let mut report = Report::new();

    if Effect::parse_name(&spec.effect).is_none() {
        report.push(format!("unknown effect '{}'", spec.effect));
    }
    if spec.colors.is_empty() {
        report.push("at least one color is required".to_string());
    }
    for (index, color) in spec.colors.iter().enumerate() {
        if let ColorValue::Unresolved(raw) = resolve_color(color) {
            report.push(format!("color[{index}]: cannot resolve '{raw}'"));
        }
    }

    let fields = [
        ("brightness", spec.brightness),
        ("speed", spec.speed),
        ("density", spec.density),
        ("cooling", spec.cooling),
        ("sparking", spec.sparking),
        ("wave_count", spec.wave_count),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            report.range("", field, value, BYTE_MAX);
        }
    }
    if let Some(direction) = spec.direction.filter(|d| !matches!(d, 0 | 1)) {
        report.push(format!("direction {direction} must be 0 or 1"));
    }

    report.finish()
}

/// Validates a device state before Format B encoding.
///
/// # Examples
/// ```
/// use lightcode_core::{DeviceState, validate_state};
///
/// let (ok, errors) = validate_state(&DeviceState::default());
/// assert!(!ok);
/// assert_eq!(errors, vec!["at least one segment is required"]);
/// ```
pub fn validate_state(state: &DeviceState) -> (bool, Vec<String>) {
    let mut report = Report::new();

    report.range("", "brightness", state.brightness, BYTE_MAX);
    report.range("", "transition", state.transition, WORD_MAX);
    if state.segments.is_empty() {
        report.push("at least one segment is required".to_string());
    }
    if state.segments.len() > MAX_SEGMENTS {
        report.push(format!(
            "too many segments: {} (max {MAX_SEGMENTS})",
            state.segments.len()
        ));
    }
    for (index, segment) in state.segments.iter().enumerate() {
        validate_segment(&mut report, index, segment);
    }

    report.finish()
}

fn validate_segment(report: &mut Report, index: usize, segment: &Segment) {
    let prefix = format!("segment[{index}]: ");

    report.range(&prefix, "id", segment.id, BYTE_MAX);
    if segment.start < 0 {
        report.push(format!("{prefix}start {} cannot be negative", segment.start));
    }
    if segment.stop < 0 {
        report.push(format!("{prefix}stop {} cannot be negative", segment.stop));
    }
    if segment.stop <= segment.start {
        report.push(format!(
            "{prefix}stop {} must be greater than start {}",
            segment.stop, segment.start
        ));
    }
    if i64::from(segment.stop) > WORD_MAX {
        report.range(&prefix, "stop", segment.stop, WORD_MAX);
    }
    if SegmentEffect::from_id(i64::from(segment.effect_id)).is_none() {
        report.push(format!(
            "{prefix}unsupported effect ID {}",
            segment.effect_id
        ));
    }

    let bytes = [
        ("speed", segment.speed),
        ("intensity", segment.intensity),
        ("custom1", segment.custom1),
        ("custom2", segment.custom2),
        ("custom3", segment.custom3),
        ("palette", segment.palette_id),
    ];
    for (field, value) in bytes {
        report.range(&prefix, field, value, BYTE_MAX);
    }

    if segment.colors.is_empty() {
        report.push(format!("{prefix}at least one color is required"));
    }
    if segment.colors.len() > MAX_COLORS {
        report.push(format!(
            "{prefix}too many colors: {} (max {MAX_COLORS})",
            segment.colors.len()
        ));
    }
    for (color_index, color) in segment.colors.iter().enumerate() {
        if color.len() != 3 {
            report.push(format!(
                "{prefix}color[{color_index}] must have 3 components (RGB), got {}",
                color.len()
            ));
            continue;
        }
        for (component, value) in color.iter().enumerate() {
            if !(0..=BYTE_MAX).contains(&i64::from(*value)) {
                report.push(format!(
                    "{prefix}color[{color_index}][{component}] value {value} out of range (0-255)"
                ));
            }
        }
    }
}

/// Segments with fewer colors than their effect draws with. These still
/// encode; the firmware fills the missing slots from its palette.
pub(crate) fn color_count_warnings(state: &DeviceState) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, segment) in state.segments.iter().enumerate() {
        let Some(effect) = SegmentEffect::from_id(i64::from(segment.effect_id)) else {
            continue;
        };
        let info = effect.info();
        if segment.colors.len() < usize::from(info.min_colors) {
            warnings.push(format!(
                "segment[{index}]: {} expects at least {} colors, got {}",
                info.name,
                info.min_colors,
                segment.colors.len()
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: i32, stop: i32) -> Segment {
        Segment {
            start,
            stop,
            on: true,
            colors: vec![vec![255, 255, 255]],
            ..Segment::default()
        }
    }

    fn state(segments: Vec<Segment>) -> DeviceState {
        DeviceState {
            on: true,
            brightness: 128,
            transition: 0,
            segments,
        }
    }

    #[test]
    fn valid_state_has_no_errors() {
        assert_eq!(validate_state(&state(vec![segment(0, 10)])), (true, Vec::new()));
    }

    #[test]
    fn four_violations_reported_together() {
        let mut segments = vec![segment(0, 10); 8];
        segments[1] = segment(5, 5);
        segments[2].colors = vec![vec![256, 0, 0]];
        segments.push(segment(0, 10));
        let mut device = state(segments);
        device.brightness = 300;

        let (ok, errors) = validate_state(&device);
        assert!(!ok);
        assert_eq!(
            errors,
            vec![
                "brightness 300 out of range (0-255)",
                "too many segments: 9 (max 8)",
                "segment[1]: stop 5 must be greater than start 5",
                "segment[2]: color[0][0] value 256 out of range (0-255)",
            ]
        );
    }

    #[test]
    fn segment_fields_are_individually_scoped() {
        let mut bad = segment(-1, 70_000);
        bad.effect_id = 1;
        bad.speed = 256;
        bad.palette_id = -3;
        bad.colors = vec![vec![1, 2]; 4];
        let (_, errors) = validate_state(&state(vec![bad]));
        assert_eq!(
            errors,
            vec![
                "segment[0]: start -1 cannot be negative",
                "segment[0]: stop 70000 out of range (0-65535)",
                "segment[0]: unsupported effect ID 1",
                "segment[0]: speed 256 out of range (0-255)",
                "segment[0]: palette -3 out of range (0-255)",
                "segment[0]: too many colors: 4 (max 3)",
                "segment[0]: color[0] must have 3 components (RGB), got 2",
                "segment[0]: color[1] must have 3 components (RGB), got 2",
                "segment[0]: color[2] must have 3 components (RGB), got 2",
                "segment[0]: color[3] must have 3 components (RGB), got 2",
            ]
        );
    }

    #[test]
    fn segment_id_must_fit_a_byte() {
        let mut high = segment(0, 10);
        high.id = 300;
        let mut negative = segment(10, 20);
        negative.id = -1;
        let (ok, errors) = validate_state(&state(vec![high, negative]));
        assert!(!ok);
        assert_eq!(
            errors,
            vec![
                "segment[0]: id 300 out of range (0-255)",
                "segment[1]: id -1 out of range (0-255)",
            ]
        );
    }

    #[test]
    fn short_palettes_warn_per_effect() {
        let mut fire = segment(0, 10);
        fire.effect_id = 49;
        let mut rainbow = segment(10, 20);
        rainbow.effect_id = 9;
        let solid = segment(20, 30);
        let warnings = color_count_warnings(&state(vec![fire, rainbow, solid]));
        assert_eq!(
            warnings,
            vec!["segment[0]: Fire 2012 expects at least 3 colors, got 1"]
        );
    }

    #[test]
    fn transition_is_sixteen_bit() {
        let mut device = state(vec![segment(0, 1)]);
        device.transition = 65_536;
        let (_, errors) = validate_state(&device);
        assert_eq!(errors, vec!["transition 65536 out of range (0-65535)"]);
    }

    #[test]
    fn spec_checks_colors_and_ranges() {
        let spec = PatternSpec {
            effect: "fire".to_string(),
            colors: vec!["#FF0000".to_string(), "glitter".to_string()],
            brightness: Some(256),
            cooling: Some(-1),
            direction: Some(2),
            ..PatternSpec::default()
        };
        let (ok, errors) = validate_spec(&spec);
        assert!(!ok);
        assert_eq!(
            errors,
            vec![
                "color[1]: cannot resolve 'glitter'",
                "brightness 256 out of range (0-255)",
                "cooling -1 out of range (0-255)",
                "direction 2 must be 0 or 1",
            ]
        );
    }

    #[test]
    fn spec_checks_wave_count() {
        let spec = PatternSpec {
            effect: "wave".to_string(),
            colors: vec!["ocean".to_string()],
            wave_count: Some(300),
            ..PatternSpec::default()
        };
        assert_eq!(
            validate_spec(&spec),
            (false, vec!["wave_count 300 out of range (0-255)".to_string()])
        );
    }

    #[test]
    fn spec_accepts_named_colors_and_schemes() {
        let spec = PatternSpec {
            effect: "Chase".to_string(),
            colors: vec!["teal".to_string(), "ocean".to_string()],
            ..PatternSpec::default()
        };
        assert_eq!(validate_spec(&spec), (true, Vec::new()));
    }
}
