use super::layout;
use crate::PatternSpec;
use crate::error::CodecError;
use crate::formats::common::{clamp_u8, xor_checksum};
use crate::tables::colors::resolve_palette;
use crate::tables::{Effect, Rgb};

pub const DEFAULT_BRIGHTNESS: i32 = 200;
pub const DEFAULT_SPEED: i32 = 128;
pub const DEFAULT_DENSITY: i32 = 128;
pub const DEFAULT_COOLING: i32 = 55;
pub const DEFAULT_SPARKING: i32 = 120;
pub const DEFAULT_WAVE_COUNT: i32 = 3;
const MAX_WAVE_COUNT: i32 = 10;
const MIN_PULSE_PERIOD: i32 = 10;

/// Encodes a pattern into a Format A buffer.
///
/// Unset or zero brightness and speed take their defaults, the palette is
/// truncated to eight colors and colors that do not resolve encode as white.
///
/// # Examples
/// ```
/// use lightcode_core::{PatternSpec, encode_spec};
///
/// let spec = PatternSpec {
///     effect: "fire".to_string(),
///     colors: vec!["#FF0000".to_string()],
///     ..PatternSpec::default()
/// };
/// let bytes = encode_spec(&spec)?;
/// assert_eq!(&bytes[..4], b"LCL\x03");
/// assert_eq!(bytes.len(), 24);
/// # Ok::<(), lightcode_core::CodecError>(())
/// ```
pub fn encode_spec(spec: &PatternSpec) -> Result<Vec<u8>, CodecError> {
    let effect = Effect::parse_name(&spec.effect)
        .ok_or_else(|| CodecError::UnknownEffect(spec.effect.clone()))?;

    let brightness = nonzero_or(spec.brightness, DEFAULT_BRIGHTNESS);
    let speed = nonzero_or(spec.speed, DEFAULT_SPEED);
    let (param1, param2) = effect_params(effect, spec, speed);
    let direction = spec.direction.unwrap_or(0) & 1;

    let mut palette = resolve_palette(&spec.colors);
    if palette.is_empty() {
        palette.push(Rgb::WHITE);
    }
    if palette.len() > layout::MAX_PALETTE {
        log::debug!(
            "truncating palette from {} to {} colors",
            palette.len(),
            layout::MAX_PALETTE
        );
        palette.truncate(layout::MAX_PALETTE);
    }

    let mut out = vec![0u8; layout::encoded_len(palette.len())];
    out[layout::EFFECT_OFFSET] = effect.id();
    out[layout::BRIGHTNESS_OFFSET] = brightness;
    out[layout::SPEED_OFFSET] = speed;
    out[layout::PARAM1_OFFSET] = param1;
    out[layout::PARAM2_OFFSET] = param2;
    out[layout::RESERVED1_OFFSET] = 0;
    out[layout::DIRECTION_OFFSET] = direction as u8;
    out[layout::RESERVED2_OFFSET] = 0;
    out[layout::PRIMARY_COLOR_OFFSET..layout::PRIMARY_COLOR_OFFSET + 3]
        .copy_from_slice(&palette[0].to_bytes());
    out[layout::PALETTE_COUNT_OFFSET] = palette.len() as u8;
    for (index, color) in palette.iter().enumerate() {
        let offset = layout::PALETTE_OFFSET + index * 3;
        out[offset..offset + 3].copy_from_slice(&color.to_bytes());
    }
    out[layout::end_marker_offset(palette.len())] = layout::END_MARKER;

    write_header(&mut out);
    log::debug!(
        "encoded format A: effect={} colors={} bytes={}",
        effect.as_str(),
        palette.len(),
        out.len()
    );
    Ok(out)
}

/// Effect-specific `(param1, param2)` pair.
pub(crate) fn effect_params(effect: Effect, spec: &PatternSpec, speed: u8) -> (u8, u8) {
    match effect {
        Effect::Sparkle => (clamp_u8(positive_or(spec.density, DEFAULT_DENSITY)), 0),
        Effect::Pulse => {
            let period = (255 - i32::from(speed)).max(MIN_PULSE_PERIOD);
            (clamp_u8(period), 0)
        }
        Effect::Fire | Effect::Candle => (
            clamp_u8(positive_or(spec.cooling, DEFAULT_COOLING)),
            clamp_u8(positive_or(spec.sparking, DEFAULT_SPARKING)),
        ),
        Effect::Wave => {
            let waves = positive_or(spec.wave_count, DEFAULT_WAVE_COUNT).min(MAX_WAVE_COUNT);
            (clamp_u8(waves), 0)
        }
        Effect::Solid | Effect::Gradient | Effect::Rainbow | Effect::Scanner | Effect::Wipe => {
            (0, 0)
        }
    }
}

/// Unset, zero and negative values all take the default.
pub(crate) fn positive_or(value: Option<i32>, default: i32) -> i32 {
    value.filter(|value| *value > 0).unwrap_or(default)
}

fn nonzero_or(value: Option<i32>, default: i32) -> u8 {
    match value {
        None | Some(0) => clamp_u8(default),
        Some(value) => clamp_u8(value),
    }
}

fn write_header(out: &mut [u8]) {
    let payload_len = (out.len() - layout::HEADER_LEN) as u16;
    let checksum = xor_checksum(&out[layout::HEADER_LEN..]);
    out[..layout::MAGIC.len()].copy_from_slice(layout::MAGIC);
    out[layout::VERSION_OFFSET] = layout::VERSION;
    out[layout::LENGTH_RANGE].copy_from_slice(&payload_len.to_be_bytes());
    out[layout::CHECKSUM_OFFSET] = checksum;
    out[layout::FLAGS_OFFSET] = 0;
}
