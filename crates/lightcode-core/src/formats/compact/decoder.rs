use serde::Serialize;

use super::layout;
use crate::PatternSpec;
use crate::error::CodecError;
use crate::formats::common::{ByteReader, xor_checksum};
use crate::formats::error::FormatError;
use crate::tables::{Effect, Rgb};

/// Decoded Format A buffer plus non-fatal findings (checksum, trailing data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSpec {
    pub spec: PatternSpec,
    pub warnings: Vec<String>,
}

/// Decodes a Format A buffer back into a pattern.
///
/// Effect parameters are written back to the fields they came from; the
/// pulse period is derived from speed and is not stored separately.
pub fn decode_spec(bytes: &[u8]) -> Result<DecodedSpec, CodecError> {
    let reader = ByteReader::new(bytes);
    reader.require_len(layout::PALETTE_OFFSET)?;
    reader.expect_magic(layout::MAGIC)?;
    reader.expect_version(layout::VERSION_OFFSET, layout::VERSION)?;
    let declared = reader.read_u16_be(layout::LENGTH_RANGE)? as usize;
    reader.expect_payload_len(declared, layout::HEADER_LEN)?;

    let mut warnings = Vec::new();
    let stored = reader.read_u8(layout::CHECKSUM_OFFSET)?;
    let computed = xor_checksum(reader.tail(layout::HEADER_LEN));
    if stored != computed {
        log::warn!("format A checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}");
        warnings.push(format!(
            "checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}"
        ));
    }

    let effect_id = reader.read_u8(layout::EFFECT_OFFSET)?;
    let effect = Effect::from_raw(effect_id)
        .ok_or(CodecError::UnsupportedEffectId(i64::from(effect_id)))?;

    let count = reader.read_u8(layout::PALETTE_COUNT_OFFSET)? as usize;
    if count > layout::MAX_PALETTE {
        return Err(FormatError::CountExceeded {
            what: "palette color",
            count,
            max: layout::MAX_PALETTE,
        }
        .into());
    }
    let marker_offset = layout::end_marker_offset(count);
    if reader.len() <= marker_offset {
        return Err(FormatError::Truncated {
            context: "palette",
            needed: marker_offset + 1,
            actual: reader.len(),
        }
        .into());
    }

    let mut colors = Vec::with_capacity(count);
    for index in 0..count {
        let rgb = reader.read_rgb(layout::PALETTE_OFFSET + index * 3)?;
        colors.push(Rgb::from_bytes(rgb).to_hex());
    }
    if count == 0 {
        warnings.push("palette is empty".to_string());
    }

    let primary = Rgb::from_bytes(reader.read_rgb(layout::PRIMARY_COLOR_OFFSET)?).to_hex();
    if colors.first().is_some_and(|first| *first != primary) {
        warnings.push(format!(
            "primary color {primary} differs from first palette entry"
        ));
    }
    if reader.read_u8(marker_offset)? != layout::END_MARKER {
        warnings.push(format!("missing end marker at offset {marker_offset}"));
    }
    let trailing = reader.len() - marker_offset - 1;
    if trailing > 0 {
        warnings.push(format!("{trailing} trailing byte(s) after end marker"));
    }

    let mut spec = PatternSpec {
        effect: effect.as_str().to_string(),
        colors,
        brightness: Some(i32::from(reader.read_u8(layout::BRIGHTNESS_OFFSET)?)),
        speed: Some(i32::from(reader.read_u8(layout::SPEED_OFFSET)?)),
        direction: Some(i32::from(reader.read_u8(layout::DIRECTION_OFFSET)?)),
        ..PatternSpec::default()
    };
    let param1 = i32::from(reader.read_u8(layout::PARAM1_OFFSET)?);
    let param2 = i32::from(reader.read_u8(layout::PARAM2_OFFSET)?);
    match effect {
        Effect::Sparkle => spec.density = Some(param1),
        Effect::Fire | Effect::Candle => {
            spec.cooling = Some(param1);
            spec.sparking = Some(param2);
        }
        Effect::Wave => spec.wave_count = Some(param1),
        Effect::Pulse
        | Effect::Solid
        | Effect::Gradient
        | Effect::Rainbow
        | Effect::Scanner
        | Effect::Wipe => {}
    }

    log::debug!(
        "decoded format A: effect={} colors={} warnings={}",
        spec.effect,
        spec.colors.len(),
        warnings.len()
    );
    Ok(DecodedSpec { spec, warnings })
}
