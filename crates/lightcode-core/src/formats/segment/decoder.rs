use serde::Serialize;

use super::SegmentFlags;
use super::layout::{self, shifted};
use crate::error::CodecError;
use crate::formats::common::{ByteReader, xor_checksum};
use crate::formats::error::FormatError;
use crate::{DeviceState, Segment};

/// Decoded Format B buffer plus non-fatal findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedState {
    pub state: DeviceState,
    pub warnings: Vec<String>,
}

/// Decodes a Format B buffer.
///
/// Validation order: minimum length, magic, version, declared length,
/// segment count, then each segment record. A segment checksum mismatch
/// is a warning, not an error.
///
/// # Examples
/// ```
/// use lightcode_core::{FormatError, CodecError, decode_format_b};
///
/// let err = decode_format_b(b"WLED\x01").unwrap_err();
/// assert!(matches!(err, CodecError::Format(FormatError::TooShort { .. })));
/// ```
pub fn decode_state(bytes: &[u8]) -> Result<DecodedState, CodecError> {
    let reader = ByteReader::new(bytes);
    reader.require_len(layout::MIN_LEN)?;
    reader.expect_magic(layout::MAGIC)?;
    reader.expect_version(layout::VERSION_OFFSET, layout::VERSION)?;
    let declared = reader.read_u16_be(layout::LENGTH_RANGE)? as usize;
    reader.expect_payload_len(declared, layout::HEADER_LEN)?;

    let flags = reader.read_u8(layout::FLAGS_OFFSET)?;
    let brightness = reader.read_u8(layout::BRIGHTNESS_OFFSET)?;
    let transition = reader.read_u16_be(layout::TRANSITION_RANGE)?;
    let count = reader.read_u8(layout::SEGMENT_COUNT_OFFSET)? as usize;
    if count > layout::MAX_SEGMENTS {
        return Err(FormatError::CountExceeded {
            what: "segment",
            count,
            max: layout::MAX_SEGMENTS,
        }
        .into());
    }

    let mut warnings = Vec::new();
    let mut segments = Vec::with_capacity(count);
    let mut offset = layout::SEGMENTS_OFFSET;
    for index in 0..count {
        let (segment, len) = decode_segment(&reader, offset, index, &mut warnings)?;
        segments.push(segment);
        offset += len;
    }
    if offset < reader.len() {
        warnings.push(format!(
            "{} trailing byte(s) after last segment",
            reader.len() - offset
        ));
    }

    log::debug!(
        "decoded format B: segments={} warnings={}",
        segments.len(),
        warnings.len()
    );
    Ok(DecodedState {
        state: DeviceState {
            on: flags & layout::FLAG_POWER != 0,
            brightness: i32::from(brightness),
            transition: i32::from(transition),
            segments,
        },
        warnings,
    })
}

fn decode_segment(
    reader: &ByteReader<'_>,
    base: usize,
    index: usize,
    warnings: &mut Vec<String>,
) -> Result<(Segment, usize), FormatError> {
    let fixed_end = base + layout::SEG_COLORS;
    if reader.len() < fixed_end {
        return Err(FormatError::Truncated {
            context: "segment header",
            needed: fixed_end,
            actual: reader.len(),
        });
    }
    let color_count = reader.read_u8(base + layout::SEG_COLOR_COUNT)? as usize;
    if color_count > layout::MAX_COLORS {
        return Err(FormatError::CountExceeded {
            what: "segment color",
            count: color_count,
            max: layout::MAX_COLORS,
        });
    }
    let len = layout::segment_len(color_count);
    if reader.len() < base + len {
        return Err(FormatError::Truncated {
            context: "segment",
            needed: base + len,
            actual: reader.len(),
        });
    }

    let checksum_offset = base + len - 1;
    let stored = reader.read_u8(checksum_offset)?;
    let computed = xor_checksum(reader.read_slice(base..checksum_offset)?);
    if stored != computed {
        log::warn!(
            "segment {index} checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}"
        );
        warnings.push(format!(
            "segment[{index}]: checksum mismatch (stored 0x{stored:02X}, computed 0x{computed:02X})"
        ));
    }

    let byte = |offset: usize| reader.read_u8(base + offset).map(i32::from);
    let flags = SegmentFlags::from_byte(reader.read_u8(base + layout::SEG_FLAGS)?);
    let mut colors: Vec<Vec<i32>> = Vec::with_capacity(color_count);
    for color in 0..color_count {
        let rgb = reader.read_rgb(base + layout::SEG_COLORS + color * 3)?;
        colors.push(rgb.iter().map(|component| i32::from(*component)).collect());
    }

    let segment = Segment {
        id: byte(layout::SEG_ID)?,
        start: i32::from(reader.read_u16_be(shifted(layout::SEG_START, base))?),
        stop: i32::from(reader.read_u16_be(shifted(layout::SEG_STOP, base))?),
        effect_id: byte(layout::SEG_EFFECT)?,
        speed: byte(layout::SEG_SPEED)?,
        intensity: byte(layout::SEG_INTENSITY)?,
        custom1: byte(layout::SEG_CUSTOM1)?,
        custom2: byte(layout::SEG_CUSTOM2)?,
        custom3: byte(layout::SEG_CUSTOM3)?,
        palette_id: byte(layout::SEG_PALETTE)?,
        reverse: flags.reverse,
        mirror: flags.mirror,
        on: flags.on,
        colors,
    };
    Ok((segment, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::segment::encode_state;

    fn sample() -> DeviceState {
        DeviceState {
            on: true,
            brightness: 180,
            transition: 7,
            segments: vec![
                Segment {
                    id: 0,
                    start: 0,
                    stop: 30,
                    effect_id: 49,
                    speed: 128,
                    intensity: 200,
                    custom1: 55,
                    custom2: 120,
                    custom3: 0,
                    palette_id: 35,
                    reverse: false,
                    mirror: true,
                    on: true,
                    colors: vec![vec![255, 0, 0], vec![255, 165, 0], vec![0, 0, 0]],
                },
                Segment {
                    id: 1,
                    start: 30,
                    stop: 300,
                    effect_id: 2,
                    speed: 64,
                    reverse: true,
                    on: false,
                    colors: vec![vec![0, 0, 255]],
                    ..Segment::default()
                },
            ],
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let bytes = encode_state(&sample()).unwrap();
        let decoded = decode_state(&bytes).unwrap();
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.state, sample());
    }

    #[test]
    fn bad_magic_is_rejected_before_version() {
        let mut bytes = encode_state(&sample()).unwrap();
        bytes[0] = b'X';
        bytes[layout::VERSION_OFFSET] = 9;
        let err = decode_state(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::Format(FormatError::BadMagic { .. })));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut bytes = encode_state(&sample()).unwrap();
        bytes.push(0);
        let err = decode_state(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn segment_count_over_limit_is_rejected() {
        let mut bytes = encode_state(&sample()).unwrap();
        bytes[layout::SEGMENT_COUNT_OFFSET] = 9;
        let err = decode_state(&bytes).unwrap_err();
        assert_eq!(
            err,
            CodecError::Format(FormatError::CountExceeded {
                what: "segment",
                count: 9,
                max: 8
            })
        );
    }

    #[test]
    fn declared_segment_missing_is_truncated() {
        let mut bytes = encode_state(&sample()).unwrap();
        bytes[layout::SEGMENT_COUNT_OFFSET] = 3;
        let err = decode_state(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::Truncated { .. })
        ));
    }

    #[test]
    fn color_count_over_limit_is_rejected() {
        let mut bytes = encode_state(&sample()).unwrap();
        bytes[layout::SEGMENTS_OFFSET + layout::SEG_COLOR_COUNT] = 4;
        let err = decode_state(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::CountExceeded {
                what: "segment color",
                ..
            })
        ));
    }

    #[test]
    fn corrupted_segment_checksum_warns() {
        let mut bytes = encode_state(&sample()).unwrap();
        let first_checksum = layout::SEGMENTS_OFFSET + layout::segment_len(3) - 1;
        bytes[first_checksum] ^= 0x01;
        let decoded = decode_state(&bytes).unwrap();
        assert_eq!(decoded.state, sample());
        assert_eq!(decoded.warnings.len(), 1);
        assert!(decoded.warnings[0].starts_with("segment[0]"));
    }
}
