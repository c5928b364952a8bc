use super::SegmentFlags;
use super::layout;
use crate::error::CodecError;
use crate::formats::common::{clamp_u8, clamp_u16, xor_checksum};
use crate::tables::Rgb;
use crate::{DeviceState, Segment};

/// Encodes a device state into a Format B buffer.
///
/// Numeric fields saturate to their wire width; a segment without colors is
/// written with a single white color and extra colors beyond three are
/// dropped. Run the validator first to have those cases reported instead.
///
/// # Examples
/// ```
/// use lightcode_core::{DeviceState, Segment, encode_state};
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
/// let bytes = encode_state(&state)?;
/// assert_eq!(bytes.len(), 30);
/// # Ok::<(), lightcode_core::CodecError>(())
/// ```
pub fn encode_state(state: &DeviceState) -> Result<Vec<u8>, CodecError> {
    let count = state.segments.len();
    if count == 0 || count > layout::MAX_SEGMENTS {
        return Err(CodecError::Range(format!(
            "segment count {count} outside 1-{}",
            layout::MAX_SEGMENTS
        )));
    }

    let mut out = vec![0u8; layout::HEADER_LEN];
    out.push(clamp_u8(state.brightness));
    out.extend_from_slice(&clamp_u16(state.transition).to_be_bytes());
    out.push(count as u8);
    for segment in &state.segments {
        encode_segment(segment, &mut out);
    }

    write_header(&mut out, state.on)?;
    log::debug!("encoded format B: segments={count} bytes={}", out.len());
    Ok(out)
}

fn encode_segment(segment: &Segment, out: &mut Vec<u8>) {
    let start = out.len();
    out.push(clamp_u8(segment.id));
    out.extend_from_slice(&clamp_u16(segment.start).to_be_bytes());
    out.extend_from_slice(&clamp_u16(segment.stop).to_be_bytes());
    out.push(clamp_u8(segment.effect_id));
    out.push(clamp_u8(segment.speed));
    out.push(clamp_u8(segment.intensity));
    out.push(clamp_u8(segment.custom1));
    out.push(clamp_u8(segment.custom2));
    out.push(clamp_u8(segment.custom3));
    out.push(clamp_u8(segment.palette_id));
    out.push(
        SegmentFlags {
            reverse: segment.reverse,
            mirror: segment.mirror,
            on: segment.on,
        }
        .to_byte(),
    );

    let colors: Vec<[u8; 3]> = if segment.colors.is_empty() {
        vec![Rgb::WHITE.to_bytes()]
    } else {
        segment
            .colors
            .iter()
            .take(layout::MAX_COLORS)
            .map(|color| color_bytes(color))
            .collect()
    };
    out.push(colors.len() as u8);
    for color in &colors {
        out.extend_from_slice(color);
    }

    let checksum = xor_checksum(&out[start..]);
    out.push(checksum);
}

fn color_bytes(color: &[i32]) -> [u8; 3] {
    let component = |index: usize| color.get(index).copied().map(clamp_u8).unwrap_or(0);
    [component(0), component(1), component(2)]
}

fn write_header(out: &mut [u8], power: bool) -> Result<(), CodecError> {
    let payload_len = u16::try_from(out.len() - layout::HEADER_LEN)
        .map_err(|_| CodecError::Range("payload exceeds 65535 bytes".to_string()))?;
    out[..layout::MAGIC.len()].copy_from_slice(layout::MAGIC);
    out[layout::VERSION_OFFSET] = layout::VERSION;
    out[layout::FLAGS_OFFSET] = if power { layout::FLAG_POWER } else { 0 };
    out[layout::LENGTH_RANGE].copy_from_slice(&payload_len.to_be_bytes());
    Ok(())
}
