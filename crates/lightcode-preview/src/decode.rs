use crate::error::PreviewError;
use crate::frame::{PreviewFrame, PreviewSegment};

const MAGIC: [u8; 4] = *b"WLED";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 8;
const GLOBAL_LEN: usize = 4;
const MAX_SEGMENTS: usize = 8;
const MAX_COLORS: usize = 3;
const POWER_FLAG: u8 = 0x01;

/// Sequential reader; every read advances the position.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn u8(&mut self) -> Option<u8> {
        self.take(1).map(|bytes| bytes[0])
    }

    fn u16(&mut self) -> Option<u16> {
        self.take(2).map(|bytes| u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

/// Decodes a segment binary for preview.
///
/// Checks run in order: minimum length, magic, version, declared length.
/// Segment checksum mismatches are recorded per segment instead of failing.
pub fn decode(bytes: &[u8]) -> Result<PreviewFrame, PreviewError> {
    let min_len = HEADER_LEN + GLOBAL_LEN;
    if bytes.len() < min_len {
        return Err(PreviewError::TooShort {
            needed: min_len,
            actual: bytes.len(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let too_short = PreviewError::TooShort {
        needed: min_len,
        actual: bytes.len(),
    };
    let mut found = [0u8; 4];
    found.copy_from_slice(cursor.take(4).ok_or(too_short.clone())?);
    if found != MAGIC {
        return Err(PreviewError::BadMagic { found });
    }
    let version = cursor.u8().ok_or(too_short.clone())?;
    if version != VERSION {
        return Err(PreviewError::UnsupportedVersion(version));
    }
    let flags = cursor.u8().ok_or(too_short.clone())?;
    let declared = usize::from(cursor.u16().ok_or(too_short.clone())?);
    if declared != cursor.remaining() {
        return Err(PreviewError::LengthMismatch {
            declared,
            actual: cursor.remaining(),
        });
    }

    let brightness = cursor.u8().ok_or(too_short.clone())?;
    let transition = cursor.u16().ok_or(too_short.clone())?;
    let count = usize::from(cursor.u8().ok_or(too_short)?);
    if count > MAX_SEGMENTS {
        return Err(PreviewError::TooManySegments {
            count,
            max: MAX_SEGMENTS,
        });
    }

    let mut segments = Vec::with_capacity(count);
    for index in 0..count {
        segments.push(read_segment(&mut cursor, index)?);
    }
    let trailing_bytes = cursor.remaining();
    if trailing_bytes > 0 {
        log::warn!("preview: {trailing_bytes} trailing byte(s) after last segment");
    }

    Ok(PreviewFrame {
        power: flags & POWER_FLAG != 0,
        brightness,
        transition,
        segments,
        trailing_bytes,
    })
}

fn read_segment(cursor: &mut Cursor<'_>, index: usize) -> Result<PreviewSegment, PreviewError> {
    let start_pos = cursor.pos;
    let truncated = |cursor: &Cursor<'_>| PreviewError::Truncated {
        index,
        offset: cursor.bytes.len(),
    };

    let fixed = cursor.take(14).ok_or_else(|| truncated(cursor))?;
    let color_count = usize::from(fixed[13]);
    if color_count > MAX_COLORS {
        return Err(PreviewError::TooManyColors {
            index,
            count: color_count,
            max: MAX_COLORS,
        });
    }
    let mut colors = Vec::with_capacity(color_count);
    for _ in 0..color_count {
        let rgb = cursor.take(3).ok_or_else(|| truncated(cursor))?;
        colors.push([rgb[0], rgb[1], rgb[2]]);
    }
    let body_end = cursor.pos;
    let stored = cursor.u8().ok_or_else(|| truncated(cursor))?;
    let computed = cursor.bytes[start_pos..body_end]
        .iter()
        .fold(0u8, |acc, byte| acc ^ byte);
    let checksum_ok = stored == computed;
    if !checksum_ok {
        log::warn!("preview segment {index}: checksum mismatch");
    }

    let flags = fixed[12];
    Ok(PreviewSegment {
        id: fixed[0],
        start: u16::from_be_bytes([fixed[1], fixed[2]]),
        stop: u16::from_be_bytes([fixed[3], fixed[4]]),
        effect_id: fixed[5],
        speed: fixed[6],
        intensity: fixed[7],
        custom: [fixed[8], fixed[9], fixed[10]],
        palette_id: fixed[11],
        reverse: flags & 0x01 != 0,
        mirror: flags & 0x02 != 0,
        on: flags & 0x04 != 0,
        colors,
        checksum_ok,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(segments: &[Vec<u8>]) -> Vec<u8> {
        let mut payload = vec![128, 0, 5, segments.len() as u8];
        for segment in segments {
            payload.extend_from_slice(segment);
            payload.push(segment.iter().fold(0, |acc, b| acc ^ b));
        }
        let mut bytes = b"WLED\x01\x01".to_vec();
        bytes.extend_from_slice(&(payload.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&payload);
        bytes
    }

    fn segment(effect: u8, colors: &[[u8; 3]]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 2, 0, 12, effect, 10, 20, 1, 2, 3, 4, 0x07, colors.len() as u8];
        for color in colors {
            bytes.extend_from_slice(color);
        }
        bytes
    }

    #[test]
    fn decodes_two_segments() {
        let frame = decode(&buffer(&[
            segment(49, &[[255, 0, 0], [0, 0, 0]]),
            segment(0, &[[1, 1, 1]]),
        ]))
        .unwrap();
        assert_eq!(frame.brightness, 128);
        assert_eq!(frame.transition, 5);
        assert_eq!(frame.segments.len(), 2);
        let first = &frame.segments[0];
        assert_eq!((first.start, first.stop), (2, 12));
        assert_eq!(first.custom, [1, 2, 3]);
        assert!(first.reverse && first.mirror && first.on);
        assert_eq!(frame.trailing_bytes, 0);
        assert!(frame.is_intact());
    }

    #[test]
    fn checksum_damage_is_recorded() {
        let mut bytes = buffer(&[segment(0, &[[9, 9, 9]])]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let frame = decode(&bytes).unwrap();
        assert!(!frame.segments[0].checksum_ok);
    }

    #[test]
    fn trailing_bytes_are_counted() {
        let mut bytes = buffer(&[segment(0, &[[1, 1, 1]])]);
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let declared = u16::from_be_bytes([bytes[6], bytes[7]]) + 2;
        bytes[6..8].copy_from_slice(&declared.to_be_bytes());
        let frame = decode(&bytes).unwrap();
        assert_eq!(frame.segments.len(), 1);
        assert_eq!(frame.trailing_bytes, 2);
        assert!(frame.segments[0].checksum_ok);
        assert!(!frame.is_intact());
    }

    #[test]
    fn validation_order() {
        assert!(matches!(decode(b"WLED"), Err(PreviewError::TooShort { .. })));

        let mut bytes = buffer(&[segment(0, &[])]);
        bytes[0] = b'X';
        bytes[4] = 2;
        assert!(matches!(decode(&bytes), Err(PreviewError::BadMagic { .. })));

        let mut bytes = buffer(&[segment(0, &[])]);
        bytes[4] = 2;
        assert_eq!(decode(&bytes), Err(PreviewError::UnsupportedVersion(2)));

        let mut bytes = buffer(&[segment(0, &[])]);
        bytes.pop();
        assert!(matches!(decode(&bytes), Err(PreviewError::LengthMismatch { .. })));
    }

    #[test]
    fn truncated_and_oversized_segments_fail() {
        let mut bytes = buffer(&[segment(0, &[[1, 2, 3]])]);
        bytes[11] = 2;
        assert_eq!(
            decode(&bytes),
            Err(PreviewError::Truncated {
                index: 1,
                offset: bytes.len()
            })
        );

        let mut bytes = buffer(&[segment(0, &[[1, 2, 3]])]);
        bytes[12 + 13] = 4;
        assert!(matches!(
            decode(&bytes),
            Err(PreviewError::TooManyColors { index: 0, .. })
        ));
    }
}
