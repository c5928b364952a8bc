pub(crate) mod reader;

pub(crate) use reader::ByteReader;

/// XOR of every byte; the checksum used by all three formats.
pub(crate) fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, byte| acc ^ byte)
}

pub(crate) fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}

pub(crate) fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::{clamp_u16, clamp_u8, xor_checksum};

    #[test]
    fn xor_checksum_empty_is_zero() {
        assert_eq!(xor_checksum(&[]), 0);
    }

    #[test]
    fn xor_checksum_cancels_pairs() {
        assert_eq!(xor_checksum(&[0xAA, 0x55, 0xAA]), 0x55);
    }

    #[test]
    fn clamps_saturate() {
        assert_eq!(clamp_u8(-4), 0);
        assert_eq!(clamp_u8(300), 255);
        assert_eq!(clamp_u16(70_000), u16::MAX);
        assert_eq!(clamp_u16(1200), 1200);
    }
}
