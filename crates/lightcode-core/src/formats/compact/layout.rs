use std::ops::Range;

pub const MAGIC: &[u8; 3] = b"LCL";
pub const VERSION: u8 = 0x03;
pub const VERSION_OFFSET: usize = 3;
pub const LENGTH_RANGE: Range<usize> = 4..6;
pub const CHECKSUM_OFFSET: usize = 6;
pub const FLAGS_OFFSET: usize = 7;
pub const HEADER_LEN: usize = 8;

pub const EFFECT_OFFSET: usize = 8;
pub const BRIGHTNESS_OFFSET: usize = 9;
pub const SPEED_OFFSET: usize = 10;
pub const PARAM1_OFFSET: usize = 11;
pub const PARAM2_OFFSET: usize = 12;
pub const RESERVED1_OFFSET: usize = 13;
pub const DIRECTION_OFFSET: usize = 14;
pub const RESERVED2_OFFSET: usize = 15;
pub const PRIMARY_COLOR_OFFSET: usize = 16;
pub const PALETTE_COUNT_OFFSET: usize = 19;
pub const PALETTE_OFFSET: usize = 20;

pub const MAX_PALETTE: usize = 8;
pub const END_MARKER: u8 = 0x00;

pub const fn end_marker_offset(colors: usize) -> usize {
    PALETTE_OFFSET + colors * 3
}

pub const fn encoded_len(colors: usize) -> usize {
    end_marker_offset(colors) + 1
}
