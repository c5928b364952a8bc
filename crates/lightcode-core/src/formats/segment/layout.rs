use std::ops::Range;

pub const MAGIC: &[u8; 4] = b"WLED";
pub const VERSION: u8 = 0x01;
pub const VERSION_OFFSET: usize = 4;
pub const FLAGS_OFFSET: usize = 5;
pub const LENGTH_RANGE: Range<usize> = 6..8;
pub const HEADER_LEN: usize = 8;

pub const FLAG_POWER: u8 = 0x01;

pub const BRIGHTNESS_OFFSET: usize = 8;
pub const TRANSITION_RANGE: Range<usize> = 9..11;
pub const SEGMENT_COUNT_OFFSET: usize = 11;
pub const SEGMENTS_OFFSET: usize = 12;
pub const MIN_LEN: usize = SEGMENTS_OFFSET;

// Offsets relative to the start of a segment record.
pub const SEG_ID: usize = 0;
pub const SEG_START: Range<usize> = 1..3;
pub const SEG_STOP: Range<usize> = 3..5;
pub const SEG_EFFECT: usize = 5;
pub const SEG_SPEED: usize = 6;
pub const SEG_INTENSITY: usize = 7;
pub const SEG_CUSTOM1: usize = 8;
pub const SEG_CUSTOM2: usize = 9;
pub const SEG_CUSTOM3: usize = 10;
pub const SEG_PALETTE: usize = 11;
pub const SEG_FLAGS: usize = 12;
pub const SEG_COLOR_COUNT: usize = 13;
pub const SEG_COLORS: usize = 14;

pub const SEG_FLAG_REVERSE: u8 = 0x01;
pub const SEG_FLAG_MIRROR: u8 = 0x02;
pub const SEG_FLAG_ON: u8 = 0x04;

pub const MAX_SEGMENTS: usize = 8;
pub const MAX_COLORS: usize = 3;

/// Record size for a segment with `colors` colors, checksum included.
pub const fn segment_len(colors: usize) -> usize {
    SEG_COLORS + colors * 3 + 1
}

pub const fn shifted(range: Range<usize>, base: usize) -> Range<usize> {
    range.start + base..range.end + base
}
