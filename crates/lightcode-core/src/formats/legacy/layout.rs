use std::ops::Range;

pub const MAGIC: &[u8; 3] = b"LCL";
pub const VERSION: u8 = 0x02;
pub const VERSION_OFFSET: usize = 3;
/// Code length, little-endian (Format A uses big-endian here).
pub const LENGTH_RANGE: Range<usize> = 4..6;
pub const CHECKSUM_OFFSET: usize = 6;
pub const FLAGS_OFFSET: usize = 7;
pub const HEADER_LEN: usize = 8;

pub const MAX_PALETTE: usize = 8;
