//! Format B: segment binary.
//!
//! Header `WLED` + version 1 + flags (bit0 master power) + big-endian payload
//! length, a 4-byte global block (brightness, transition, segment count) and
//! up to eight segment records. Each record carries its own XOR checksum
//! over the bytes before it, id byte included.
//!
//! Checksum mismatches and trailing bytes are reported as warnings; every
//! other structural problem is a `FormatError`.
//!
//! Version française (résumé):
//! En-tête `WLED`, bloc global, puis jusqu'à huit segments avec somme de
//! contrôle XOR par segment. Une somme invalide produit un avertissement.

pub mod decoder;
pub mod encoder;
pub mod layout;

pub use decoder::{DecodedState, decode_state};
pub use encoder::encode_state;

/// Segment flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentFlags {
    pub reverse: bool,
    pub mirror: bool,
    pub on: bool,
}

impl SegmentFlags {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            reverse: byte & layout::SEG_FLAG_REVERSE != 0,
            mirror: byte & layout::SEG_FLAG_MIRROR != 0,
            on: byte & layout::SEG_FLAG_ON != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.reverse {
            byte |= layout::SEG_FLAG_REVERSE;
        }
        if self.mirror {
            byte |= layout::SEG_FLAG_MIRROR;
        }
        if self.on {
            byte |= layout::SEG_FLAG_ON;
        }
        byte
    }
}
