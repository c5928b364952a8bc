//! Wire formats.
//!
//! Each format follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `encoder`: value -> bytes, header written last
//! - `decoder` / `disassembler`: bytes -> value through `common::ByteReader`
//!   (no direct byte indexing)
//! - `error`: one `FormatError` shared by all formats
//!
//! Formats:
//! - `compact`: Format A, fixed layout, magic `LCL` version 3
//! - `segment`: Format B, segment list, magic `WLED` version 1
//! - `legacy`: opcode stream, magic `LCL` version 2
//!
//! Version française (résumé):
//! Chaque format sépare les positions (`layout`), l'encodage et le décodage.
//! Les décodeurs valident dans l'ordre: longueur minimale, magie, version,
//! longueur déclarée, puis le contenu.

pub(crate) mod common;
pub mod compact;
pub mod error;
pub mod legacy;
pub mod segment;

use serde::Serialize;

/// Binary format identified from magic bytes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryFormat {
    FormatA,
    FormatB,
    Unknown,
}

impl BinaryFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryFormat::FormatA => "format_a",
            BinaryFormat::FormatB => "format_b",
            BinaryFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a buffer by its magic prefix. Nothing past the magic is read.
///
/// # Examples
/// ```
/// use lightcode_core::{BinaryFormat, detect_binary_format};
///
/// assert_eq!(detect_binary_format(b"LCL\x03"), BinaryFormat::FormatA);
/// assert_eq!(detect_binary_format(b"WLED\x01"), BinaryFormat::FormatB);
/// assert_eq!(detect_binary_format(b"WL"), BinaryFormat::Unknown);
/// ```
pub fn detect_binary_format(bytes: &[u8]) -> BinaryFormat {
    if bytes.starts_with(compact::layout::MAGIC) {
        BinaryFormat::FormatA
    } else if bytes.starts_with(segment::layout::MAGIC) {
        BinaryFormat::FormatB
    } else {
        BinaryFormat::Unknown
    }
}
