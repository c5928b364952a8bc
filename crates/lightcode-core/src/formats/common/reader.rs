use std::ops::Range;

use crate::formats::error::FormatError;

/// Bounds-checked view over an encoded buffer.
///
/// Every accessor returns `FormatError::TooShort` instead of panicking when
/// the requested bytes are not present.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FormatError> {
        if self.bytes.len() < needed {
            return Err(FormatError::TooShort {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FormatError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(FormatError::TooShort {
                needed: offset + 1,
                actual: self.bytes.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, FormatError> {
        let bytes = self.read_pair(range)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, FormatError> {
        let bytes = self.read_pair(range)?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], FormatError> {
        self.bytes
            .get(range.clone())
            .ok_or(FormatError::TooShort {
                needed: range.end,
                actual: self.bytes.len(),
            })
    }

    pub fn read_rgb(&self, offset: usize) -> Result<[u8; 3], FormatError> {
        let bytes = self.read_slice(offset..offset + 3)?;
        Ok([bytes[0], bytes[1], bytes[2]])
    }

    /// Everything from `start` to the end of the buffer.
    pub fn tail(&self, start: usize) -> &'a [u8] {
        self.bytes.get(start..).unwrap_or(&[])
    }

    pub fn expect_magic(&self, magic: &'static [u8]) -> Result<(), FormatError> {
        let actual = self.read_slice(0..magic.len())?;
        if actual != magic {
            return Err(FormatError::BadMagic {
                expected: magic,
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }

    pub fn expect_version(&self, offset: usize, expected: u8) -> Result<(), FormatError> {
        let version = self.read_u8(offset)?;
        if version != expected {
            return Err(FormatError::UnsupportedVersion { version, expected });
        }
        Ok(())
    }

    /// Compares a declared payload length against the bytes after `header_len`.
    pub fn expect_payload_len(
        &self,
        declared: usize,
        header_len: usize,
    ) -> Result<(), FormatError> {
        let actual = self.bytes.len().saturating_sub(header_len);
        if declared != actual {
            return Err(FormatError::LengthMismatch { declared, actual });
        }
        Ok(())
    }

    fn read_pair(&self, range: Range<usize>) -> Result<[u8; 2], FormatError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(FormatError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok([bytes[0], bytes[1]])
    }
}
