use std::fmt;

use serde::Serialize;

use super::layout;
use super::opcode::{Opcode, Param};
use crate::error::CodecError;
use crate::formats::common::{ByteReader, xor_checksum};
use crate::formats::error::FormatError;

/// One decoded instruction; `offset` is relative to the start of the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub offset: usize,
    pub opcode: Opcode,
    pub operands: Vec<u8>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}: {}", self.offset, self.opcode.mnemonic())?;
        match (self.opcode, self.operands.as_slice()) {
            (Opcode::SetParam, [param]) => match Param::from_raw(*param) {
                Some(param) => write!(f, " {}", param.as_str()),
                None => write!(f, " 0x{param:02X}"),
            },
            (Opcode::PushColor, [r, g, b]) => write!(f, " #{r:02X}{g:02X}{b:02X}"),
            (Opcode::PushU16, [hi, lo]) => write!(f, " {}", u16::from_be_bytes([*hi, *lo])),
            (_, operands) => operands.iter().try_for_each(|op| write!(f, " {op}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyProgram {
    pub instructions: Vec<Instruction>,
    pub warnings: Vec<String>,
}

/// Disassembles a legacy program.
///
/// # Examples
/// ```
/// use lightcode_core::{PatternSpec, disassemble_legacy, encode_legacy};
///
/// let spec = PatternSpec { effect: "rainbow".to_string(), ..PatternSpec::default() };
/// let program = disassemble_legacy(&encode_legacy(&spec)?)?;
/// assert_eq!(program.instructions[0].to_string(), "0000: SET_PATTERN 10");
/// assert_eq!(program.instructions.last().unwrap().to_string(), "0010: HALT");
/// # Ok::<(), lightcode_core::CodecError>(())
/// ```
pub fn disassemble(bytes: &[u8]) -> Result<LegacyProgram, CodecError> {
    let reader = ByteReader::new(bytes);
    reader.require_len(layout::HEADER_LEN)?;
    reader.expect_magic(layout::MAGIC)?;
    reader.expect_version(layout::VERSION_OFFSET, layout::VERSION)?;
    let declared = reader.read_u16_le(layout::LENGTH_RANGE)? as usize;
    reader.expect_payload_len(declared, layout::HEADER_LEN)?;

    let code = reader.tail(layout::HEADER_LEN);
    let mut warnings = Vec::new();
    let stored = reader.read_u8(layout::CHECKSUM_OFFSET)?;
    let computed = xor_checksum(code);
    if stored != computed {
        log::warn!("legacy checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}");
        warnings.push(format!(
            "checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}"
        ));
    }
    if reader.read_u8(layout::FLAGS_OFFSET)? != 0 {
        warnings.push("non-zero header flags".to_string());
    }

    let code_reader = ByteReader::new(code);
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut halted = false;
    while offset < code.len() {
        if halted {
            warnings.push(format!(
                "{} byte(s) after HALT at offset {offset}",
                code.len() - offset
            ));
            break;
        }
        let byte = code_reader.read_u8(offset)?;
        let opcode = Opcode::from_raw(byte).ok_or(FormatError::UnknownOpcode {
            opcode: byte,
            offset,
        })?;
        let end = offset + 1 + opcode.operand_len();
        if end > code.len() {
            return Err(FormatError::Truncated {
                context: "instruction operand",
                needed: end,
                actual: code.len(),
            }
            .into());
        }
        let operands = code_reader.read_slice(offset + 1..end)?.to_vec();
        log::trace!("legacy {offset:04}: {}", opcode.mnemonic());
        instructions.push(Instruction {
            offset,
            opcode,
            operands,
        });
        halted = opcode == Opcode::Halt;
        offset = end;
    }
    if !halted {
        warnings.push("program does not end with HALT".to_string());
    }

    Ok(LegacyProgram {
        instructions,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternSpec;
    use crate::formats::legacy::encode;

    fn header(code: &[u8]) -> Vec<u8> {
        let mut bytes = b"LCL\x02".to_vec();
        bytes.extend_from_slice(&(code.len() as u16).to_le_bytes());
        bytes.push(xor_checksum(code));
        bytes.push(0);
        bytes.extend_from_slice(code);
        bytes
    }

    #[test]
    fn disassembles_encoded_fire() {
        let spec = PatternSpec {
            effect: "fire".to_string(),
            colors: vec!["#FF0000".to_string()],
            ..PatternSpec::default()
        };
        let program = disassemble(&encode(&spec).unwrap()).unwrap();
        assert!(program.warnings.is_empty());
        let text: Vec<String> = program.instructions.iter().map(|i| i.to_string()).collect();
        assert_eq!(text[0], "0000: SET_PATTERN 7");
        assert_eq!(text[2], "0004: SET_PARAM cooling");
        assert_eq!(text[5], "0010: PUSH_COLOR #FF0000");
        assert_eq!(text[6], "0014: PALETTE 1");
        assert_eq!(program.instructions.last().unwrap().opcode, Opcode::Halt);
    }

    #[test]
    fn unknown_opcode_is_a_format_error() {
        let err = disassemble(&header(&[0x50, 0x01, 0xEE])).unwrap_err();
        assert_eq!(
            err,
            CodecError::Format(FormatError::UnknownOpcode {
                opcode: 0xEE,
                offset: 2
            })
        );
    }

    #[test]
    fn missing_operand_is_truncated() {
        let err = disassemble(&header(&[0x05, 0xFF])).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::Truncated {
                context: "instruction operand",
                ..
            })
        ));
    }

    #[test]
    fn little_endian_length_is_checked() {
        let mut bytes = header(&[0x67]);
        bytes[4..6].copy_from_slice(&[0x00, 0x01]);
        let err = disassemble(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::LengthMismatch {
                declared: 256,
                actual: 1
            })
        ));
    }

    #[test]
    fn bytes_after_halt_warn() {
        let program = disassemble(&header(&[0x67, 0x00])).unwrap();
        assert_eq!(program.instructions.len(), 1);
        assert_eq!(program.warnings.len(), 1);
    }
}
