//! Legacy opcode-stream format (`LCL` version 2).
//!
//! The header matches Format A in shape but stores the code length
//! little-endian; the payload is an instruction stream for the firmware's
//! stack machine. Only the subset of opcodes a pattern compiles to is ever
//! emitted, but the disassembler understands the whole instruction set.

pub mod disassembler;
pub mod encoder;
pub mod layout;
pub mod levels;
pub mod opcode;

pub use disassembler::{Instruction, LegacyProgram, disassemble};
pub use encoder::encode;
pub use opcode::{Opcode, Param};
