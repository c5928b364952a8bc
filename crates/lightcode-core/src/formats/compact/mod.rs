//! Format A: fixed-layout compact pattern.
//!
//! An 8-byte header (`LCL`, version 3, big-endian payload length, XOR
//! checksum of the payload, flags) followed by twelve fixed parameter bytes,
//! a palette of 1-8 colors and a zero end marker.

pub mod decoder;
pub mod encoder;
pub mod layout;

pub use decoder::{DecodedSpec, decode_spec};
pub use encoder::encode_spec;
