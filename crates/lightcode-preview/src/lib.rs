//! Preview-side decoder for segment binaries (`WLED` version 1).
//!
//! This crate is written against the byte layout only and shares no code
//! with the encoder, so it can catch layout drift between the two. Decoding
//! tolerates checksum damage: each segment records whether its checksum
//! matched and rendering can continue on partially corrupted data.
//!
//! # Examples
//! ```
//! use lightcode_preview::{RendererKind, decode};
//!
//! let mut bytes = b"WLED\x01\x01\x00\x16".to_vec();
//! bytes.extend_from_slice(&[200, 0, 0, 1]);
//! let segment = [0u8, 0, 0, 0, 8, 0, 128, 128, 0, 0, 0, 0, 0x04, 1, 255, 255, 255];
//! let checksum = segment.iter().fold(0u8, |acc, b| acc ^ b);
//! bytes.extend_from_slice(&segment);
//! bytes.push(checksum);
//!
//! let frame = decode(&bytes)?;
//! assert!(frame.power);
//! assert_eq!(frame.segments[0].len(), 8);
//! assert_eq!(frame.segments[0].renderer(), Some(RendererKind::Solid));
//! # Ok::<(), lightcode_preview::PreviewError>(())
//! ```

mod decode;
mod error;
mod frame;
mod renderer;

pub use decode::decode;
pub use error::PreviewError;
pub use frame::{PreviewFrame, PreviewSegment};
pub use renderer::RendererKind;
