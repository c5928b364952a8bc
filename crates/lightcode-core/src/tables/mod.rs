//! Read-only lookup data.
//!
//! - `colors`: named colors, named palettes and color literal parsing
//! - `levels`: semantic level -> number tables for the intent notation
//! - `effects`: closed effect enumerations for both wire formats
//!
//! Everything here is `const`/`static` data; nothing is mutated after
//! compilation, so lookups are safe from any thread.

pub mod colors;
pub mod effects;
pub mod levels;

pub use colors::Rgb;
pub use effects::{Effect, EffectInfo, SegmentEffect};

/// Lowercases a semantic value and folds spaces and dashes to underscores.
pub(crate) fn normalize_word(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
