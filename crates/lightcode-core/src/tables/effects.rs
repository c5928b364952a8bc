//! Closed effect enumerations.
//!
//! `Effect` is the Format A effect set addressed by name from the intent
//! notation. `SegmentEffect` is the subset of firmware effect IDs a
//! segment may carry in Format B. Unknown IDs and names are `None`.

use super::normalize_word;

const EFFECT_ID_SOLID: u8 = 0x01;
const EFFECT_ID_PULSE: u8 = 0x02;
const EFFECT_ID_SPARKLE: u8 = 0x04;
const EFFECT_ID_GRADIENT: u8 = 0x05;
const EFFECT_ID_FIRE: u8 = 0x07;
const EFFECT_ID_CANDLE: u8 = 0x08;
const EFFECT_ID_WAVE: u8 = 0x09;
const EFFECT_ID_RAINBOW: u8 = 0x0A;
const EFFECT_ID_SCANNER: u8 = 0x0B;
const EFFECT_ID_WIPE: u8 = 0x0C;

/// Format A effect.
///
/// # Examples
/// ```
/// use lightcode_core::Effect;
///
/// assert_eq!(Effect::parse_name("Breathe"), Some(Effect::Pulse));
/// assert_eq!(Effect::Fire.id(), 0x07);
/// assert_eq!(Effect::from_raw(0x0A), Some(Effect::Rainbow));
/// assert_eq!(Effect::from_raw(0x03), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Effect {
    Solid = EFFECT_ID_SOLID,
    Pulse = EFFECT_ID_PULSE,
    Sparkle = EFFECT_ID_SPARKLE,
    Gradient = EFFECT_ID_GRADIENT,
    Fire = EFFECT_ID_FIRE,
    Candle = EFFECT_ID_CANDLE,
    Wave = EFFECT_ID_WAVE,
    Rainbow = EFFECT_ID_RAINBOW,
    Scanner = EFFECT_ID_SCANNER,
    Wipe = EFFECT_ID_WIPE,
}

impl Effect {
    pub const ALL: [Effect; 10] = [
        Effect::Solid,
        Effect::Pulse,
        Effect::Sparkle,
        Effect::Gradient,
        Effect::Fire,
        Effect::Candle,
        Effect::Wave,
        Effect::Rainbow,
        Effect::Scanner,
        Effect::Wipe,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_PULSE => Self::Pulse,
            EFFECT_ID_SPARKLE => Self::Sparkle,
            EFFECT_ID_GRADIENT => Self::Gradient,
            EFFECT_ID_FIRE => Self::Fire,
            EFFECT_ID_CANDLE => Self::Candle,
            EFFECT_ID_WAVE => Self::Wave,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_SCANNER => Self::Scanner,
            EFFECT_ID_WIPE => Self::Wipe,
            _ => return None,
        })
    }

    /// Resolves an effect name, case-insensitive, aliases included.
    pub fn parse_name(name: &str) -> Option<Self> {
        Some(match normalize_word(name).as_str() {
            "solid" => Self::Solid,
            "pulse" | "breathe" => Self::Pulse,
            "sparkle" => Self::Sparkle,
            "gradient" => Self::Gradient,
            "fire" => Self::Fire,
            "candle" => Self::Candle,
            "wave" | "chase" => Self::Wave,
            "rainbow" => Self::Rainbow,
            "scanner" => Self::Scanner,
            "wipe" => Self::Wipe,
            _ => return None,
        })
    }

    /// Canonical name; decoding writes this back into the spec.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Pulse => "pulse",
            Self::Sparkle => "sparkle",
            Self::Gradient => "gradient",
            Self::Fire => "fire",
            Self::Candle => "candle",
            Self::Wave => "wave",
            Self::Rainbow => "rainbow",
            Self::Scanner => "scanner",
            Self::Wipe => "wipe",
        }
    }

    pub const fn is_fire(self) -> bool {
        matches!(self, Self::Fire | Self::Candle)
    }
}

/// Display metadata for a firmware segment effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub uses_palette: bool,
    pub min_colors: u8,
    pub max_colors: u8,
}

/// Firmware effect IDs accepted in a Format B segment.
///
/// # Examples
/// ```
/// use lightcode_core::SegmentEffect;
///
/// let fire = SegmentEffect::from_raw(49).unwrap();
/// assert_eq!(fire.info().name, "Fire 2012");
/// assert!(SegmentEffect::from_raw(1).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SegmentEffect {
    Solid = 0,
    Breathe = 2,
    Wipe = 3,
    Rainbow = 9,
    Scan = 10,
    Twinkle = 17,
    Sparkle = 20,
    Chase = 27,
    Scanner = 39,
    Gradient = 46,
    Palette = 48,
    Fire2012 = 49,
    Colorwaves = 50,
    Meteor = 59,
    Ripple = 62,
    Candle = 71,
    Fireworks = 72,
}

impl SegmentEffect {
    pub const ALL: [SegmentEffect; 17] = [
        SegmentEffect::Solid,
        SegmentEffect::Breathe,
        SegmentEffect::Wipe,
        SegmentEffect::Rainbow,
        SegmentEffect::Scan,
        SegmentEffect::Twinkle,
        SegmentEffect::Sparkle,
        SegmentEffect::Chase,
        SegmentEffect::Scanner,
        SegmentEffect::Gradient,
        SegmentEffect::Palette,
        SegmentEffect::Fire2012,
        SegmentEffect::Colorwaves,
        SegmentEffect::Meteor,
        SegmentEffect::Ripple,
        SegmentEffect::Candle,
        SegmentEffect::Fireworks,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.id() == value)
    }

    /// Accepts any integer; anything outside the supported set is `None`.
    pub fn from_id(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_raw)
    }

    pub const fn info(self) -> EffectInfo {
        match self {
            Self::Solid => info("Solid", "Static solid color", false, 1, 1),
            Self::Breathe => info("Breathe", "Smooth pulsing brightness", false, 1, 2),
            Self::Wipe => info("Wipe", "Color wipe across strip", false, 1, 2),
            Self::Rainbow => info("Rainbow", "Moving rainbow gradient", false, 0, 0),
            Self::Scan => info("Scan", "Single dot bouncing back and forth", false, 1, 2),
            Self::Twinkle => info("Twinkle", "Random fading twinkles", false, 1, 3),
            Self::Sparkle => info("Sparkle", "Random twinkling pixels", false, 1, 2),
            Self::Chase => info("Chase", "Theater chase pattern", false, 1, 2),
            Self::Scanner => info(
                "Scanner",
                "Knight Rider style scanner with trail",
                false,
                1,
                2,
            ),
            Self::Gradient => info("Gradient", "Static color gradient", true, 2, 3),
            Self::Palette => info("Palette", "Smooth palette cycling", true, 2, 3),
            Self::Fire2012 => info("Fire 2012", "Realistic fire simulation", true, 3, 3),
            Self::Colorwaves => info("Colorwaves", "Smooth flowing color waves", true, 2, 3),
            Self::Meteor => info("Meteor", "Shooting meteor with trail", false, 1, 2),
            Self::Ripple => info("Ripple", "Expanding ripple effect", false, 1, 3),
            Self::Candle => info("Candle", "Flickering candle flame", false, 1, 2),
            Self::Fireworks => info("Fireworks", "Multi-burst fireworks", false, 1, 3),
        }
    }
}

const fn info(
    name: &'static str,
    description: &'static str,
    uses_palette: bool,
    min_colors: u8,
    max_colors: u8,
) -> EffectInfo {
    EffectInfo {
        name,
        description,
        uses_palette,
        min_colors,
        max_colors,
    }
}

#[cfg(test)]
mod tests {
    use super::{Effect, SegmentEffect};

    #[test]
    fn effect_ids_round_trip() {
        for effect in Effect::ALL {
            assert_eq!(Effect::from_raw(effect.id()), Some(effect));
            assert_eq!(Effect::parse_name(effect.as_str()), Some(effect));
        }
    }

    #[test]
    fn aliases_share_ids() {
        assert_eq!(Effect::parse_name("chase"), Some(Effect::Wave));
        assert_eq!(Effect::parse_name("PULSE"), Some(Effect::Pulse));
        assert_eq!(Effect::parse_name("laser"), None);
    }

    #[test]
    fn segment_effects_reject_unsupported_ids() {
        assert_eq!(SegmentEffect::from_id(72), Some(SegmentEffect::Fireworks));
        assert_eq!(SegmentEffect::from_id(73), None);
        assert_eq!(SegmentEffect::from_id(-1), None);
        assert_eq!(SegmentEffect::from_id(300), None);
    }

    #[test]
    fn segment_effect_ids_are_distinct() {
        let mut ids: Vec<u8> = SegmentEffect::ALL.iter().map(|e| e.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SegmentEffect::ALL.len());
    }
}
