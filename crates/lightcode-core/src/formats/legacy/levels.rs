//! Value tables of the version 2 firmware.
//!
//! Pattern fields hold Format A level values. The v2 firmware uses its own
//! scale for most parameters, so a field is first mapped back to its level
//! word through the intent table, then looked up here. Values that match no
//! word are written as-is.

use crate::tables::levels::{
    BRIGHTNESS, DENSITY, EYE_SIZE, FLAME_HEIGHT, LevelTable, RHYTHM, SPARK_FREQUENCY, SPEED,
    TAIL_LENGTH, WAVE_COUNT,
};

/// Word-keyed v2 values for one parameter.
#[derive(Debug, Clone, Copy)]
pub struct LegacyLevels {
    /// Intent table whose values the pattern field carries.
    pub source: &'static LevelTable,
    pub entries: &'static [(&'static str, i32)],
    pub default: i32,
}

impl LegacyLevels {
    /// Maps a pattern field onto the v2 scale; unset uses the v2 default.
    pub fn value(&self, field: Option<i32>) -> i32 {
        let Some(value) = field else {
            return self.default;
        };
        self.translate(value).unwrap_or(value)
    }

    /// Maps a level value to its v2 value through the first word that carries it.
    pub fn translate(&self, value: i32) -> Option<i32> {
        let (word, _) = self
            .source
            .entries
            .iter()
            .find(|(_, level)| *level == value)?;
        self.entries
            .iter()
            .find(|(name, _)| name == word)
            .map(|(_, legacy)| *legacy)
    }
}

/// Speed is an index into eight firmware steps.
pub const SPEED_INDEX: LegacyLevels = LegacyLevels {
    source: &SPEED,
    entries: &[
        ("frozen", 0),
        ("glacial", 1),
        ("very_slow", 2),
        ("slow", 3),
        ("medium", 4),
        ("fast", 5),
        ("very_fast", 6),
        ("frantic", 7),
    ],
    default: 4,
};

pub const MAX_SPEED_INDEX: i32 = 7;

pub const BRIGHTNESS_LEVEL: LegacyLevels = LegacyLevels {
    source: &BRIGHTNESS,
    entries: &[("dim", 51), ("medium", 128), ("bright", 204), ("full", 255)],
    default: 204,
};

pub const COOLING: LegacyLevels = LegacyLevels {
    source: &FLAME_HEIGHT,
    entries: &[
        ("very_short", 200),
        ("short", 150),
        ("medium", 100),
        ("tall", 55),
        ("very_tall", 20),
    ],
    default: 100,
};

pub const SPARKING: LegacyLevels = LegacyLevels {
    source: &SPARK_FREQUENCY,
    entries: &[
        ("rare", 30),
        ("occasional", 60),
        ("frequent", 120),
        ("high", 180),
        ("intense", 230),
    ],
    default: 120,
};

pub const DENSITY_LEVEL: LegacyLevels = LegacyLevels {
    source: &DENSITY,
    entries: &[
        ("sparse", 5),
        ("light", 13),
        ("medium", 26),
        ("dense", 51),
        ("packed", 102),
    ],
    default: 26,
};

pub const WAVE_COUNT_LEVEL: LegacyLevels = LegacyLevels {
    source: &WAVE_COUNT,
    entries: &[("one", 1), ("few", 2), ("several", 4), ("many", 8)],
    default: 2,
};

/// Breathing period in firmware beats; calmer is longer.
pub const RHYTHM_BEATS: LegacyLevels = LegacyLevels {
    source: &RHYTHM,
    entries: &[
        ("calm", 8),
        ("relaxed", 6),
        ("steady", 4),
        ("energetic", 2),
        ("frantic", 1),
    ],
    default: 4,
};

pub const HEAD_SIZE: LegacyLevels = LegacyLevels {
    source: &EYE_SIZE,
    entries: &[("tiny", 1), ("small", 3), ("medium", 5), ("large", 10)],
    default: 3,
};

pub const TAIL_LENGTH_LEVEL: LegacyLevels = LegacyLevels {
    source: &TAIL_LENGTH,
    entries: &[
        ("none", 0),
        ("short", 5),
        ("medium", 10),
        ("long", 20),
    ],
    default: 10,
};

/// Palette used by fire, candle, wave and gradient when no color is given.
pub const DEFAULT_PALETTE: [[u8; 3]; 5] = [
    [0, 0, 0],
    [51, 17, 0],
    [255, 68, 0],
    [255, 170, 0],
    [255, 255, 255],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_follow_their_first_word() {
        // "tiny" shares 120 with "very_short".
        assert_eq!(COOLING.value(FLAME_HEIGHT.get("tiny")), 200);
        assert_eq!(SPARKING.value(SPARK_FREQUENCY.get("many")), 180);
        assert_eq!(BRIGHTNESS_LEVEL.value(BRIGHTNESS.get("low")), 51);
    }

    #[test]
    fn unset_fields_use_v2_defaults() {
        assert_eq!(SPEED_INDEX.value(None), 4);
        assert_eq!(BRIGHTNESS_LEVEL.value(None), 204);
        assert_eq!(COOLING.value(None), 100);
        assert_eq!(DENSITY_LEVEL.value(None), 26);
        assert_eq!(WAVE_COUNT_LEVEL.value(None), 2);
    }

    #[test]
    fn unmatched_values_pass_through() {
        assert_eq!(DENSITY_LEVEL.value(Some(90)), 90);
        assert_eq!(TAIL_LENGTH_LEVEL.value(TAIL_LENGTH.get("ghost")), 16);
        assert_eq!(SPEED_INDEX.translate(99), None);
    }
}
