//! Semantic level tables for the intent notation.
//!
//! Each table maps a normalized word (see `normalize_word`) to the numeric
//! value written into a pattern field, and carries the value used when the
//! key is present but the word is not recognized.

/// One semantic-level table.
#[derive(Debug, Clone, Copy)]
pub struct LevelTable {
    /// Intent key the table belongs to, used in diagnostics.
    pub key: &'static str,
    pub entries: &'static [(&'static str, i32)],
    pub default: i32,
    /// Whether a bare integer is accepted in place of a word.
    pub numeric: bool,
}

impl LevelTable {
    /// Looks up a normalized word.
    pub fn get(&self, word: &str) -> Option<i32> {
        if let Some((_, value)) = self.entries.iter().find(|(name, _)| *name == word) {
            return Some(*value);
        }
        if self.numeric {
            return word.parse::<i32>().ok();
        }
        None
    }

    /// Word names, for the "expected one of" part of a warning.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

/// `flame_height` maps inversely onto fire cooling.
pub const FLAME_HEIGHT: LevelTable = LevelTable {
    key: "flame_height",
    entries: &[
        ("very_short", 120),
        ("tiny", 120),
        ("short", 80),
        ("small", 80),
        ("medium", 55),
        ("tall", 40),
        ("large", 40),
        ("high", 40),
        ("very_tall", 20),
        ("huge", 20),
    ],
    default: 55,
    numeric: false,
};

pub const SPARK_FREQUENCY: LevelTable = LevelTable {
    key: "spark_frequency",
    entries: &[
        ("rare", 50),
        ("few", 50),
        ("occasional", 80),
        ("some", 80),
        ("frequent", 120),
        ("high", 170),
        ("many", 170),
        ("intense", 220),
        ("lots", 220),
    ],
    default: 120,
    numeric: false,
};

pub const DENSITY: LevelTable = LevelTable {
    key: "density",
    entries: &[
        ("sparse", 30),
        ("light", 60),
        ("medium", 128),
        ("dense", 200),
        ("packed", 255),
    ],
    default: 128,
    numeric: false,
};

pub const WAVE_COUNT: LevelTable = LevelTable {
    key: "wave_count",
    entries: &[
        ("one", 1),
        ("few", 2),
        ("several", 4),
        ("many", 8),
    ],
    default: 3,
    numeric: false,
};

/// `rhythm` feeds the speed field of pulse/breathe.
pub const RHYTHM: LevelTable = LevelTable {
    key: "rhythm",
    entries: &[
        ("calm", 70),
        ("relaxed", 100),
        ("steady", 128),
        ("energetic", 180),
        ("frantic", 220),
    ],
    default: 128,
    numeric: false,
};

pub const SPEED: LevelTable = LevelTable {
    key: "speed",
    entries: &[
        ("frozen", 0),
        ("glacial", 20),
        ("very_slow", 40),
        ("slow", 70),
        ("medium", 128),
        ("fast", 180),
        ("very_fast", 220),
        ("frantic", 255),
    ],
    default: 128,
    numeric: true,
};

pub const BRIGHTNESS: LevelTable = LevelTable {
    key: "brightness",
    entries: &[
        ("dim", 64),
        ("low", 64),
        ("medium", 128),
        ("bright", 200),
        ("high", 200),
        ("full", 255),
        ("max", 255),
    ],
    default: 200,
    numeric: true,
};

pub const EYE_SIZE: LevelTable = LevelTable {
    key: "eye_size",
    entries: &[
        ("tiny", 1),
        ("small", 2),
        ("medium", 3),
        ("large", 5),
        ("huge", 8),
    ],
    default: 3,
    numeric: true,
};

pub const TAIL_LENGTH: LevelTable = LevelTable {
    key: "tail_length",
    entries: &[
        ("none", 0),
        ("short", 2),
        ("medium", 4),
        ("long", 8),
        ("ghost", 16),
    ],
    default: 4,
    numeric: true,
};

pub const DIRECTION: LevelTable = LevelTable {
    key: "direction",
    entries: &[
        ("forward", 0),
        ("up", 0),
        ("right", 0),
        ("clockwise", 0),
        ("outward", 0),
        ("backward", 1),
        ("reverse", 1),
        ("down", 1),
        ("left", 1),
        ("counterclockwise", 1),
        ("inward", 1),
    ],
    default: 0,
    numeric: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flame_height_is_inverse_of_cooling() {
        let tall = FLAME_HEIGHT.get("tall").unwrap();
        let short = FLAME_HEIGHT.get("short").unwrap();
        assert!(tall < short);
        assert_eq!(FLAME_HEIGHT.get("very_tall"), Some(20));
    }

    #[test]
    fn numeric_tables_accept_integers() {
        assert_eq!(SPEED.get("42"), Some(42));
        assert_eq!(BRIGHTNESS.get("300"), Some(300));
        assert_eq!(DENSITY.get("42"), None);
        assert_eq!(WAVE_COUNT.get("0"), None);
        assert_eq!(WAVE_COUNT.get("several"), Some(4));
    }

    #[test]
    fn unknown_words_miss() {
        assert_eq!(RHYTHM.get("syncopated"), None);
        assert_eq!(DIRECTION.get("sideways"), None);
    }

    #[test]
    fn names_keep_table_order() {
        let names = TAIL_LENGTH.names();
        assert_eq!(names.first(), Some(&"none"));
        assert_eq!(names.len(), TAIL_LENGTH.entries.len());
    }
}
