//! Semantic mapping of parsed entries onto a `PatternSpec`.
//!
//! Entries are applied in document order, so a later key overrides an
//! earlier one (`rhythm` and `speed` both write speed).

use super::parser::{Entry, Section, split_list};
use super::{Diagnostic, DiagnosticKind};
use crate::PatternSpec;
use crate::formats::compact::encoder::{DEFAULT_BRIGHTNESS, DEFAULT_SPEED};
use crate::tables::colors::{ColorValue, color_scheme, resolve_color};
use crate::tables::levels::{self, LevelTable};
use crate::tables::{Effect, normalize_word};

/// Numeric field a level table writes to.
#[derive(Debug, Clone, Copy)]
enum Field {
    Cooling,
    Sparking,
    Density,
    WaveCount,
    Speed,
    Brightness,
    EyeSize,
    TailLength,
    Direction,
}

/// Which effects a behavior key applies to.
#[derive(Debug, Clone, Copy)]
enum Scope {
    Fire,
    Sparkle,
    Waves,
    Pulse,
    Trail,
}

impl Scope {
    fn allows(self, effect: &EffectName) -> bool {
        let Some(kind) = effect.kind else {
            return true;
        };
        match self {
            Scope::Fire => kind.is_fire(),
            Scope::Sparkle => kind == Effect::Sparkle,
            Scope::Waves => kind == Effect::Wave,
            Scope::Pulse => kind == Effect::Pulse,
            Scope::Trail => matches!(kind, Effect::Scanner | Effect::Wave),
        }
    }
}

/// Effect as written plus its resolved kind (None when unknown).
struct EffectName {
    name: String,
    kind: Option<Effect>,
}

pub(crate) struct Mapper {
    spec: PatternSpec,
    effect: EffectName,
    diagnostics: Vec<Diagnostic>,
}

impl Mapper {
    pub fn new(effect: &str) -> Self {
        let name = normalize_word(effect);
        let kind = Effect::parse_name(&name);
        let spec = PatternSpec {
            effect: name.clone(),
            brightness: Some(DEFAULT_BRIGHTNESS),
            speed: Some(DEFAULT_SPEED),
            direction: Some(0),
            ..PatternSpec::default()
        };
        Self {
            spec,
            effect: EffectName { name, kind },
            diagnostics: Vec::new(),
        }
    }

    pub fn apply(&mut self, entry: &Entry) {
        match (entry.section, entry.key.as_str()) {
            (Section::Root, "name") => self.spec.name = Some(entry.value.clone()),
            (Section::Root, _) => {}
            (Section::Behavior, "flame_height") => {
                self.level(entry, Scope::Fire, &levels::FLAME_HEIGHT, Field::Cooling)
            }
            (Section::Behavior, "spark_frequency") => {
                self.level(entry, Scope::Fire, &levels::SPARK_FREQUENCY, Field::Sparking)
            }
            (Section::Behavior, "density") => {
                self.level(entry, Scope::Sparkle, &levels::DENSITY, Field::Density)
            }
            (Section::Behavior, "wave_count") => {
                self.level(entry, Scope::Waves, &levels::WAVE_COUNT, Field::WaveCount)
            }
            (Section::Behavior, "rhythm") => {
                self.level(entry, Scope::Pulse, &levels::RHYTHM, Field::Speed)
            }
            (Section::Behavior, "eye_size" | "head_size") => {
                self.level(entry, Scope::Trail, &levels::EYE_SIZE, Field::EyeSize)
            }
            (Section::Behavior, "tail_length") => {
                self.level(entry, Scope::Trail, &levels::TAIL_LENGTH, Field::TailLength)
            }
            (Section::Appearance, "color" | "colors") => self.colors(entry),
            (Section::Appearance, "color_scheme") => self.scheme(entry),
            (Section::Appearance, "background" | "background_color") => self.background(entry),
            (Section::Appearance, "brightness") => {
                self.common_level(entry, &levels::BRIGHTNESS, Field::Brightness)
            }
            (Section::Timing, "speed") => self.common_level(entry, &levels::SPEED, Field::Speed),
            (Section::Spatial, "direction") => {
                self.common_level(entry, &levels::DIRECTION, Field::Direction)
            }
            _ => log::trace!("line {}: unrecognized key '{}'", entry.line, entry.key),
        }
    }

    pub fn finish(mut self) -> (PatternSpec, Vec<Diagnostic>) {
        if self.spec.colors.is_empty() {
            self.spec.colors = default_palette(self.effect.kind);
        }
        (self.spec, self.diagnostics)
    }

    fn level(&mut self, entry: &Entry, scope: Scope, table: &LevelTable, field: Field) {
        if !scope.allows(&self.effect) {
            self.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::InapplicableKey,
                line: entry.line,
                message: format!(
                    "'{}' does not apply to effect '{}', ignored",
                    entry.key, self.effect.name
                ),
            });
            return;
        }
        self.common_level(entry, table, field);
    }

    fn common_level(&mut self, entry: &Entry, table: &LevelTable, field: Field) {
        let word = normalize_word(&entry.value);
        let value = match table.get(&word) {
            Some(value) => value,
            None => {
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnknownValue,
                    line: entry.line,
                    message: format!(
                        "unknown {} '{}', using {} (expected one of: {})",
                        table.key,
                        entry.value,
                        table.default,
                        table.names().join(", ")
                    ),
                });
                table.default
            }
        };
        let slot = match field {
            Field::Cooling => &mut self.spec.cooling,
            Field::Sparking => &mut self.spec.sparking,
            Field::Density => &mut self.spec.density,
            Field::WaveCount => &mut self.spec.wave_count,
            Field::Speed => &mut self.spec.speed,
            Field::Brightness => &mut self.spec.brightness,
            Field::EyeSize => &mut self.spec.eye_size,
            Field::TailLength => &mut self.spec.tail_length,
            Field::Direction => &mut self.spec.direction,
        };
        *slot = Some(value);
    }

    fn colors(&mut self, entry: &Entry) {
        let mut colors = Vec::new();
        for item in split_list(&entry.value) {
            match resolve_color(&item) {
                ColorValue::Resolved(hexes) => colors.extend(hexes),
                // Kept verbatim; the validator reports it.
                ColorValue::Unresolved(raw) => colors.push(raw),
            }
        }
        self.spec.colors = colors;
    }

    fn scheme(&mut self, entry: &Entry) {
        match color_scheme(&entry.value) {
            Some(palette) => {
                self.spec.colors = palette.iter().map(|hex| hex.to_string()).collect();
            }
            None => {
                let fallback = default_palette(self.effect.kind);
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnknownValue,
                    line: entry.line,
                    message: format!(
                        "unknown color_scheme '{}', using the {} default",
                        entry.value, self.effect.name
                    ),
                });
                self.spec.colors = fallback;
            }
        }
    }

    fn background(&mut self, entry: &Entry) {
        match resolve_color(&entry.value) {
            ColorValue::Resolved(hexes) => self.spec.background_color = hexes.into_iter().next(),
            ColorValue::Unresolved(raw) => self.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::UnknownValue,
                line: entry.line,
                message: format!("unknown background color '{raw}', ignored"),
            }),
        }
    }
}

fn default_palette(effect: Option<Effect>) -> Vec<String> {
    let scheme = match effect {
        Some(Effect::Fire | Effect::Candle) => "classic_fire",
        Some(Effect::Rainbow) => "rainbow",
        _ => return vec!["#FFFFFF".to_string()],
    };
    color_scheme(scheme)
        .map(|palette| palette.iter().map(|hex| hex.to_string()).collect())
        .unwrap_or_else(|| vec!["#FFFFFF".to_string()])
}
