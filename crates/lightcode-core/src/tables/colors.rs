use std::fmt;

use super::normalize_word;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_bytes(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Rgb(bytes[0], bytes[1], bytes[2])
    }

    /// Uppercase `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode_upper(self.to_bytes()))
    }

    /// Parses `#RRGGBB`, `#RGB` (hash optional) or `rgb(r, g, b)`.
    ///
    /// # Examples
    /// ```
    /// use lightcode_core::Rgb;
    ///
    /// assert_eq!(Rgb::parse("#FF8800"), Some(Rgb(255, 136, 0)));
    /// assert_eq!(Rgb::parse("f80"), Some(Rgb(255, 136, 0)));
    /// assert_eq!(Rgb::parse("rgb(1, 2, 3)"), Some(Rgb(1, 2, 3)));
    /// assert_eq!(Rgb::parse("not-a-color"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(rgb) = parse_rgb_function(value) {
            return Some(rgb);
        }
        let digits = value.strip_prefix('#').unwrap_or(value);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let mut bytes = [0u8; 3];
        hex::decode_to_slice(&expanded, &mut bytes).ok()?;
        Some(Rgb::from_bytes(bytes))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn parse_rgb_function(value: &str) -> Option<Rgb> {
    let lower = value.to_ascii_lowercase();
    let inner = lower
        .strip_prefix("rgb")?
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(|part| part.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb(r, g, b))
}

const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#FF0000"),
    ("green", "#00FF00"),
    ("blue", "#0000FF"),
    ("yellow", "#FFFF00"),
    ("orange", "#FFA500"),
    ("purple", "#800080"),
    ("cyan", "#00FFFF"),
    ("magenta", "#FF00FF"),
    ("pink", "#FFC0CB"),
    ("white", "#FFFFFF"),
    ("black", "#000000"),
    ("warm_white", "#FFF4E5"),
    ("cool_white", "#F4FFFA"),
    ("gold", "#FFD700"),
    ("teal", "#008080"),
    ("crimson", "#DC143C"),
    ("coral", "#FF7F50"),
    ("navy", "#000080"),
];

const COLOR_SCHEMES: &[(&str, &[&str])] = &[
    (
        "rainbow",
        &[
            "#FF0000", "#FFA500", "#FFFF00", "#00FF00", "#00FFFF", "#0000FF", "#800080",
        ],
    ),
    ("sunset", &["#FFA500", "#FFC0CB", "#800080", "#00008B"]),
    ("ocean", &["#00008B", "#0000FF", "#00FFFF", "#008080"]),
    ("forest", &["#006400", "#008000", "#32CD32", "#FFFF00"]),
    (
        "fire",
        &["#000000", "#FF0000", "#FFA500", "#FFFF00", "#FFFFFF"],
    ),
    (
        "classic_fire",
        &["#000000", "#FF0000", "#FFA500", "#FFFF00", "#FFFFFF"],
    ),
    ("ice", &["#FFFFFF", "#00FFFF", "#0000FF", "#00008B"]),
    ("party", &["#FF00FF", "#00FFFF", "#FFFF00", "#FF00FF"]),
    ("warm_orange", &["#8B4500", "#D2691E", "#FFA500", "#FFD700"]),
    (
        "blue_gas",
        &["#000000", "#00008B", "#0000FF", "#00FFFF", "#FFFFFF"],
    ),
    ("knight_rider", &["#FF0000"]),
    ("scanner_red", &["#FF0000"]),
];

/// Hex value of a named color (`warm white` and `warm-white` also match).
pub fn named_color(name: &str) -> Option<&'static str> {
    let key = normalize_word(name);
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, hex)| *hex)
}

/// Ordered palette of a named color scheme.
pub fn color_scheme(name: &str) -> Option<&'static [&'static str]> {
    let key = normalize_word(name);
    COLOR_SCHEMES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, palette)| *palette)
}

/// Outcome of resolving one authored color value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ColorValue {
    /// Resolved to one or more `#RRGGBB` strings.
    Resolved(Vec<String>),
    /// Nothing matched; the literal is kept so the validator can report it.
    Unresolved(String),
}

/// Resolves a color through named colors, named schemes, then literals.
pub(crate) fn resolve_color(value: &str) -> ColorValue {
    let value = value.trim();
    if let Some(hex) = named_color(value) {
        return ColorValue::Resolved(vec![hex.to_string()]);
    }
    if let Some(palette) = color_scheme(value) {
        return ColorValue::Resolved(palette.iter().map(|hex| hex.to_string()).collect());
    }
    match Rgb::parse(value) {
        Some(rgb) => ColorValue::Resolved(vec![rgb.to_hex()]),
        None => ColorValue::Unresolved(value.to_string()),
    }
}

/// Resolves a color list for encoding; entries that do not resolve become white.
pub(crate) fn resolve_palette(colors: &[String]) -> Vec<Rgb> {
    let mut palette = Vec::with_capacity(colors.len());
    for color in colors {
        match resolve_color(color) {
            ColorValue::Resolved(hexes) => {
                palette.extend(hexes.iter().map(|hex| Rgb::parse(hex).unwrap_or(Rgb::WHITE)));
            }
            ColorValue::Unresolved(_) => palette.push(Rgb::WHITE),
        }
    }
    palette
}
