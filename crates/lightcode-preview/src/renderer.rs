use serde::Serialize;

/// Preview renderer families.
///
/// Several firmware effects share one renderer (scan and scanner, twinkle
/// and sparkle, gradient and palette). The mapping is closed: an effect ID
/// without a renderer is `None`, never a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    Solid,
    Breathe,
    Wipe,
    Rainbow,
    Scanner,
    Sparkle,
    Chase,
    Gradient,
    Fire,
    Waves,
    Meteor,
    Ripple,
    Candle,
    Fireworks,
}

impl RendererKind {
    pub fn for_effect(effect_id: u8) -> Option<Self> {
        Some(match effect_id {
            0 => Self::Solid,
            2 => Self::Breathe,
            3 => Self::Wipe,
            9 => Self::Rainbow,
            10 | 39 => Self::Scanner,
            17 | 20 => Self::Sparkle,
            27 => Self::Chase,
            46 | 48 => Self::Gradient,
            49 => Self::Fire,
            50 => Self::Waves,
            59 => Self::Meteor,
            62 => Self::Ripple,
            71 => Self::Candle,
            72 => Self::Fireworks,
            _ => return None,
        })
    }

    /// Whether the renderer animates over time.
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::Solid | Self::Gradient)
    }
}
