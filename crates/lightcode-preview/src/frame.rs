use serde::Serialize;

use crate::renderer::RendererKind;

/// Everything a preview needs to draw one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFrame {
    pub power: bool,
    pub brightness: u8,
    /// Transition time in 100 ms units.
    pub transition: u16,
    pub segments: Vec<PreviewSegment>,
    /// Bytes left over after the last segment.
    pub trailing_bytes: usize,
}

impl PreviewFrame {
    /// True when every segment checksum matched and nothing follows the
    /// last segment.
    pub fn is_intact(&self) -> bool {
        self.trailing_bytes == 0 && self.segments.iter().all(|segment| segment.checksum_ok)
    }

    /// Highest LED index any segment reaches.
    pub fn led_count(&self) -> u16 {
        self.segments
            .iter()
            .map(|segment| segment.stop)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSegment {
    pub id: u8,
    pub start: u16,
    pub stop: u16,
    pub effect_id: u8,
    pub speed: u8,
    pub intensity: u8,
    pub custom: [u8; 3],
    pub palette_id: u8,
    pub reverse: bool,
    pub mirror: bool,
    pub on: bool,
    pub colors: Vec<[u8; 3]>,
    pub checksum_ok: bool,
}

impl PreviewSegment {
    /// Renderer for this segment's effect; `None` for IDs the preview
    /// cannot draw.
    pub fn renderer(&self) -> Option<RendererKind> {
        RendererKind::for_effect(self.effect_id)
    }

    /// Number of LEDs covered.
    pub fn len(&self) -> usize {
        usize::from(self.stop.saturating_sub(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First color, black when none was sent.
    pub fn primary_color(&self) -> [u8; 3] {
        self.colors.first().copied().unwrap_or([0, 0, 0])
    }
}
