//! Device state JSON.
//!
//! Accepts the short keys of the WLED JSON API and the long field names.
//! Unknown keys are ignored. Decoding is structural only; range checks
//! belong to the validator, so numeric fields are read as signed integers
//! and kept as written.

use serde::Deserialize;

use crate::error::CodecError;
use crate::{DeviceState, Segment};

const DEFAULT_BRIGHTNESS: i32 = 200;

#[derive(Debug, Deserialize)]
struct StateDocument {
    #[serde(default)]
    on: bool,
    #[serde(default, alias = "brightness")]
    bri: Option<i32>,
    #[serde(default)]
    transition: i32,
    #[serde(default, alias = "segments")]
    seg: Vec<SegmentDocument>,
}

#[derive(Debug, Deserialize)]
struct SegmentDocument {
    #[serde(default)]
    id: Option<i32>,
    #[serde(default)]
    start: i32,
    #[serde(default)]
    stop: i32,
    #[serde(default, alias = "effectId")]
    fx: i32,
    #[serde(default, alias = "speed")]
    sx: i32,
    #[serde(default, alias = "intensity")]
    ix: i32,
    #[serde(default, alias = "custom1")]
    c1: i32,
    #[serde(default, alias = "custom2")]
    c2: i32,
    #[serde(default, alias = "custom3")]
    c3: i32,
    #[serde(default, alias = "paletteId")]
    pal: i32,
    #[serde(default, alias = "reverse")]
    rev: bool,
    #[serde(default, alias = "mirror")]
    mi: bool,
    #[serde(default)]
    on: Option<bool>,
    #[serde(default, alias = "colors")]
    col: Vec<Vec<i32>>,
}

/// Parses a device state document.
///
/// A missing `bri` reads as 200. A segment without `on` inherits the
/// master `on`; a segment without `id` takes its position in the list.
///
/// # Examples
/// ```
/// use lightcode_core::parse_state_json;
///
/// let state = parse_state_json(r#"{"on":true,"seg":[{"stop":8,"col":[[255,0,0]]}]}"#)?;
/// assert_eq!(state.brightness, 200);
/// assert!(state.segments[0].on);
/// # Ok::<(), lightcode_core::CodecError>(())
/// ```
pub fn parse_state_json(text: &str) -> Result<DeviceState, CodecError> {
    let document: StateDocument = serde_json::from_str(text)
        .map_err(|err| CodecError::syntax(format!("invalid JSON: {err}")))?;

    let master_on = document.on;
    let segments = document
        .seg
        .into_iter()
        .enumerate()
        .map(|(index, seg)| Segment {
            id: seg.id.unwrap_or(index as i32),
            start: seg.start,
            stop: seg.stop,
            effect_id: seg.fx,
            speed: seg.sx,
            intensity: seg.ix,
            custom1: seg.c1,
            custom2: seg.c2,
            custom3: seg.c3,
            palette_id: seg.pal,
            reverse: seg.rev,
            mirror: seg.mi,
            on: seg.on.unwrap_or(master_on),
            colors: seg.col,
        })
        .collect::<Vec<_>>();

    log::debug!("parsed state: segments={}", segments.len());
    Ok(DeviceState {
        on: master_on,
        brightness: document.bri.unwrap_or(DEFAULT_BRIGHTNESS),
        transition: document.transition,
        segments,
    })
}

/// Serializes a state with the short WLED keys.
pub fn state_to_json(state: &DeviceState, pretty: bool) -> Result<String, CodecError> {
    let text = if pretty {
        serde_json::to_string_pretty(state)
    } else {
        serde_json::to_string(state)
    };
    text.map_err(|err| CodecError::syntax(format!("cannot serialize state: {err}")))
}
