use super::layout;
use super::levels::{
    BRIGHTNESS_LEVEL, COOLING, DEFAULT_PALETTE, DENSITY_LEVEL, HEAD_SIZE, LegacyLevels,
    MAX_SPEED_INDEX, RHYTHM_BEATS, SPARKING, SPEED_INDEX, TAIL_LENGTH_LEVEL, WAVE_COUNT_LEVEL,
};
use super::opcode::{Opcode, Param};
use crate::PatternSpec;
use crate::error::CodecError;
use crate::formats::common::{clamp_u8, xor_checksum};
use crate::tables::colors::resolve_palette;
use crate::tables::{Effect, Rgb, normalize_word};

struct Program {
    code: Vec<u8>,
}

impl Program {
    fn op(&mut self, opcode: Opcode, operands: &[u8]) {
        debug_assert_eq!(operands.len(), opcode.operand_len());
        self.code.push(opcode.byte());
        self.code.extend_from_slice(operands);
    }

    fn param(&mut self, param: Param, value: i32) {
        self.op(Opcode::PushU8, &[clamp_u8(value)]);
        self.op(Opcode::SetParam, &[param.byte()]);
    }

    fn level(&mut self, param: Param, levels: &LegacyLevels, field: Option<i32>) {
        self.param(param, levels.value(field));
    }

    fn color(&mut self, color: Rgb) {
        self.op(Opcode::PushColor, &color.to_bytes());
    }

    fn palette(&mut self, colors: &[Rgb]) {
        let colors = &colors[..colors.len().min(layout::MAX_PALETTE)];
        for color in colors {
            self.color(*color);
        }
        self.op(Opcode::Palette, &[colors.len() as u8]);
    }
}

/// Compiles a pattern into the legacy opcode stream.
///
/// Parameters are written on the version 2 scales (speed as a 0-7 index,
/// rhythm in beats, the firmware's own cooling and density steps). Chase
/// writes head and tail sizes without a palette; sparkle writes no color.
/// Scanner and wipe have no legacy program and fail with
/// `CodecError::EffectNotEncodable`.
pub fn encode(spec: &PatternSpec) -> Result<Vec<u8>, CodecError> {
    let effect = Effect::parse_name(&spec.effect)
        .ok_or_else(|| CodecError::UnknownEffect(spec.effect.clone()))?;
    let colors = resolve_palette(&spec.colors);
    let primary = colors.first().copied().unwrap_or(Rgb::WHITE);
    let palette = if colors.is_empty() {
        DEFAULT_PALETTE.iter().copied().map(Rgb::from_bytes).collect()
    } else {
        colors
    };

    let mut program = Program { code: Vec::new() };
    program.op(Opcode::SetPattern, &[effect.id()]);

    let mut speed = speed_index(spec.speed);
    match effect {
        Effect::Fire => {
            program.level(Param::Cooling, &COOLING, spec.cooling);
            program.level(Param::Sparking, &SPARKING, spec.sparking);
            program.palette(&palette);
        }
        Effect::Wave if normalize_word(&spec.effect) == "chase" => {
            program.level(Param::HeadSize, &HEAD_SIZE, spec.eye_size);
            program.level(Param::TailLength, &TAIL_LENGTH_LEVEL, spec.tail_length);
        }
        Effect::Wave => {
            program.level(Param::WaveCount, &WAVE_COUNT_LEVEL, spec.wave_count);
            program.palette(&palette);
        }
        Effect::Candle | Effect::Gradient => program.palette(&palette),
        Effect::Sparkle => program.level(Param::Density, &DENSITY_LEVEL, spec.density),
        // The speed field carries the rhythm.
        Effect::Pulse => {
            program.param(Param::Rhythm, rhythm_beats(spec.speed));
            program.color(primary);
            speed = SPEED_INDEX.default;
        }
        Effect::Solid => program.color(primary),
        Effect::Rainbow => {}
        Effect::Scanner | Effect::Wipe => {
            return Err(CodecError::EffectNotEncodable {
                effect: effect.as_str().to_string(),
                format: "legacy",
            });
        }
    }

    let brightness = spec.brightness.filter(|brightness| *brightness != 0);
    program.level(Param::Brightness, &BRIGHTNESS_LEVEL, brightness);
    program.param(Param::Speed, speed);
    program.op(Opcode::Halt, &[]);

    let out = with_header(&program.code)?;
    log::debug!(
        "encoded legacy program: effect={} code_len={}",
        effect.as_str(),
        program.code.len()
    );
    Ok(out)
}

/// Speed level as a 0-7 index; values off the level table are scaled.
fn speed_index(speed: Option<i32>) -> i32 {
    let Some(value) = speed else {
        return SPEED_INDEX.default;
    };
    SPEED_INDEX
        .translate(value)
        .unwrap_or_else(|| scale_to_index(value))
}

/// Rhythm in beats, 1 (frantic) to 8 (calm).
fn rhythm_beats(speed: Option<i32>) -> i32 {
    let Some(value) = speed else {
        return RHYTHM_BEATS.default;
    };
    RHYTHM_BEATS
        .translate(value)
        .unwrap_or_else(|| MAX_SPEED_INDEX + 1 - scale_to_index(value))
}

fn scale_to_index(value: i32) -> i32 {
    let value = value.clamp(0, 255);
    (value * MAX_SPEED_INDEX + 127) / 255
}

fn with_header(code: &[u8]) -> Result<Vec<u8>, CodecError> {
    let code_len = u16::try_from(code.len())
        .map_err(|_| CodecError::Range("legacy program exceeds 65535 bytes".to_string()))?;
    let mut out = Vec::with_capacity(layout::HEADER_LEN + code.len());
    out.extend_from_slice(layout::MAGIC);
    out.push(layout::VERSION);
    out.extend_from_slice(&code_len.to_le_bytes());
    out.push(xor_checksum(code));
    out.push(0);
    out.extend_from_slice(code);
    Ok(out)
}
