use serde::Serialize;

/// Stack-machine instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Opcode {
    Nop = 0x00,
    PushU8 = 0x01,
    PushU16 = 0x02,
    PushColor = 0x05,
    Pop = 0x06,
    Dup = 0x07,
    Swap = 0x08,
    Add = 0x10,
    Sub = 0x11,
    Mul = 0x12,
    Div = 0x13,
    Mod = 0x14,
    Sin = 0x30,
    Cos = 0x31,
    Clamp = 0x37,
    Lerp = 0x38,
    Rgb = 0x40,
    Hsv = 0x41,
    Blend = 0x42,
    Brightness = 0x43,
    Palette = 0x44,
    SetPattern = 0x50,
    SetParam = 0x51,
    BeginFrame = 0x53,
    EndFrame = 0x54,
    SetLed = 0x55,
    Fill = 0x56,
    ForEachLed = 0x65,
    NextLed = 0x66,
    Halt = 0x67,
    LoadVar = 0x70,
    StoreVar = 0x71,
    GetTime = 0x72,
    GetFrame = 0x73,
    GetLedCount = 0x74,
    GetLedIndex = 0x75,
}

impl Opcode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => Self::Nop,
            0x01 => Self::PushU8,
            0x02 => Self::PushU16,
            0x05 => Self::PushColor,
            0x06 => Self::Pop,
            0x07 => Self::Dup,
            0x08 => Self::Swap,
            0x10 => Self::Add,
            0x11 => Self::Sub,
            0x12 => Self::Mul,
            0x13 => Self::Div,
            0x14 => Self::Mod,
            0x30 => Self::Sin,
            0x31 => Self::Cos,
            0x37 => Self::Clamp,
            0x38 => Self::Lerp,
            0x40 => Self::Rgb,
            0x41 => Self::Hsv,
            0x42 => Self::Blend,
            0x43 => Self::Brightness,
            0x44 => Self::Palette,
            0x50 => Self::SetPattern,
            0x51 => Self::SetParam,
            0x53 => Self::BeginFrame,
            0x54 => Self::EndFrame,
            0x55 => Self::SetLed,
            0x56 => Self::Fill,
            0x65 => Self::ForEachLed,
            0x66 => Self::NextLed,
            0x67 => Self::Halt,
            0x70 => Self::LoadVar,
            0x71 => Self::StoreVar,
            0x72 => Self::GetTime,
            0x73 => Self::GetFrame,
            0x74 => Self::GetLedCount,
            0x75 => Self::GetLedIndex,
            _ => return None,
        })
    }

    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Number of inline operand bytes following the opcode.
    pub const fn operand_len(self) -> usize {
        match self {
            Self::PushU16 => 2,
            Self::PushColor => 3,
            Self::PushU8
            | Self::Palette
            | Self::SetPattern
            | Self::SetParam
            | Self::LoadVar
            | Self::StoreVar => 1,
            _ => 0,
        }
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::PushU8 => "PUSH_U8",
            Self::PushU16 => "PUSH_U16",
            Self::PushColor => "PUSH_COLOR",
            Self::Pop => "POP",
            Self::Dup => "DUP",
            Self::Swap => "SWAP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Sin => "SIN",
            Self::Cos => "COS",
            Self::Clamp => "CLAMP",
            Self::Lerp => "LERP",
            Self::Rgb => "RGB",
            Self::Hsv => "HSV",
            Self::Blend => "BLEND",
            Self::Brightness => "BRIGHTNESS",
            Self::Palette => "PALETTE",
            Self::SetPattern => "SET_PATTERN",
            Self::SetParam => "SET_PARAM",
            Self::BeginFrame => "BEGIN_FRAME",
            Self::EndFrame => "END_FRAME",
            Self::SetLed => "SET_LED",
            Self::Fill => "FILL",
            Self::ForEachLed => "FOR_EACH_LED",
            Self::NextLed => "NEXT_LED",
            Self::Halt => "HALT",
            Self::LoadVar => "LOAD_VAR",
            Self::StoreVar => "STORE_VAR",
            Self::GetTime => "GET_TIME",
            Self::GetFrame => "GET_FRAME",
            Self::GetLedCount => "GET_LED_COUNT",
            Self::GetLedIndex => "GET_LED_INDEX",
        }
    }
}

/// Parameter slots addressed by `SET_PARAM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Param {
    Cooling = 0x01,
    Sparking = 0x02,
    Speed = 0x03,
    Brightness = 0x04,
    Direction = 0x05,
    WaveCount = 0x06,
    HeadSize = 0x07,
    TailLength = 0x08,
    Density = 0x09,
    Rhythm = 0x0A,
}

impl Param {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0x01 => Self::Cooling,
            0x02 => Self::Sparking,
            0x03 => Self::Speed,
            0x04 => Self::Brightness,
            0x05 => Self::Direction,
            0x06 => Self::WaveCount,
            0x07 => Self::HeadSize,
            0x08 => Self::TailLength,
            0x09 => Self::Density,
            0x0A => Self::Rhythm,
            _ => return None,
        })
    }

    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cooling => "cooling",
            Self::Sparking => "sparking",
            Self::Speed => "speed",
            Self::Brightness => "brightness",
            Self::Direction => "direction",
            Self::WaveCount => "wave_count",
            Self::HeadSize => "head_size",
            Self::TailLength => "tail_length",
            Self::Density => "density",
            Self::Rhythm => "rhythm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Opcode, Param};

    #[test]
    fn opcode_bytes_round_trip() {
        for byte in 0..=u8::MAX {
            if let Some(opcode) = Opcode::from_raw(byte) {
                assert_eq!(opcode.byte(), byte);
            }
        }
    }

    #[test]
    fn unassigned_opcodes_are_none() {
        assert_eq!(Opcode::from_raw(0x03), None);
        assert_eq!(Opcode::from_raw(0xFF), None);
    }

    #[test]
    fn params_round_trip() {
        for byte in 1..=0x0A {
            let param = Param::from_raw(byte).unwrap();
            assert_eq!(param.byte(), byte);
        }
        assert_eq!(Param::from_raw(0x0B), None);
    }
}
