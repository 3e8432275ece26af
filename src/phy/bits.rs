// Text to binary conversion: one unit per character, MSB first

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::WideCharPolicy;
use crate::error::LineCodeError;
use crate::utils::consts::BITS_PER_CHAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl TryFrom<u8> for Bit {
    type Error = LineCodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(LineCodeError::InvalidBit(other.to_string())),
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = LineCodeError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(LineCodeError::InvalidBit(other.to_string())),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One character of input together with its binary digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryUnit {
    pub character: char,
    pub code_point: u32,
    pub bits: Vec<Bit>,
}

impl BinaryUnit {
    /// Digits as a `0`/`1` string, e.g. `"01000001"` for `'A'`
    pub fn binary_string(&self) -> String {
        self.bits
            .iter()
            .map(|bit| bit.to_char())
            .collect()
    }
}

/// Convert a character to its binary unit.
///
/// Code points up to 255 always give exactly [`BITS_PER_CHAR`] digits. Wider
/// code points keep every significant digit under [`WideCharPolicy::Extend`]
/// and only the low byte under [`WideCharPolicy::Truncate`].
pub fn char_to_binary(character: char, policy: WideCharPolicy) -> BinaryUnit {
    let code_point = character as u32;
    let width = match policy {
        WideCharPolicy::Extend => significant_bits(code_point).max(BITS_PER_CHAR),
        WideCharPolicy::Truncate => BITS_PER_CHAR,
    };

    let bits = (0..width)
        .rev()
        .map(|shift| {
            if (code_point >> shift) & 1 == 1 {
                Bit::One
            } else {
                Bit::Zero
            }
        })
        .collect();

    BinaryUnit {
        character,
        code_point,
        bits,
    }
}

/// Convert text to binary units using the default wide-character policy
pub fn text_to_binary(text: &str) -> Vec<BinaryUnit> {
    text_to_binary_with(text, WideCharPolicy::default())
}

pub fn text_to_binary_with(text: &str, policy: WideCharPolicy) -> Vec<BinaryUnit> {
    text.chars()
        .map(|character| char_to_binary(character, policy))
        .collect()
}

/// Integer value of an MSB-first bit sequence
pub fn bits_to_code_point(bits: &[Bit]) -> u32 {
    bits.iter()
        .fold(0u32, |acc, &bit| (acc << 1) | bit.to_u8() as u32)
}

fn significant_bits(value: u32) -> usize {
    (u32::BITS - value.leading_zeros()) as usize
}
