// Running line-code state threaded through the bit stream
// Only AMI and CMI carry memory; the other codes never touch it

use serde::{Deserialize, Serialize};

use super::bits::{BinaryUnit, Bit};
use super::line_coding::EncodingKind;
use super::voltage::Voltage;

/// Polarity of the next AMI mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    pub fn voltage(self) -> Voltage {
        match self {
            Polarity::Positive => Voltage::High,
            Polarity::Negative => Voltage::Low,
        }
    }
}

/// Level of the next CMI mark: `L0` is drawn at 0V, `L1` at +5V
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmiLevel {
    #[serde(rename = "0")]
    L0,
    #[serde(rename = "1")]
    L1,
}

impl CmiLevel {
    pub fn flipped(self) -> Self {
        match self {
            CmiLevel::L0 => CmiLevel::L1,
            CmiLevel::L1 => CmiLevel::L0,
        }
    }

    pub fn voltage(self) -> Voltage {
        match self {
            CmiLevel::L0 => Voltage::Zero,
            CmiLevel::L1 => Voltage::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodingState {
    pub ami_polarity: Polarity,
    pub cmi_level: CmiLevel,
}

impl EncodingState {
    pub const INITIAL: EncodingState = EncodingState {
        ami_polarity: Polarity::Positive,
        cmi_level: CmiLevel::L0,
    };

    pub fn new(ami_polarity: Polarity, cmi_level: CmiLevel) -> Self {
        Self {
            ami_polarity,
            cmi_level,
        }
    }

    /// State after `bit` has been emitted under `encoding`.
    ///
    /// A `1` flips the AMI polarity (AMI) or the CMI level (CMI). A `0`
    /// never changes anything, and NRZ, RZ and Manchester are memoryless.
    pub fn advance(self, bit: Bit, encoding: EncodingKind) -> Self {
        if !bit.is_one() {
            return self;
        }
        match encoding {
            EncodingKind::Ami => Self {
                ami_polarity: self.ami_polarity.flipped(),
                ..self
            },
            EncodingKind::Cmi => Self {
                cmi_level: self.cmi_level.flipped(),
                ..self
            },
            EncodingKind::Nrz | EncodingKind::Rz | EncodingKind::Manchester => self,
        }
    }

    /// Fold `advance` over a run of bits
    pub fn advance_all(self, bits: &[Bit], encoding: EncodingKind) -> Self {
        bits.iter()
            .fold(self, |state, &bit| state.advance(bit, encoding))
    }
}

impl Default for EncodingState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// State entering each character, starting from [`EncodingState::INITIAL`]
pub fn compute_character_states(
    units: &[BinaryUnit],
    encoding: EncodingKind,
) -> Vec<EncodingState> {
    compute_character_states_from(units, encoding, EncodingState::INITIAL)
}

/// State entering each character, starting from `initial`.
///
/// `states[i + 1]` is always `states[i]` advanced over every bit of
/// character `i`; the state is never reset between characters.
pub fn compute_character_states_from(
    units: &[BinaryUnit],
    encoding: EncodingKind,
    initial: EncodingState,
) -> Vec<EncodingState> {
    let mut state = initial;
    let mut states = Vec::with_capacity(units.len());

    for unit in units {
        states.push(state);
        state = state.advance_all(&unit.bits, encoding);
    }

    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phy::bits::text_to_binary;

    #[test]
    fn test_zero_never_mutates() {
        for encoding in EncodingKind::ALL {
            let state = EncodingState::INITIAL;
            assert_eq!(state.advance(Bit::Zero, encoding), state);
        }
    }

    #[test]
    fn test_memoryless_codes() {
        let units = text_to_binary("Hello");
        for encoding in [EncodingKind::Nrz, EncodingKind::Rz, EncodingKind::Manchester] {
            let states = compute_character_states(&units, encoding);
            assert!(states.iter().all(|s| *s == EncodingState::INITIAL));
        }
    }

    #[test]
    fn test_ami_threads_across_characters() {
        // 'A' = 01000001 has two marks, 'C' = 01000011 has three
        let units = text_to_binary("ACA");
        let states = compute_character_states(&units, EncodingKind::Ami);
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].ami_polarity, Polarity::Positive);
        assert_eq!(states[1].ami_polarity, Polarity::Positive);
        assert_eq!(states[2].ami_polarity, Polarity::Negative);
        // CMI level is left alone under AMI
        assert!(states.iter().all(|s| s.cmi_level == CmiLevel::L0));
    }

    #[test]
    fn test_cmi_threads_across_characters() {
        let units = text_to_binary("CA");
        let states = compute_character_states(&units, EncodingKind::Cmi);
        assert_eq!(states[0].cmi_level, CmiLevel::L0);
        assert_eq!(states[1].cmi_level, CmiLevel::L1);
        assert!(states.iter().all(|s| s.ami_polarity == Polarity::Positive));
    }

    #[test]
    fn test_custom_initial_state() {
        let units = text_to_binary("A");
        let initial = EncodingState::new(Polarity::Positive, CmiLevel::L1);
        let states = compute_character_states_from(&units, EncodingKind::Cmi, initial);
        assert_eq!(states, vec![initial]);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_character_states(&[], EncodingKind::Ami).is_empty());
    }
}
