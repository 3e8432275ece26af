// Line codes and the per-bit voltage resolver
//
// Bit slot layout (time fraction of the bit duration):
//   NRZ        1 -> -5V full slot            0 -> +5V full slot
//   RZ         1 -> -5V then 0V              0 -> +5V then 0V
//   Manchester 1 -> +5V then -5V             0 -> -5V then +5V
//   AMI        1 -> alternating +5V / -5V    0 -> 0V full slot
//   CMI        1 -> alternating 0V / +5V     0 -> 0V then +5V

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bits::Bit;
use super::state::EncodingState;
use super::voltage::{HorizontalRun, PulseSegment, TransitionMarker, Voltage};
use crate::config::CmiConvention;
use crate::error::LineCodeError;
use crate::utils::consts::{BIT_END, BIT_START, MID_BIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingKind {
    #[serde(rename = "NRZ")]
    Nrz,
    #[serde(rename = "RZ")]
    Rz,
    Manchester,
    #[serde(rename = "AMI")]
    Ami,
    #[serde(rename = "CMI")]
    Cmi,
}

impl EncodingKind {
    pub const ALL: [EncodingKind; 5] = [
        EncodingKind::Nrz,
        EncodingKind::Rz,
        EncodingKind::Manchester,
        EncodingKind::Ami,
        EncodingKind::Cmi,
    ];

    /// Short identifier, also accepted by `from_str`
    pub fn code(self) -> &'static str {
        match self {
            EncodingKind::Nrz => "NRZ",
            EncodingKind::Rz => "RZ",
            EncodingKind::Manchester => "Manchester",
            EncodingKind::Ami => "AMI",
            EncodingKind::Cmi => "CMI",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EncodingKind::Nrz => "Non-Return to Zero (NRZ) Encoding",
            EncodingKind::Rz => "Return to Zero (RZ) Encoding",
            EncodingKind::Manchester => "Manchester Encoding",
            EncodingKind::Ami => "Binary AMI Encoding",
            EncodingKind::Cmi => "Coded Mark Inversion (CMI) Encoding",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EncodingKind::Nrz => "Non-Return to Zero",
            EncodingKind::Rz => "Return to Zero",
            EncodingKind::Manchester => "Manchester",
            EncodingKind::Ami => "Binary AMI",
            EncodingKind::Cmi => "CMI",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EncodingKind::Nrz => {
                "NRZ encoding: '1' is held at -5V and '0' at +5V for the whole bit. No return to zero between consecutive bits."
            }
            EncodingKind::Rz => {
                "RZ encoding: '1' pulses -5V and '0' pulses +5V in the first half of the bit. Always returns to zero in the second half."
            }
            EncodingKind::Manchester => {
                "Manchester encoding: Transition from high to low represents '1', transition from low to high represents '0'. Each bit has a transition in the middle."
            }
            EncodingKind::Ami => {
                "Binary AMI encoding: '0' is represented by zero voltage. '1' is represented by alternating positive (+5V) and negative (-5V) pulses."
            }
            EncodingKind::Cmi => {
                "CMI encoding: '0' is 0V in the first half and +5V in the second half. '1' alternates between all 0V and all +5V, starting at 0V."
            }
        }
    }

    /// AMI and CMI carry state from one mark to the next
    pub fn is_stateful(self) -> bool {
        matches!(self, EncodingKind::Ami | EncodingKind::Cmi)
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EncodingKind {
    type Err = LineCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodingKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LineCodeError::UnknownEncoding(s.to_string()))
    }
}

/// Voltage shape of a single bit slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitRender {
    pub bit: Bit,
    pub start_voltage: Voltage,
    pub end_voltage: Voltage,
    pub segments: Vec<PulseSegment>,
}

impl BitRender {
    fn full_slot(bit: Bit, voltage: Voltage) -> Self {
        Self {
            bit,
            start_voltage: voltage,
            end_voltage: voltage,
            segments: vec![PulseSegment::Run(HorizontalRun::new(
                BIT_START, BIT_END, voltage,
            ))],
        }
    }

    fn split(bit: Bit, first: Voltage, second: Voltage) -> Self {
        Self {
            bit,
            start_voltage: first,
            end_voltage: second,
            segments: vec![
                PulseSegment::Run(HorizontalRun::new(BIT_START, MID_BIT, first)),
                PulseSegment::Run(HorizontalRun::new(MID_BIT, BIT_END, second)),
                PulseSegment::Transition(TransitionMarker::new(
                    MID_BIT, first, second,
                )),
            ],
        }
    }

    pub fn runs(&self) -> impl Iterator<Item = &HorizontalRun> {
        self.segments
            .iter()
            .filter_map(PulseSegment::as_run)
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionMarker> {
        self.segments
            .iter()
            .filter_map(PulseSegment::as_transition)
    }

    /// Level at a time fraction; the trailing edge reads as the last run
    pub fn voltage_at(&self, position: f32) -> Voltage {
        self.runs()
            .find(|run| run.contains(position))
            .map(|run| run.voltage)
            .unwrap_or(self.end_voltage)
    }
}

/// Render one bit with the default CMI convention
pub fn render_bit(bit: Bit, encoding: EncodingKind, state: EncodingState) -> BitRender {
    render_bit_with(bit, encoding, state, &CmiConvention::default())
}

/// Render one bit. Pure: all memory comes from `state`.
pub fn render_bit_with(
    bit: Bit,
    encoding: EncodingKind,
    state: EncodingState,
    cmi: &CmiConvention,
) -> BitRender {
    match (encoding, bit) {
        (EncodingKind::Nrz, Bit::One) => BitRender::full_slot(bit, Voltage::Low),
        (EncodingKind::Nrz, Bit::Zero) => BitRender::full_slot(bit, Voltage::High),
        (EncodingKind::Rz, Bit::One) => BitRender::split(bit, Voltage::Low, Voltage::Zero),
        (EncodingKind::Rz, Bit::Zero) => BitRender::split(bit, Voltage::High, Voltage::Zero),
        (EncodingKind::Manchester, Bit::One) => {
            BitRender::split(bit, Voltage::High, Voltage::Low)
        }
        (EncodingKind::Manchester, Bit::Zero) => {
            BitRender::split(bit, Voltage::Low, Voltage::High)
        }
        (EncodingKind::Ami, Bit::One) => {
            BitRender::full_slot(bit, state.ami_polarity.voltage())
        }
        (EncodingKind::Ami, Bit::Zero) => BitRender::full_slot(bit, Voltage::Zero),
        (EncodingKind::Cmi, Bit::One) => {
            BitRender::full_slot(bit, state.cmi_level.voltage())
        }
        (EncodingKind::Cmi, Bit::Zero) => {
            let (first, second) = cmi.zero_pattern.halves();
            BitRender::split(bit, first, second)
        }
    }
}

/// Whether the bit carries a mid-bit edge (RZ, Manchester, CMI zeros)
pub fn has_mid_transition(encoding: EncodingKind, bit: Bit) -> bool {
    match encoding {
        EncodingKind::Rz | EncodingKind::Manchester => true,
        EncodingKind::Cmi => bit == Bit::Zero,
        EncodingKind::Nrz | EncodingKind::Ami => false,
    }
}
