use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::phy::state::{CmiLevel, EncodingState, Polarity};
use crate::phy::voltage::Voltage;

/// Shape of a CMI `0` bit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmiZeroPattern {
    /// 0V then +5V
    #[default]
    LowHigh,
    /// +5V then 0V
    HighLow,
}

impl CmiZeroPattern {
    pub fn halves(self) -> (Voltage, Voltage) {
        match self {
            CmiZeroPattern::LowHigh => (Voltage::Zero, Voltage::High),
            CmiZeroPattern::HighLow => (Voltage::High, Voltage::Zero),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmiConvention {
    /// Level of the first CMI mark
    pub initial_level: CmiLevel,
    pub zero_pattern: CmiZeroPattern,
}

impl Default for CmiConvention {
    fn default() -> Self {
        Self {
            initial_level: CmiLevel::L0,
            zero_pattern: CmiZeroPattern::LowHigh,
        }
    }
}

/// Binary width for characters above U+00FF
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WideCharPolicy {
    /// Keep every significant digit (at least 8)
    #[default]
    Extend,
    /// Keep only the low 8 bits
    Truncate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Draw connectors where adjacent bits meet at different levels
    pub connect_bits: bool,
    /// Flag bits whose code has a mid-bit edge
    pub show_mid_bit_markers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            connect_bits: true,
            show_mid_bit_markers: false,
        }
    }
}

/// Configuration for the pulse encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub cmi: CmiConvention,
    pub wide_chars: WideCharPolicy,
    pub render: RenderOptions,
}

impl EncoderConfig {
    /// State every conversion starts from
    pub fn initial_state(&self) -> EncodingState {
        EncodingState::new(Polarity::Positive, self.cmi.initial_level)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        info!("Loaded encoder config from: {}", path.display());
        Ok(config)
    }
}
