/// Log level (overridable through RUST_LOG)
pub const LOG_LEVEL: &str = "info";

/// Text encoded when the caller gives none
pub const DEFAULT_INPUT_TEXT: &str = "Hello";

// ============================================================================
// Line Coding Parameters
// ============================================================================

/// Binary digits per character (one byte, MSB first)
pub const BITS_PER_CHAR: usize = 8;

/// Physical amplitude of the High/Low levels (volts)
pub const SIGNAL_VOLTS: f32 = 5.0;

/// Time fraction of a bit slot's leading edge
pub const BIT_START: f32 = 0.0;

/// Time fraction of mid-bit transitions
pub const MID_BIT: f32 = 0.5;

/// Time fraction of a bit slot's trailing edge (where connectors sit)
pub const BIT_END: f32 = 1.0;

// ============================================================================
// Terminal Output
// ============================================================================

/// Delay between bits in step-through mode (milliseconds)
pub const STEP_INTERVAL_MS: u64 = 400;

/// Columns drawn per half bit in the text waveform
pub const WAVEFORM_HALF_WIDTH: usize = 2;
