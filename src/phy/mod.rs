// Line-coding engine
// text -> binary units -> per-character state -> per-bit voltages -> connectors

pub mod bits;
pub mod continuity;
pub mod encoder;
pub mod line_coding;
pub mod state;
pub mod voltage;

pub use bits::{BinaryUnit, Bit, bits_to_code_point, char_to_binary, text_to_binary};
pub use continuity::connector_between;
pub use encoder::{BitCursor, CharacterGroup, PulseEncoder, PulseStream, RenderedBit};
pub use line_coding::{BitRender, EncodingKind, has_mid_transition, render_bit};
pub use state::{CmiLevel, EncodingState, Polarity, compute_character_states};
pub use voltage::{HorizontalRun, PulseSegment, TransitionMarker, Voltage};
