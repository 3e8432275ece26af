use serde::Serialize;
use tracing::{debug, info};

use super::bits::{BinaryUnit, Bit, text_to_binary_with};
use super::continuity::connector_between;
use super::line_coding::{
    BitRender, EncodingKind, has_mid_transition, render_bit_with,
};
use super::state::{EncodingState, compute_character_states_from};
use super::voltage::TransitionMarker;
use crate::config::EncoderConfig;
use crate::error::{LineCodeError, Result};
use crate::utils::consts::BITS_PER_CHAR;

/// A bit placed in the stream, with the state it was rendered from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBit {
    pub global_index: usize,
    pub char_index: usize,
    pub bit_in_char: usize,
    pub state: EncodingState,
    pub render: BitRender,
    /// Edge joining this bit to the next one
    pub connector: Option<TransitionMarker>,
    pub mid_bit_marker: bool,
}

/// A character and the state its first bit starts from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterGroup {
    pub unit: BinaryUnit,
    pub start_state: EncodingState,
    pub first_bit: usize,
}

/// Full rendering of a text under one line code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseStream {
    pub text: String,
    pub encoding: EncodingKind,
    pub characters: Vec<CharacterGroup>,
    pub bits: Vec<RenderedBit>,
    pub final_state: EncodingState,
}

impl PulseStream {
    pub fn total_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit(&self, index: usize) -> Option<&RenderedBit> {
        self.bits.get(index)
    }

    /// Bits belonging to one character
    pub fn character_bits(&self, char_index: usize) -> &[RenderedBit] {
        match self.characters.get(char_index) {
            Some(group) => {
                let end = group.first_bit + group.unit.bits.len();
                &self.bits[group.first_bit..end]
            }
            None => &[],
        }
    }

    /// E.g. `"2 characters × 8 bits = 16 bits"`
    pub fn summary(&self) -> String {
        let count = self.characters.len();
        let plural = if count == 1 { "" } else { "s" };
        let uniform = self
            .characters
            .iter()
            .all(|group| group.unit.bits.len() == BITS_PER_CHAR);

        if uniform {
            format!(
                "{} character{} × {} bits = {} bits",
                count,
                plural,
                BITS_PER_CHAR,
                self.total_bits()
            )
        } else {
            format!("{} character{} = {} bits", count, plural, self.total_bits())
        }
    }

    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor::new(self)
    }
}

pub struct PulseEncoder {
    config: EncoderConfig,
}

impl PulseEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        debug!("PulseEncoder initialized: {:?}", config);
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(EncoderConfig::default())
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn text_to_binary(&self, text: &str) -> Vec<BinaryUnit> {
        text_to_binary_with(text, self.config.wide_chars)
    }

    /// Render every bit of `text`: text -> units -> states -> bits -> connectors
    pub fn encode(&self, text: &str, encoding: EncodingKind) -> PulseStream {
        let units = self.text_to_binary(text);
        let start_states =
            compute_character_states_from(&units, encoding, self.config.initial_state());

        let mut characters = Vec::with_capacity(units.len());
        let mut bits = Vec::with_capacity(units.len() * BITS_PER_CHAR);
        let mut state = self.config.initial_state();

        for (char_index, (unit, start_state)) in
            units.into_iter().zip(start_states).enumerate()
        {
            debug_assert_eq!(state, start_state);
            state = start_state;

            let first_bit = bits.len();
            for (bit_in_char, &bit) in unit.bits.iter().enumerate() {
                bits.push(self.place(
                    first_bit + bit_in_char,
                    char_index,
                    bit_in_char,
                    bit,
                    encoding,
                    state,
                ));
                state = state.advance(bit, encoding);
            }

            characters.push(CharacterGroup {
                unit,
                start_state,
                first_bit,
            });
        }

        if self.config.render.connect_bits {
            for i in 1..bits.len() {
                let next_start = bits[i].render.start_voltage;
                let prev = &mut bits[i - 1];
                prev.connector = connector_between(prev.render.end_voltage, next_start);
            }
        }

        info!(
            "Encoded {} characters ({} bits) with {}",
            characters.len(),
            bits.len(),
            encoding
        );

        PulseStream {
            text: text.to_string(),
            encoding,
            characters,
            bits,
            final_state: state,
        }
    }

    /// Render a single bit by global index.
    ///
    /// AMI and CMI state is sequential, so the fold is replayed from the
    /// start of the text up to `index` (and one bit beyond for the connector).
    pub fn render_bit_at(
        &self,
        text: &str,
        encoding: EncodingKind,
        index: usize,
    ) -> Result<RenderedBit> {
        let units = self.text_to_binary(text);
        let len: usize = units
            .iter()
            .map(|unit| unit.bits.len())
            .sum();

        let mut walk = walk_bits(&units, encoding, self.config.initial_state()).skip(index);
        let (char_index, bit_in_char, bit, state) = walk
            .next()
            .ok_or(LineCodeError::BitIndexOutOfRange { index, len })?;

        let mut placed = self.place(index, char_index, bit_in_char, bit, encoding, state);
        if self.config.render.connect_bits
            && let Some((_, _, next_bit, next_state)) = walk.next()
        {
            let next = self.render_bit_from(next_state, next_bit, encoding);
            placed.connector =
                connector_between(placed.render.end_voltage, next.start_voltage);
        }

        debug!("Replayed {} bits to render bit {}", index + 1, index);
        Ok(placed)
    }

    /// Render a single bit when its state is already known; no replay
    pub fn render_bit_from(
        &self,
        state: EncodingState,
        bit: Bit,
        encoding: EncodingKind,
    ) -> BitRender {
        render_bit_with(bit, encoding, state, &self.config.cmi)
    }

    fn place(
        &self,
        global_index: usize,
        char_index: usize,
        bit_in_char: usize,
        bit: Bit,
        encoding: EncodingKind,
        state: EncodingState,
    ) -> RenderedBit {
        RenderedBit {
            global_index,
            char_index,
            bit_in_char,
            state,
            render: self.render_bit_from(state, bit, encoding),
            connector: None,
            mid_bit_marker: self.config.render.show_mid_bit_markers
                && has_mid_transition(encoding, bit),
        }
    }
}

impl Default for PulseEncoder {
    fn default() -> Self {
        Self::new_default()
    }
}

/// Flat walk over every bit as `(char_index, bit_in_char, bit, state_at_bit)`
fn walk_bits(
    units: &[BinaryUnit],
    encoding: EncodingKind,
    initial: EncodingState,
) -> impl Iterator<Item = (usize, usize, Bit, EncodingState)> + '_ {
    units
        .iter()
        .enumerate()
        .flat_map(|(char_index, unit)| {
            unit.bits
                .iter()
                .enumerate()
                .map(move |(bit_in_char, &bit)| (char_index, bit_in_char, bit))
        })
        .scan(initial, move |state, (char_index, bit_in_char, bit)| {
            let at_bit = *state;
            *state = at_bit.advance(bit, encoding);
            Some((char_index, bit_in_char, bit, at_bit))
        })
}

/// Step-through over a rendered stream.
///
/// The caller owns the timer; each `next()` moves the active bit forward.
pub struct BitCursor<'a> {
    stream: &'a PulseStream,
    next: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(stream: &'a PulseStream) -> Self {
        Self { stream, next: 0 }
    }

    /// Bit most recently yielded
    pub fn active(&self) -> Option<&'a RenderedBit> {
        self.next
            .checked_sub(1)
            .and_then(|index| self.stream.bit(index))
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Make `index` the active bit
    pub fn seek(&mut self, index: usize) -> Result<&'a RenderedBit> {
        let bit = self
            .stream
            .bit(index)
            .ok_or(LineCodeError::BitIndexOutOfRange {
                index,
                len: self.stream.total_bits(),
            })?;
        self.next = index + 1;
        Ok(bit)
    }

    pub fn remaining(&self) -> usize {
        self.stream
            .total_bits()
            .saturating_sub(self.next)
    }
}

impl<'a> Iterator for BitCursor<'a> {
    type Item = &'a RenderedBit;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.stream.bit(self.next)?;
        self.next += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}
