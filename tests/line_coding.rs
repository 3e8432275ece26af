use pulsecode_rs::config::{CmiConvention, CmiZeroPattern, EncoderConfig};
use pulsecode_rs::phy::{
    Bit, CmiLevel, EncodingKind, EncodingState, Polarity, PulseEncoder, Voltage,
    bits_to_code_point, compute_character_states, connector_between, render_bit,
    text_to_binary,
};
use pulsecode_rs::LineCodeError;

fn full_slot_levels(text: &str, encoding: EncodingKind) -> Vec<(Bit, Voltage, Voltage)> {
    PulseEncoder::new_default()
        .encode(text, encoding)
        .bits
        .iter()
        .map(|b| (b.render.bit, b.render.start_voltage, b.render.end_voltage))
        .collect()
}

#[test]
fn ascii_round_trip() {
    let text: String = (0u8..=255).map(char::from).collect();
    let units = text_to_binary(&text);
    assert_eq!(units.len(), 256);
    for unit in &units {
        assert_eq!(unit.bits.len(), 8);
        assert_eq!(bits_to_code_point(&unit.bits), unit.code_point);
    }
}

#[test]
fn ami_marks_alternate() {
    // 'A' = 01000001
    let levels = full_slot_levels("A", EncodingKind::Ami);
    let marks: Vec<Voltage> = levels
        .iter()
        .filter(|(bit, _, _)| bit.is_one())
        .map(|(_, start, _)| *start)
        .collect();
    assert_eq!(marks, vec![Voltage::High, Voltage::Low]);
    assert!(
        levels
            .iter()
            .filter(|(bit, _, _)| !bit.is_one())
            .all(|(_, start, end)| *start == Voltage::Zero && *end == Voltage::Zero)
    );
}

#[test]
fn cmi_marks_alternate_and_zeros_are_fixed() {
    let levels = full_slot_levels("A", EncodingKind::Cmi);
    let marks: Vec<Voltage> = levels
        .iter()
        .filter(|(bit, _, _)| bit.is_one())
        .map(|(_, start, _)| *start)
        .collect();
    assert_eq!(marks, vec![Voltage::Zero, Voltage::High]);
    assert!(
        levels
            .iter()
            .filter(|(bit, _, _)| !bit.is_one())
            .all(|(_, start, end)| *start == Voltage::Zero && *end == Voltage::High)
    );
}

#[test]
fn nrz_is_stateless_inversion() {
    let stream = PulseEncoder::new_default().encode("Hello, world", EncodingKind::Nrz);
    for bit in &stream.bits {
        let expected = if bit.render.bit.is_one() {
            Voltage::Low
        } else {
            Voltage::High
        };
        assert_eq!(bit.render.start_voltage, expected);
        assert_eq!(bit.render.end_voltage, expected);
        assert_eq!(bit.state, EncodingState::INITIAL);
    }
}

#[test]
fn ami_state_carries_into_next_character() {
    let units = text_to_binary("AB");
    let states = compute_character_states(&units, EncodingKind::Ami);
    let after_a = EncodingState::INITIAL.advance_all(&units[0].bits, EncodingKind::Ami);
    assert_eq!(states[1], after_a);

    // 'B' = 01000010 starts its first mark where 'A' left off
    let stream = PulseEncoder::new_default().encode("AB", EncodingKind::Ami);
    assert_eq!(stream.characters[1].start_state, after_a);
    assert_eq!(stream.bits[9].render.start_voltage, after_a.ami_polarity.voltage());
}

#[test]
fn odd_mark_count_flips_polarity_across_characters() {
    // 'C' = 01000011 has three marks
    let stream = PulseEncoder::new_default().encode("CC", EncodingKind::Ami);
    assert_eq!(stream.characters[1].start_state.ami_polarity, Polarity::Negative);
    let marks: Vec<Voltage> = stream
        .bits
        .iter()
        .filter(|b| b.render.bit.is_one())
        .map(|b| b.render.start_voltage)
        .collect();
    assert_eq!(
        marks,
        vec![
            Voltage::High,
            Voltage::Low,
            Voltage::High,
            Voltage::Low,
            Voltage::High,
            Voltage::Low
        ]
    );
}

#[test]
fn connector_suppressed_for_equal_levels() {
    for voltage in [Voltage::High, Voltage::Zero, Voltage::Low] {
        assert!(connector_between(voltage, voltage).is_none());
    }
}

#[test]
fn connectors_cross_character_boundaries() {
    // 'A' ends with a 1 (-5V), '@' = 01000000 starts with a 0 (+5V)
    let stream = PulseEncoder::new_default().encode("A@", EncodingKind::Nrz);
    let boundary = stream.bits[7].connector.expect("connector at char boundary");
    assert_eq!(boundary.span(), (Voltage::Low, Voltage::High));
}

#[test]
fn hi_under_nrz() {
    let encoder = PulseEncoder::new_default();
    let units = encoder.text_to_binary("Hi");
    assert_eq!(units[0].binary_string(), "01001000");
    assert_eq!(units[1].binary_string(), "01101001");

    let stream = encoder.encode("Hi", EncodingKind::Nrz);
    assert_eq!(stream.total_bits(), 16);
    assert_eq!(stream.bits[0].render.start_voltage, Voltage::High);
    assert_eq!(stream.bits[1].render.start_voltage, Voltage::Low);
    assert!(stream.bits.iter().all(|b| b.state == EncodingState::INITIAL));
    assert_eq!(stream.final_state, EncodingState::INITIAL);
}

#[test]
fn empty_text_renders_nothing() {
    let encoder = PulseEncoder::new_default();
    for encoding in EncodingKind::ALL {
        let stream = encoder.encode("", encoding);
        assert!(stream.is_empty());
        assert!(stream.characters.is_empty());
        assert_eq!(stream.summary(), "0 characters × 8 bits = 0 bits");
    }
    assert!(compute_character_states(&[], EncodingKind::Cmi).is_empty());
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(matches!(
        "Miller".parse::<EncodingKind>(),
        Err(LineCodeError::UnknownEncoding(name)) if name == "Miller"
    ));
    assert!(matches!(Bit::try_from(7u8), Err(LineCodeError::InvalidBit(_))));
}

#[test]
fn cmi_convention_is_configurable() {
    let encoder = PulseEncoder::new(EncoderConfig {
        cmi: CmiConvention {
            initial_level: CmiLevel::L1,
            zero_pattern: CmiZeroPattern::HighLow,
        },
        ..EncoderConfig::default()
    });
    let stream = encoder.encode("A", EncodingKind::Cmi);
    let first = &stream.bits[0].render;
    assert_eq!((first.start_voltage, first.end_voltage), (Voltage::High, Voltage::Zero));
    // First mark now starts at +5V
    assert_eq!(stream.bits[1].render.start_voltage, Voltage::High);
    assert_eq!(stream.bits[7].render.start_voltage, Voltage::Zero);
}

#[test]
fn render_bit_matches_stream() {
    let stream = PulseEncoder::new_default().encode("Rust", EncodingKind::Manchester);
    for bit in &stream.bits {
        let single = render_bit(bit.render.bit, EncodingKind::Manchester, bit.state);
        assert_eq!(single, bit.render);
    }
}

#[test]
fn wide_character_replay_agrees() {
    // 'a' and 'b' take 8 digits, U+4F60 takes 15
    let encoder = PulseEncoder::new_default();
    for encoding in EncodingKind::ALL {
        let stream = encoder.encode("a你b", encoding);
        assert_eq!(stream.total_bits(), 31);
        assert_eq!(stream.characters[1].first_bit, 8);
        assert_eq!(stream.characters[2].first_bit, 23);
        for (index, bit) in stream.bits.iter().enumerate() {
            let single = encoder.render_bit_at("a你b", encoding, index).unwrap();
            assert_eq!(&single, bit);
        }
    }
}
