pub mod progress;
pub mod steps;
pub mod waveform;

use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::phy::encoder::{PulseStream, RenderedBit};
use crate::phy::line_coding::EncodingKind;

pub use progress::{ProgressManager, templates};
pub use steps::ConversionSteps;
pub use waveform::render_waveform;

pub fn print_banner() {
    println!("PulseCode-rs: digital line code visualizer");
}

pub fn print_encodings() {
    for kind in EncodingKind::ALL {
        println!("{:<11} {}", kind.code(), kind.name());
        println!("{:<11} {}", "", kind.description());
    }
}

pub fn print_stream(stream: &PulseStream, steps: &ConversionSteps) {
    for (title, content) in steps.lines() {
        println!("{}", title);
        println!("  {}", content);
    }
    println!();
    println!("{}  [{}]", stream.encoding.name(), stream.summary());
    println!("{}", render_waveform(stream));
    println!();
    println!("{}", stream.encoding.description());
}

/// One-line description of a bit for step-through output
pub fn describe_bit(stream: &PulseStream, bit: &RenderedBit) -> String {
    let character = stream.characters[bit.char_index].unit.character;
    let render = &bit.render;
    let shape = if render.start_voltage == render.end_voltage {
        render.start_voltage.to_string()
    } else {
        format!("{} → {}", render.start_voltage, render.end_voltage)
    };

    let mut line = format!(
        "Char {} '{}' bit {} ({}): {}",
        bit.char_index + 1,
        character,
        bit.bit_in_char + 1,
        render.bit,
        shape
    );
    if stream.encoding.is_stateful() {
        line.push_str(&format!(
            " [ami={:?} cmi={:?}]",
            bit.state.ami_polarity, bit.state.cmi_level
        ));
    }
    line
}

/// Walk the stream bit by bit, one line per bit, pausing `interval` between bits.
///
/// Lines go above the progress bar, or to `out` when the bar is hidden.
/// Returns the number of bits shown.
pub fn step_through<W: Write>(
    stream: &PulseStream,
    progress: &ProgressManager,
    interval: Duration,
    out: &mut W,
) -> Result<usize> {
    progress.create_bar(
        "step",
        stream.total_bits() as u64,
        templates::STEP,
        stream.encoding.label(),
    )?;

    let mut shown = 0;
    for bit in stream.cursor() {
        let character = stream.characters[bit.char_index].unit.character;
        progress.set_position("step", bit.global_index as u64 + 1)?;
        progress.set_message("step", &format!("'{}' bit {}", character, bit.bit_in_char + 1))?;
        progress.println(&describe_bit(stream, bit), out)?;
        shown += 1;
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    progress.finish("step", &stream.summary())?;
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phy::encoder::PulseEncoder;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_describe_bit() {
        let stream = PulseEncoder::new_default().encode("A", EncodingKind::Rz);
        let line = describe_bit(&stream, &stream.bits[7]);
        assert_eq!(line, "Char 1 'A' bit 8 (1): -5V → 0V");

        let stream = PulseEncoder::new_default().encode("A", EncodingKind::Ami);
        let line = describe_bit(&stream, &stream.bits[1]);
        assert_eq!(line, "Char 1 'A' bit 2 (1): +5V [ami=Positive cmi=L0]");
    }

    #[test]
    fn test_step_through_hidden_target() {
        let stream = PulseEncoder::new_default().encode("Hi", EncodingKind::Ami);
        let progress = ProgressManager::with_draw_target(ProgressDrawTarget::hidden());

        let mut out = Vec::new();
        let shown = step_through(&stream, &progress, Duration::ZERO, &mut out).unwrap();
        assert_eq!(shown, 16);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], describe_bit(&stream, &stream.bits[0]));
        assert!(lines[15].starts_with("Char 2 'i' bit 8 (1)"));
    }
}
