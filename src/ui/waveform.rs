// Three-row text waveform (+5V / 0V / -5V)
// Each bit takes [first half][mid edge][second half][connector] columns

use crate::phy::encoder::{PulseStream, RenderedBit};
use crate::phy::voltage::Voltage;
use crate::utils::consts::{MID_BIT, WAVEFORM_HALF_WIDTH};

const LEVEL: char = '─';
const EDGE: char = '│';
const BLANK: char = ' ';

fn bit_width() -> usize {
    WAVEFORM_HALF_WIDTH * 2 + 2
}

fn row_label(voltage: Voltage) -> String {
    format!("{:>4} ┤", voltage.to_string())
}

fn draw_bit(row: &mut String, bit: &RenderedBit, next: Option<&RenderedBit>, voltage: Voltage) {
    let render = &bit.render;
    let first = render.voltage_at(MID_BIT / 2.0);
    let second = render.voltage_at((MID_BIT + 1.0) / 2.0);
    let level = |v: Voltage| if v == voltage { LEVEL } else { BLANK };

    row.extend(std::iter::repeat_n(level(first), WAVEFORM_HALF_WIDTH));

    let mid = render
        .transitions()
        .find(|marker| marker.position == MID_BIT);
    row.push(match mid {
        Some(marker) if marker.covers(voltage) => EDGE,
        Some(_) => BLANK,
        None => level(first),
    });

    row.extend(std::iter::repeat_n(level(second), WAVEFORM_HALF_WIDTH));

    row.push(match (&bit.connector, next) {
        (Some(marker), _) if marker.covers(voltage) => EDGE,
        (None, Some(next)) if next.render.start_voltage == render.end_voltage => {
            level(render.end_voltage)
        }
        _ => BLANK,
    });
}

/// Render the whole stream, one line per voltage level plus bit and character labels
pub fn render_waveform(stream: &PulseStream) -> String {
    let mut lines = Vec::with_capacity(Voltage::ALL.len() + 2);

    for voltage in Voltage::ALL {
        let mut row = row_label(voltage);
        for (i, bit) in stream.bits.iter().enumerate() {
            draw_bit(&mut row, bit, stream.bits.get(i + 1), voltage);
        }
        lines.push(row.trim_end().to_string());
    }

    let mut bit_row = format!("{:>4}  ", "bit");
    let mut char_row = format!("{:>4}  ", "char");
    for bit in &stream.bits {
        let mut cell = vec![BLANK; bit_width()];
        cell[WAVEFORM_HALF_WIDTH] = bit.render.bit.to_char();
        if bit.mid_bit_marker {
            cell[WAVEFORM_HALF_WIDTH + 1] = '*';
        }
        bit_row.extend(cell);

        let mut cell = vec![BLANK; bit_width()];
        if bit.bit_in_char == 0 {
            cell[0] = stream.characters[bit.char_index].unit.character;
        }
        char_row.extend(cell);
    }
    lines.push(bit_row.trim_end().to_string());
    lines.push(char_row.trim_end().to_string());

    lines.join("\n")
}
