use crate::phy::bits::BinaryUnit;
use crate::phy::line_coding::EncodingKind;

/// The four textual stages of a conversion, as shown next to the waveform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSteps {
    pub characters: String,
    pub code_points: String,
    pub binary: String,
    pub pulse_code: String,
}

impl ConversionSteps {
    pub fn from_units(text: &str, units: &[BinaryUnit], encoding: EncodingKind) -> Self {
        let characters = format!(
            "\"{}\" → [{}]",
            text,
            units
                .iter()
                .map(|unit| format!("'{}'", unit.character))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let code_points = units
            .iter()
            .map(|unit| format!("'{}' → {}", unit.character, unit.code_point))
            .collect::<Vec<_>>()
            .join(", ");

        let binary = units
            .iter()
            .map(|unit| format!("{} → {}", unit.code_point, unit.binary_string()))
            .collect::<Vec<_>>()
            .join(", ");

        let pulse_code = format!(
            "Applying {} encoding to the binary sequence",
            encoding.code()
        );

        Self {
            characters,
            code_points,
            binary,
            pulse_code,
        }
    }

    pub fn lines(&self) -> [(&'static str, &str); 4] {
        [
            ("Step 1: String → Character Array", self.characters.as_str()),
            ("Step 2: Character Array → ASCII Array", self.code_points.as_str()),
            ("Step 3: ASCII Array → Binary Array", self.binary.as_str()),
            ("Step 4: Binary Array → Digital Pulse Code", self.pulse_code.as_str()),
        ]
    }
}
