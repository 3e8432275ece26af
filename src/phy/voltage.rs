// Voltage levels and the pulse segments drawn inside a bit slot
// Time positions are fractions of the bit duration: 0.0 = leading edge, 1.0 = trailing edge

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::consts::SIGNAL_VOLTS;

/// Discrete signal level. Ordered `Low < Zero < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voltage {
    Low = -1,
    Zero = 0,
    High = 1,
}

impl Voltage {
    pub const ALL: [Voltage; 3] = [Voltage::High, Voltage::Zero, Voltage::Low];

    /// Signed level: +1, 0 or -1
    pub fn level(self) -> i8 {
        self as i8
    }

    /// Physical value in volts (+5V / 0V / -5V)
    pub fn volts(self) -> f32 {
        self.level() as f32 * SIGNAL_VOLTS
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Voltage::High => write!(f, "+{}V", SIGNAL_VOLTS),
            Voltage::Zero => write!(f, "0V"),
            Voltage::Low => write!(f, "-{}V", SIGNAL_VOLTS),
        }
    }
}

/// Constant level held over `[start, end]` of the bit slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalRun {
    pub start: f32,
    pub end: f32,
    pub voltage: Voltage,
}

impl HorizontalRun {
    pub fn new(start: f32, end: f32, voltage: Voltage) -> Self {
        Self {
            start,
            end,
            voltage,
        }
    }

    pub fn contains(&self, position: f32) -> bool {
        position >= self.start && position < self.end
    }
}

/// Vertical edge at `position` going from one level to another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionMarker {
    pub position: f32,
    pub from: Voltage,
    pub to: Voltage,
}

impl TransitionMarker {
    pub fn new(position: f32, from: Voltage, to: Voltage) -> Self {
        Self { position, from, to }
    }

    /// Voltage range covered by the edge as `(lowest, highest)`
    pub fn span(&self) -> (Voltage, Voltage) {
        (self.from.min(self.to), self.from.max(self.to))
    }

    pub fn covers(&self, voltage: Voltage) -> bool {
        let (low, high) = self.span();
        voltage >= low && voltage <= high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PulseSegment {
    Run(HorizontalRun),
    Transition(TransitionMarker),
}

impl PulseSegment {
    pub fn as_run(&self) -> Option<&HorizontalRun> {
        match self {
            PulseSegment::Run(run) => Some(run),
            PulseSegment::Transition(_) => None,
        }
    }

    pub fn as_transition(&self) -> Option<&TransitionMarker> {
        match self {
            PulseSegment::Transition(marker) => Some(marker),
            PulseSegment::Run(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_ordering() {
        assert!(Voltage::Low < Voltage::Zero);
        assert!(Voltage::Zero < Voltage::High);
        assert_eq!(Voltage::High.volts(), 5.0);
        assert_eq!(Voltage::Low.volts(), -5.0);
        assert_eq!(Voltage::Low.to_string(), "-5V");
    }

    #[test]
    fn test_marker_span() {
        let marker = TransitionMarker::new(0.5, Voltage::High, Voltage::Low);
        assert_eq!(marker.span(), (Voltage::Low, Voltage::High));
        assert!(marker.covers(Voltage::Zero));

        let marker = TransitionMarker::new(0.5, Voltage::Zero, Voltage::High);
        assert!(!marker.covers(Voltage::Low));
    }

    #[test]
    fn test_run_contains() {
        let run = HorizontalRun::new(0.0, 0.5, Voltage::High);
        assert!(run.contains(0.0));
        assert!(run.contains(0.25));
        assert!(!run.contains(0.5));
    }
}
