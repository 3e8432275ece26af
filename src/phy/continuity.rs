// Connectors between adjacent bit slots

use super::voltage::{TransitionMarker, Voltage};
use crate::utils::consts::BIT_END;

/// Edge needed at the boundary between two bits, if any.
///
/// Sits at the trailing edge of the previous bit and spans both levels.
/// Equal levels are already continuous and need no connector.
pub fn connector_between(
    prev_end: Voltage,
    next_start: Voltage,
) -> Option<TransitionMarker> {
    if prev_end == next_start {
        return None;
    }
    Some(TransitionMarker::new(BIT_END, prev_end, next_start))
}
