//! First-order exponential smoothing.
//!
//! The filter keeps no state of its own: the value being smoothed (the
//! camera's current position or zoom) is the filter memory.

/// Move `current` toward `target` by `factor` of the remaining distance.
///
/// `factor` of 0 holds the value, 1 jumps to the target.
#[must_use]
pub fn approach(current: f64, target: f64, factor: f64) -> f64 {
    factor.mul_add(target - current, current)
}
