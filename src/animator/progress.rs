//! Progress-ring geometry.

use std::f64::consts::PI;

/// Radius of the ring's circle in the gauge markup (`r="46.5"`).
pub const RING_RADIUS: f64 = 46.5;

/// Length of the ring's stroke, also used as its dash array.
pub fn circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Dash offset that leaves `progress` percent of the ring drawn.
///
/// 0% hides the whole stroke (offset = circumference), 100% draws it fully
/// (offset = 0). Values outside 0..=100 are not clamped.
pub fn stroke_offset(progress: f64) -> f64 {
    let circumference = circumference();
    circumference - (progress / 100.0) * circumference
}
