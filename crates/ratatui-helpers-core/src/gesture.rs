//! Drag samples as delivered by the host.
//!
//! Recognition itself (press, slop, cancellation) belongs to the host; this module only turns
//! consecutive samples into a velocity.

use std::time::Duration;

/// One observation of an in-progress vertical drag.
///
/// `timestamp` is measured from any monotonic origin the host chooses; only differences
/// between samples of the same session are used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    pub translation_y: f64,
    pub timestamp: Duration,
}

impl DragSample {
    pub fn new(translation_y: f64, timestamp: Duration) -> Self {
        Self {
            translation_y,
            timestamp,
        }
    }

    /// Vertical velocity in points per second from `previous` to `self`.
    ///
    /// Returns `None` when the elapsed time is zero or negative (duplicate or out-of-order
    /// delivery).
    pub fn velocity_since(&self, previous: &DragSample) -> Option<f64> {
        let elapsed = self.timestamp.checked_sub(previous.timestamp)?;
        if elapsed.is_zero() {
            return None;
        }
        Some((self.translation_y - previous.translation_y) / elapsed.as_secs_f64())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}
