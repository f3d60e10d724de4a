// SPDX-License-Identifier: MPL-2.0
//! Bounded zoom factor.

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM_STEPS, MIN_ZOOM_STEPS, ZOOM_STEP};
use std::fmt;

/// Zoom factor, guaranteed to be `1.0 + k * 0.2` within `[0.6, 3.0]`.
///
/// Stored as a whole number of steps away from 1.0 so that repeated zooming
/// never accumulates floating point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZoomFactor(i32);

impl ZoomFactor {
    /// Creates a zoom factor `steps` increments away from 1.0, clamped to range.
    #[must_use]
    pub fn from_steps(steps: i32) -> Self {
        Self(steps.clamp(MIN_ZOOM_STEPS, MAX_ZOOM_STEPS))
    }

    /// Smallest reachable factor (0.6).
    #[must_use]
    pub fn min() -> Self {
        Self(MIN_ZOOM_STEPS)
    }

    /// Largest reachable factor (3.0).
    #[must_use]
    pub fn max() -> Self {
        Self(MAX_ZOOM_STEPS)
    }

    #[must_use]
    pub fn steps(self) -> i32 {
        self.0
    }

    /// Returns the multiplier applied to page dimensions.
    #[must_use]
    pub fn value(self) -> f32 {
        DEFAULT_ZOOM + self.0 as f32 * ZOOM_STEP
    }

    /// Returns the factor as a whole percentage (e.g. 1.4 → 140).
    #[must_use]
    pub fn percent(self) -> u32 {
        (100 + self.0 * 20) as u32
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM_STEPS
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM_STEPS
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::from_steps(self.0 + 1)
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::from_steps(self.0 - 1)
    }
}

impl fmt::Display for ZoomFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_ZOOM, MIN_ZOOM};

    #[test]
    fn default_is_one() {
        assert_eq!(ZoomFactor::default().value(), 1.0);
        assert_eq!(ZoomFactor::default().percent(), 100);
    }

    #[test]
    fn zoom_in_clamps_at_max() {
        let mut zoom = ZoomFactor::default();
        for _ in 0..50 {
            zoom = zoom.zoom_in();
        }
        assert!(zoom.is_max());
        assert!((zoom.value() - MAX_ZOOM).abs() < 1e-6);
        assert_eq!(zoom.percent(), 300);
    }

    #[test]
    fn zoom_out_clamps_at_min() {
        let mut zoom = ZoomFactor::default();
        for _ in 0..50 {
            zoom = zoom.zoom_out();
        }
        assert!(zoom.is_min());
        assert!((zoom.value() - MIN_ZOOM).abs() < 1e-6);
        assert_eq!(zoom.percent(), 60);
    }

    #[test]
    fn any_sequence_stays_on_the_step_grid() {
        // Deterministic pseudo-random walk.
        let mut zoom = ZoomFactor::default();
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            zoom = if seed % 2 == 0 { zoom.zoom_in() } else { zoom.zoom_out() };

            let value = zoom.value();
            assert!((MIN_ZOOM - 1e-6..=MAX_ZOOM + 1e-6).contains(&value));
            let k = (value - 1.0) / ZOOM_STEP;
            assert!((k - k.round()).abs() < 1e-4, "{value} is off the grid");
        }
    }

    #[test]
    fn two_zoom_ins_give_one_point_four() {
        let zoom = ZoomFactor::default().zoom_in().zoom_in();
        assert!((zoom.value() - 1.4).abs() < 1e-6);
        assert_eq!(zoom.to_string(), "1.4");
        assert_eq!(zoom.percent(), 140);
    }

    #[test]
    fn from_steps_clamps() {
        assert_eq!(ZoomFactor::from_steps(99), ZoomFactor::max());
        assert_eq!(ZoomFactor::from_steps(-99), ZoomFactor::min());
    }
}
