// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Zoom factor bounds and step
//! - **Pagination**: First page number
//! - **Notifications**: Toast limits and display durations
//! - **Rendering**: Page and raster size limits
//! - **Loading**: Spinner animation

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom factor applied when a document is (re)loaded.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Smallest zoom factor reachable with zoom out.
pub const MIN_ZOOM: f32 = 0.6;

/// Largest zoom factor reachable with zoom in.
pub const MAX_ZOOM: f32 = 3.0;

/// Increment applied by one zoom in/out action.
pub const ZOOM_STEP: f32 = 0.2;

/// `MIN_ZOOM` expressed in whole steps from `DEFAULT_ZOOM`.
pub const MIN_ZOOM_STEPS: i32 = -2;

/// `MAX_ZOOM` expressed in whole steps from `DEFAULT_ZOOM`.
pub const MAX_ZOOM_STEPS: i32 = 10;

// ==========================================================================
// Pagination Defaults
// ==========================================================================

/// Pages are numbered from one, as shown to the user.
pub const FIRST_PAGE: u32 = 1;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Maximum number of toasts visible at once; the rest are queued.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Display time for success and info toasts (in seconds).
pub const TOAST_SHORT_SECS: u64 = 3;

/// Display time for warning toasts (in seconds).
pub const TOAST_LONG_SECS: u64 = 5;

// ==========================================================================
// Rendering Defaults
// ==========================================================================

/// Largest page side honored, in PDF units (the PDF implementation limit).
pub const MAX_PAGE_EXTENT_PT: f32 = 14_400.0;

/// Largest raster produced for one page (in pixels). Bigger pages are
/// scaled down to fit.
pub const MAX_RENDER_PIXELS: u64 = 4096 * 4096;

// ==========================================================================
// Loading Defaults
// ==========================================================================

/// Interval of the tick driving the spinner and toast expiry (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 100;

/// Spinner rotation speed in radians per tick.
pub const SPINNER_SPEED: f32 = 0.1;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(MIN_ZOOM > 0.0);
    assert!(MIN_ZOOM < DEFAULT_ZOOM);
    assert!(MAX_ZOOM > DEFAULT_ZOOM);
    assert!(ZOOM_STEP > 0.0);
    assert!(MIN_ZOOM_STEPS < 0);
    assert!(MAX_ZOOM_STEPS > 0);

    // Pagination validation
    assert!(FIRST_PAGE == 1);

    // Notification validation
    assert!(MAX_VISIBLE_TOASTS > 0);
    assert!(TOAST_LONG_SECS > TOAST_SHORT_SECS);

    // Rendering validation
    assert!(MAX_PAGE_EXTENT_PT > 0.0);
    assert!(MAX_RENDER_PIXELS > 0);
    // A US Letter page must render unscaled at the largest zoom.
    assert!((612.0 * MAX_ZOOM) as u64 * (792.0 * MAX_ZOOM) as u64 <= MAX_RENDER_PIXELS);

    // Loading validation
    assert!(TICK_INTERVAL_MS > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_step_counts_match_bounds() {
        let min = DEFAULT_ZOOM + MIN_ZOOM_STEPS as f32 * ZOOM_STEP;
        let max = DEFAULT_ZOOM + MAX_ZOOM_STEPS as f32 * ZOOM_STEP;
        assert!((min - MIN_ZOOM).abs() < 1e-6);
        assert!((max - MAX_ZOOM).abs() < 1e-6);
    }

    #[test]
    fn zoom_defaults_are_valid() {
        assert_eq!(DEFAULT_ZOOM, 1.0);
        assert!(MIN_ZOOM < DEFAULT_ZOOM);
        assert!(MAX_ZOOM > DEFAULT_ZOOM);
    }

    #[test]
    fn toast_defaults_are_valid() {
        assert_eq!(MAX_VISIBLE_TOASTS, 3);
        assert!(TOAST_LONG_SECS > TOAST_SHORT_SECS);
    }
}
