// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by every view.
//!
//! - **Palette**: base and feedback colors
//! - **Opacity**: overlay levels
//! - **Spacing**: 8px grid
//! - **Sizing**: component dimensions
//! - **Typography**: font size scale
//! - **Border** / **Radius** / **Shadow**
//!
//! ```
//! use pdf_lens::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let drop_highlight = Color {
//!     a: opacity::OVERLAY_SUBTLE,
//!     ..palette::PRIMARY_500
//! };
//! let padding = spacing::MD;
//! # let _ = (drop_highlight, padding);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    pub const PRIMARY_100: Color = Color::from_rgb(0.85, 0.92, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_700: Color = Color::from_rgb(0.15, 0.4, 0.7);

    // Feedback
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
    pub const XXL: f32 = 48.0;
}

// ============================================================================
// Sizing
// ============================================================================

pub mod sizing {
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_XL: f32 = 48.0;

    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const TOAST_WIDTH: f32 = 320.0;

    /// Upload drop area.
    pub const DROP_ZONE_WIDTH: f32 = 480.0;
    pub const DROP_ZONE_HEIGHT: f32 = 280.0;

    /// Loading spinner diameter.
    pub const SPINNER: f32 = 48.0;
    pub const SPINNER_STROKE: f32 = 4.0;

    /// Zoom percentage label, wide enough for "300%".
    pub const ZOOM_LABEL_WIDTH: f32 = 56.0;
}

// ============================================================================
// Typography
// ============================================================================

pub mod typography {
    /// App heading.
    pub const TITLE_LG: f32 = 30.0;

    /// Upload area title.
    pub const TITLE_MD: f32 = 20.0;

    /// Document file name.
    pub const TITLE_SM: f32 = 18.0;

    pub const BODY: f32 = 14.0;

    /// Secondary text (file size, supported formats).
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Radius
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

// ============================================================================
// Shadow
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    /// Drop shadow under a rendered page.
    pub const PAGE: Shadow = Shadow {
        color: Color {
            a: 0.25,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 12.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::OVERLAY_MEDIUM > opacity::OVERLAY_SUBTLE);

    assert!(sizing::ICON_XL > sizing::ICON_MD);
    assert!(sizing::DROP_ZONE_WIDTH > sizing::DROP_ZONE_HEIGHT);
    assert!(sizing::SPINNER > sizing::SPINNER_STROKE * 2.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);
};
