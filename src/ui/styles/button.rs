// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main call to action ("Select File").
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::PRIMARY_700,
        button::Status::Disabled => Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::PRIMARY_500
        },
        button::Status::Active | button::Status::Pressed => palette::PRIMARY_500,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: if status == button::Status::Hovered {
            shadow::MD
        } else {
            shadow::NONE
        },
        snap: true,
    }
}

/// Compact toolbar button (page and zoom controls).
///
/// Disabled buttons keep their footprint but fade out.
pub fn toolbar(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();
    let (background, text_color) = match status {
        button::Status::Active => (palette.background.weak.color, palette.background.weak.text),
        button::Status::Hovered => (palette.background.strong.color, palette.background.strong.text),
        button::Status::Pressed => (palette.primary.weak.color, palette.primary.weak.text),
        button::Status::Disabled => (
            palette.background.weak.color,
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette.background.weak.text
            },
        ),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Borderless destructive action ("Remove").
pub fn danger_text(theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::ERROR_500
        })),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: if status == button::Status::Disabled {
            theme.extended_palette().background.strong.color
        } else {
            palette::ERROR_500
        },
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_uses_brand_color() {
        let style = primary(&Theme::Light, button::Status::Active);
        assert_eq!(style.background, Some(Background::Color(palette::PRIMARY_500)));
        assert_eq!(style.text_color, WHITE);
    }

    #[test]
    fn disabled_toolbar_text_is_faded() {
        let active = toolbar(&Theme::Dark, button::Status::Active);
        let disabled = toolbar(&Theme::Dark, button::Status::Disabled);
        assert!(disabled.text_color.a < active.text_color.a);
    }

    #[test]
    fn danger_text_has_no_resting_background() {
        assert!(danger_text(&Theme::Light, button::Status::Active)
            .background
            .is_none());
    }
}
