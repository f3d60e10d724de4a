// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Dashed-look upload area; tinted while a file hovers over it.
pub fn drop_zone(highlighted: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let base = theme.extended_palette().background;
        let (background, border_color) = if highlighted {
            (
                Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..palette::PRIMARY_500
                },
                palette::PRIMARY_500,
            )
        } else {
            (base.weak.color, base.strong.color)
        };

        container::Style {
            background: Some(Background::Color(background)),
            border: Border {
                color: border_color,
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            text_color: Some(base.base.text),
            ..Default::default()
        }
    }
}

/// Bar above the page holding the file name and remove action.
pub fn header(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background;
    container::Style {
        background: Some(Background::Color(base.weak.color)),
        border: Border {
            color: base.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Rendered page sheet.
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::WHITE)),
        shadow: shadow::PAGE,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighted_drop_zone_uses_brand_border() {
        let style = drop_zone(true)(&Theme::Light);
        assert_eq!(style.border.color, palette::PRIMARY_500);
    }

    #[test]
    fn idle_drop_zone_follows_theme() {
        let light = drop_zone(false)(&Theme::Light);
        let dark = drop_zone(false)(&Theme::Dark);
        assert_ne!(light.background, dark.background);
    }
}
