// SPDX-License-Identifier: MPL-2.0
//! Toast rendering.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, tooltip, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Font, Length, Theme};

pub struct Toast;

impl Toast {
    /// Renders a single toast: bold title, optional body, dismiss button.
    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let accent_color = notification.severity().color();
        let args: Vec<(&str, &str)> = notification
            .args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let title = Text::new(i18n.tr_with_args(notification.title_key(), &args))
            .size(typography::BODY)
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            });

        let mut body = Column::new().spacing(spacing::XXS).push(title);
        if let Some(key) = notification.description_key() {
            body = body.push(
                Text::new(i18n.tr_with_args(key, &args))
                    .size(typography::CAPTION)
                    .style(|theme: &Theme| text::Style {
                        color: Some(theme.extended_palette().background.strong.text),
                    }),
            );
        }

        let dismiss = tooltip(
            button(text("×").size(typography::BODY))
                .on_press(Message::Dismiss(notification.id()))
                .padding([0.0, spacing::XXS])
                .style(dismiss_button_style),
            text(i18n.tr("notification-dismiss")).size(typography::CAPTION),
            tooltip::Position::Left,
        );

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Top)
            .push(Container::new(body).width(Length::Fill))
            .push(dismiss);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Stacks visible toasts in the bottom-right corner.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> = manager
            .visible()
            .map(|notification| Self::view(notification, i18n))
            .collect();

        if toasts.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        Container::new(
            Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
    }
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    container::Style {
        background: Some(theme.extended_palette().background.base.color.into()),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_alpha = match status {
        button::Status::Hovered => Some(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => Some(opacity::OVERLAY_MEDIUM),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background: hover_alpha.map(|a| Color { a, ..palette::GRAY_400 }.into()),
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
