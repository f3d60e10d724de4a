// SPDX-License-Identifier: MPL-2.0
//! Upload area shown while no document is loaded.
//!
//! The whole area is clickable and opens the file dialog; it highlights while
//! the pointer is over it or a file is dragged over the window. Drops are
//! handled at window level by the application subscription.

use crate::document::DragState;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, mouse_area, text, Column, Container};
use iced::{alignment, mouse, Element, Length};

/// Messages emitted by the upload area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    SelectFile,
    PointerEntered,
    PointerLeft,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub drag: DragState,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let highlighted = ctx.drag.is_highlighted();

    let glyph = text("⇪")
        .size(sizing::ICON_XL)
        .color(if highlighted {
            palette::PRIMARY_500
        } else {
            palette::GRAY_400
        });

    let subtitle_key = if ctx.drag.is_dragging() {
        "upload-drop-active"
    } else {
        "upload-subtitle"
    };

    let select = button(text(i18n.tr("upload-button")).size(typography::BODY))
        .padding([spacing::XS, spacing::LG])
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::primary)
        .on_press(Message::SelectFile);

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(glyph)
        .push(text(i18n.tr("upload-title")).size(typography::TITLE_MD))
        .push(
            text(i18n.tr(subtitle_key))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        )
        .push(select)
        .push(
            text(i18n.tr("upload-supported"))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );

    let zone = Container::new(content)
        .width(Length::Fixed(sizing::DROP_ZONE_WIDTH))
        .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .style(styles::container::drop_zone(highlighted));

    let zone = mouse_area(zone)
        .on_press(Message::SelectFile)
        .on_enter(Message::PointerEntered)
        .on_exit(Message::PointerLeft)
        .interaction(mouse::Interaction::Pointer);

    let page = Column::new()
        .spacing(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .push(
            Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(text(i18n.tr("app-heading")).size(typography::TITLE_LG))
                .push(
                    text(i18n.tr("app-tagline"))
                        .size(typography::BODY)
                        .color(palette::GRAY_400),
                ),
        )
        .push(zone);

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .into()
}
