// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Mode};
use crate::document::{DocumentSession, DocumentViewer, DragState};
use crate::i18n::fluent::I18n;
use crate::ui::document_view::{self, PageImage};
use crate::ui::notifications::{self, Toast};
use crate::ui::upload;
use crate::ui::widgets::SpinnerState;
use iced::widget::Stack;
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub mode: Mode,
    pub drag: DragState,
    pub session: &'a DocumentSession,
    pub viewer: &'a DocumentViewer,
    pub page: Option<&'a PageImage>,
    pub spinner: SpinnerState,
    pub notifications: &'a notifications::Manager,
}

/// Renders the active mode with the toast overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let screen: Element<'_, Message> = match (ctx.mode, ctx.session.current_file()) {
        (Mode::Document, Some(file)) => document_view::view(document_view::ViewContext {
            i18n: ctx.i18n,
            file,
            viewer: ctx.viewer,
            page: ctx.page,
            spinner: ctx.spinner,
        })
        .map(Message::Document),
        _ => upload::view(upload::ViewContext {
            i18n: ctx.i18n,
            drag: ctx.drag,
        })
        .map(Message::Upload),
    };

    Stack::new()
        .push(screen)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
