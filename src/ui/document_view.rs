// SPDX-License-Identifier: MPL-2.0
//! Loaded document screen: file header, page/zoom controls and the page.

use crate::document::{CandidateFile, DocumentViewer, LoadPhase, RenderedPage};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::{Spinner, SpinnerState};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, image, scrollable, text, Column, Container, Row, Space, Stack};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    PrevPage,
    NextPage,
    ZoomIn,
    ZoomOut,
    Remove,
}

/// GPU-ready page bitmap with its pixel size.
#[derive(Debug, Clone)]
pub struct PageImage {
    handle: image::Handle,
    width: u32,
    height: u32,
}

impl PageImage {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<RenderedPage> for PageImage {
    fn from(page: RenderedPage) -> Self {
        Self {
            width: page.width,
            height: page.height,
            handle: image::Handle::from_rgba(page.width, page.height, page.pixels),
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub file: &'a CandidateFile,
    pub viewer: &'a DocumentViewer,
    pub page: Option<&'a PageImage>,
    pub spinner: SpinnerState,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(header(&ctx))
        .push(controls(&ctx))
        .push(body(&ctx))
        .into()
}

fn header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let details = Column::new()
        .spacing(spacing::XXS)
        .push(text(ctx.file.name().to_string()).size(typography::TITLE_SM))
        .push(
            text(i18n.tr_with_args(
                "file-size-megabytes",
                &[("size", ctx.file.size_megabytes().as_str())],
            ))
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
        );

    let remove = button(text(i18n.tr("document-remove")).size(typography::BODY))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::danger_text)
        .on_press(Message::Remove);

    Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(details).width(Length::Fill))
            .push(remove),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::header)
    .into()
}

fn controls<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let viewer = ctx.viewer;

    let page = viewer.page().to_string();
    let count = viewer
        .page_count()
        .map(|count| count.to_string())
        .unwrap_or_else(|| i18n.tr("viewer-page-count-unknown"));
    let percent = viewer.zoom().percent().to_string();
    let page_label = i18n.tr_with_args(
        "viewer-page-indicator",
        &[("page", page.as_str()), ("count", count.as_str())],
    );
    let zoom_label = i18n.tr_with_args("viewer-zoom-level", &[("percent", percent.as_str())]);

    let pagination = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(tool_button(
            i18n.tr("viewer-previous-page"),
            viewer.can_prev_page().then_some(Message::PrevPage),
        ))
        .push(text(page_label).size(typography::BODY))
        .push(tool_button(
            i18n.tr("viewer-next-page"),
            viewer.can_next_page().then_some(Message::NextPage),
        ));

    let zoom = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(tool_button(
            i18n.tr("viewer-zoom-out"),
            viewer.can_zoom_out().then_some(Message::ZoomOut),
        ))
        .push(
            Container::new(text(zoom_label).size(typography::BODY))
                .width(Length::Fixed(sizing::ZOOM_LABEL_WIDTH))
                .align_x(alignment::Horizontal::Center),
        )
        .push(tool_button(
            i18n.tr("viewer-zoom-in"),
            viewer.can_zoom_in().then_some(Message::ZoomIn),
        ));

    Row::new()
        .align_y(alignment::Vertical::Center)
        .push(pagination)
        .push(Space::new().width(Length::Fill))
        .push(zoom)
        .into()
}

fn tool_button<'a>(label: String, on_press: Option<Message>) -> Element<'a, Message> {
    button(text(label).size(typography::BODY))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::toolbar)
        .on_press_maybe(on_press)
        .into()
}

/// What the page area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    Loading,
    LoadFailed,
    RenderFailed,
    /// A bitmap is on screen; `refreshing` when a newer page or zoom is
    /// still being rasterized.
    Page { refreshing: bool },
}

impl Body {
    fn of(viewer: &DocumentViewer, has_page: bool) -> Self {
        match viewer.phase() {
            LoadPhase::Failed => Body::LoadFailed,
            LoadPhase::Ready if viewer.render_failed() => Body::RenderFailed,
            LoadPhase::Ready if has_page => Body::Page {
                refreshing: !viewer.is_displayed(),
            },
            _ => Body::Loading,
        }
    }
}

fn spinner<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    Spinner::new(ctx.spinner, palette::PRIMARY_500).view()
}

fn error_text<'a>(message: String) -> Element<'a, Message> {
    text(message)
        .size(typography::BODY)
        .color(palette::ERROR_500)
        .into()
}

fn body<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match (Body::of(ctx.viewer, ctx.page.is_some()), ctx.page)
    {
        (Body::LoadFailed, _) => error_text(ctx.i18n.tr("viewer-load-failed")),
        (Body::RenderFailed, _) => error_text(ctx.i18n.tr("viewer-render-failed")),
        (Body::Page { refreshing }, Some(page)) => {
            let sheet = Container::new(
                image(page.handle.clone())
                    .width(Length::Fixed(page.width as f32))
                    .height(Length::Fixed(page.height as f32)),
            )
            .style(styles::container::page);

            let pane = scrollable(Container::new(sheet).padding(spacing::MD))
                .direction(Direction::Both {
                    vertical: Scrollbar::new(),
                    horizontal: Scrollbar::new(),
                })
                .width(Length::Fill)
                .height(Length::Fill);

            if !refreshing {
                return pane.into();
            }
            return Stack::new()
                .push(pane)
                .push(
                    Container::new(spinner(ctx))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .align_x(alignment::Horizontal::Center)
                        .align_y(alignment::Vertical::Center),
                )
                .into();
        }
        _ => Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(spinner(ctx))
            .push(
                text(ctx.i18n.tr("viewer-loading"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
            .into(),
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
