// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! `App` composes the document pipeline (intake, session, viewer, renderer)
//! with localization, settings and notifications. It shows exactly one of two
//! modes: the upload area while no document is live, the document view
//! otherwise.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::document::{
    default_renderer, DocumentRenderer, DocumentSession, DocumentViewer, FileIntake, IncomingFile,
    IntakeSource, LoadPhase,
};
use crate::i18n::fluent::I18n;
use crate::ui::document_view::PageImage;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use crate::ui::widgets::SpinnerState;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Upload,
    Document,
}

pub struct App {
    pub i18n: I18n,
    config: Config,
    intake: FileIntake,
    session: DocumentSession,
    viewer: DocumentViewer,
    renderer: Arc<dyn DocumentRenderer>,
    /// Last page delivered by the renderer for the current document.
    page_image: Option<PageImage>,
    spinner: SpinnerState,
    notifications: notifications::Manager,
    theme_mode: ThemeMode,
    /// A file dialog is on screen; further "Select File" clicks are ignored.
    dialog_open: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("mode", &self.mode())
            .field("phase", &self.viewer.phase())
            .field("renderer", &self.renderer.name())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 900.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 760.0;
pub const MIN_WINDOW_WIDTH: f32 = 560.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_parts(Config::default(), I18n::default(), default_renderer())
    }
}

impl App {
    fn with_parts(config: Config, i18n: I18n, renderer: Arc<dyn DocumentRenderer>) -> Self {
        log::debug!("Using {} renderer", renderer.name());
        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            intake: FileIntake::new(),
            session: DocumentSession::new(),
            viewer: DocumentViewer::new(),
            renderer,
            page_image: None,
            spinner: SpinnerState::default(),
            notifications: notifications::Manager::new(),
            dialog_open: false,
        }
    }

    /// Loads settings and translations, then opens the startup file if any.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let mut app = Self::with_parts(config, i18n, default_renderer());

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let task = match flags.file_path {
            Some(path) => app.submit(IntakeSource::Browse, vec![IncomingFile::from_path(path)]),
            None => Task::none(),
        };

        (app, task)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.session.live_reference().is_some() {
            Mode::Document
        } else {
            Mode::Upload
        }
    }

    /// Spinner should turn: opening, or open but no page drawn yet.
    fn is_busy(&self) -> bool {
        match self.viewer.phase() {
            LoadPhase::Loading => true,
            LoadPhase::Ready => {
                self.viewer.is_rendering()
                    || (self.page_image.is_none() && !self.viewer.render_failed())
            }
            LoadPhase::Idle | LoadPhase::Failed => false,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.session.current_file() {
            Some(file) => format!("{} - {}", file.name(), app_name),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(
                self.is_busy(),
                self.notifications.has_notifications(),
            ),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.handle_message(message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            mode: self.mode(),
            drag: self.intake.drag_state(),
            session: &self.session,
            viewer: &self.viewer,
            page: self.page_image.as_ref(),
            spinner: self.spinner,
            notifications: &self.notifications,
        })
    }
}
