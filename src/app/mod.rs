//! App module - contains the main application state and logic

mod details;
mod generation;
mod images;
mod panel;
mod toasts;
mod views;

use crate::carousel::Carousel;
use crate::constants::MAX_IMAGE_FETCHES;
use crate::content::ContentStore;
use crate::controller::CarouselController;
use crate::generator::ImagePanel;
use crate::settings::Settings;
use crate::theme;
use crate::types::FocusSection;
use crate::utils::get_cache_dir;
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub(crate) use toasts::Toasts;

/// Single-key shortcuts available while the carousel has focus
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shortcuts {
    pub details: bool,
    pub toggle_panel: bool,
    pub toggle_fullscreen: bool,
}

impl Shortcuts {
    /// Read this frame's shortcut keys. A focused widget (the Details button, the
    /// credential field) keeps Enter and letters for itself, so nothing fires then.
    pub(crate) fn read(ctx: &egui::Context) -> Self {
        if ctx.memory(|mem| mem.focused().is_some()) || ctx.wants_keyboard_input() {
            return Self::default();
        }
        ctx.input(|i| Self {
            details: i.key_pressed(egui::Key::Enter),
            toggle_panel: i.key_pressed(egui::Key::G),
            toggle_fullscreen: i.key_pressed(egui::Key::F11),
        })
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) controller: CarouselController,
    pub(crate) focus: FocusSection,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Image generation
    pub(crate) image_panel: ImagePanel,
    pub(crate) image_api_url: String,
    pub(crate) show_generator: bool,
    // Image textures
    pub(crate) http: reqwest::Client,
    pub(crate) image_textures: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) placeholder_textures: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) image_loading: Arc<Mutex<HashSet<String>>>,
    pub(crate) image_failed: Arc<Mutex<HashSet<String>>>,
    pub(crate) fetch_semaphore: Arc<tokio::sync::Semaphore>,
    pub(crate) cancel_token: CancellationToken,
    pub(crate) cache_dir: PathBuf,
    pub(crate) slides_dir: PathBuf,
    // Slide details documents
    pub(crate) content: ContentStore,
    pub(crate) details_url: Option<String>,
    // Presentation
    pub(crate) toasts: Toasts,
    pub(crate) show_qr_codes: bool,
    // Settings
    pub(crate) auto_advance_ms: u64,
    pub(crate) fullscreen: bool,
    pub(crate) slides_dir_setting: Option<String>,
    pub(crate) image_api_url_setting: Option<String>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let cache_dir = get_cache_dir();
        std::fs::create_dir_all(&cache_dir).ok();

        let controller =
            CarouselController::new(Carousel::default(), settings.auto_advance_period());

        info!(
            slides = controller.carousel().len(),
            period_ms = settings.auto_advance_period().as_millis() as u64,
            "Carousel ready"
        );

        Ok(Self {
            controller,
            focus: FocusSection::Carousel,
            runtime: tokio::runtime::Runtime::new()?,
            image_panel: ImagePanel::default(),
            image_api_url: settings.image_api_url_or_default(),
            show_generator: settings.show_generator,
            http: reqwest::Client::new(),
            image_textures: HashMap::new(),
            placeholder_textures: HashMap::new(),
            image_loading: Arc::new(Mutex::new(HashSet::new())),
            image_failed: Arc::new(Mutex::new(HashSet::new())),
            fetch_semaphore: Arc::new(tokio::sync::Semaphore::new(MAX_IMAGE_FETCHES)),
            cancel_token: CancellationToken::new(),
            cache_dir,
            slides_dir: settings.slides_dir_or_default(),
            content: ContentStore::new(),
            details_url: None,
            toasts: Toasts::default(),
            show_qr_codes: settings.show_qr_codes,
            auto_advance_ms: settings.auto_advance_ms,
            fullscreen: settings.fullscreen,
            slides_dir_setting: settings.slides_dir,
            image_api_url_setting: settings.image_api_url,
            window_pos: None,
            window_size: None,
            data_dir,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            fullscreen: self.fullscreen,
            auto_advance_ms: self.auto_advance_ms,
            show_qr_codes: self.show_qr_codes,
            slides_dir: self.slides_dir_setting.clone(),
            show_generator: self.show_generator,
            image_api_url: self.image_api_url_setting.clone(),
        };
        settings.save(&self.data_dir);
    }

    pub(crate) fn credential_input_id() -> egui::Id {
        egui::Id::new("credential_input")
    }

    /// The generator owns focus while its credential field does; the carousel otherwise
    pub(crate) fn current_focus(ctx: &egui::Context) -> FocusSection {
        if ctx.memory(|mem| mem.has_focus(Self::credential_input_id())) {
            FocusSection::Generator
        } else {
            FocusSection::Carousel
        }
    }

    /// Tear down everything tied to the session: timer, key listener, fetches, documents
    pub(crate) fn shutdown(&mut self) {
        self.controller.unmount();
        self.cancel_token.cancel();
        if !self.content.is_empty() {
            info!(documents = self.content.len(), "Revoking content URLs");
            self.content.revoke_all();
        }
        self.details_url = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::tests::key_input;

    fn details_button(ctx: &egui::Context, focus: bool) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.button("Details");
            if focus {
                response.request_focus();
            }
        });
    }

    #[test]
    fn enter_opens_details_without_focused_widget() {
        let ctx = egui::Context::default();
        let mut shortcuts = Shortcuts::default();
        let _ = ctx.run(key_input(egui::Key::Enter), |ctx| {
            shortcuts = Shortcuts::read(ctx);
            details_button(ctx, false);
        });
        assert!(shortcuts.details);
        assert!(!shortcuts.toggle_panel);
    }

    #[test]
    fn enter_on_focused_button_is_left_to_the_button() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| details_button(ctx, true));

        let mut shortcuts = Shortcuts::default();
        let _ = ctx.run(key_input(egui::Key::Enter), |ctx| {
            shortcuts = Shortcuts::read(ctx);
            details_button(ctx, true);
        });
        assert_eq!(shortcuts, Shortcuts::default());
    }
}
