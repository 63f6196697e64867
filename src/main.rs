#![windows_subsystem = "windows"]
//! TV Carousel - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod carousel;
mod constants;
mod content;
mod controller;
mod generator;
mod keyboard;
mod settings;
mod theme;
mod timer;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use std::time::Duration;
use tracing::{debug, info, warn};
use utils::{get_data_dir, rasterize_svg, ICON_SVG};

/// Repaint cadence while a generation job is posting progress
const BUSY_REPAINT: Duration = Duration::from_millis(250);

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "tv-carousel.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tv_carousel=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "TV Carousel starting");

    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(IMAGE_WIDTH as f32, IMAGE_HEIGHT as f32)))
        .with_min_inner_size([960.0, 540.0])
        .with_fullscreen(settings.fullscreen)
        .with_title(APP_NAME);

    // Set window/taskbar icon from the logo SVG
    match rasterize_svg(ICON_SVG, 256) {
        Some((rgba, width, height)) => {
            let icon = egui::IconData { rgba, width, height };
            viewport = viewport.with_icon(std::sync::Arc::new(icon));
        }
        None => warn!("Failed to rasterize window icon"),
    }

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, settings, data_dir)?))),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Mount the carousel on first frame
        if !self.controller.is_mounted() {
            self.controller.mount();
            self.prefetch_slide_images(ctx);
        }

        self.poll_generation();

        // Keyboard bridge reads the focus indicator; the shell is its only writer
        self.focus = Self::current_focus(ctx);
        self.controller.poll_keyboard(ctx, &self.focus);

        let shortcuts = if self.focus == crate::types::FocusSection::Carousel {
            app::Shortcuts::read(ctx)
        } else {
            app::Shortcuts::default()
        };
        if shortcuts.toggle_panel {
            self.show_generator = !self.show_generator;
            debug!(visible = self.show_generator, "Generator panel toggled");
        }
        if shortcuts.toggle_fullscreen {
            self.fullscreen = !self.fullscreen;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
        }

        if self.controller.tick() {
            debug!(slide = self.controller.carousel().selected(), "Auto-advanced");
        }

        let actions = egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| self.render_carousel(ui, ctx))
            .inner;

        if let Some(intent) = actions.navigate {
            self.controller.navigate(intent);
        }
        // One request per frame, whether it came from the button or the Enter key
        if actions.open_details || shortcuts.details {
            self.open_slide_details();
        }

        if self.show_generator {
            self.render_generator_panel(ctx);
        }

        self.toasts.show(ctx);

        if let Some(wait) = self.controller.time_until_next() {
            ctx.request_repaint_after(wait);
        }
        if self.image_panel.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.shutdown();
        self.save_settings();
    }
}
