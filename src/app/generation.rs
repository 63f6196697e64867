//! Image generation glue between the panel state and the background runtime

use super::App;
use crate::constants::MOCK_GENERATION_ENV;
use crate::generator::{ImageGenerator, MockImageGenerator, RunwareClient};
use eframe::egui;
use std::sync::Arc;
use tracing::{debug, info};

impl App {
    pub fn start_image_generation(&mut self, ctx: &egui::Context) {
        let job = match self.image_panel.start_generation() {
            Ok(job) => job,
            Err(e) => {
                debug!(error = %e, "Image generation not started");
                return;
            }
        };

        let generator: Arc<dyn ImageGenerator> = if std::env::var(MOCK_GENERATION_ENV).is_ok() {
            debug!("Mock image generation enabled");
            Arc::new(MockImageGenerator)
        } else {
            Arc::new(RunwareClient::new(job.credential(), self.image_api_url.clone()))
        };

        info!(endpoint = %self.image_api_url, "Starting image generation");
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let _ = job.run(generator.as_ref()).await;
            ctx.request_repaint();
        });
    }

    /// Move queued notices into toasts and apply a finished image set
    pub fn poll_generation(&mut self) {
        for notice in self.image_panel.take_notices() {
            self.toasts.push(notice);
        }

        if let Some(urls) = self.image_panel.take_completed() {
            info!(count = urls.len(), "Applying generated slide art");
            self.controller.carousel_mut().set_custom_images(Some(&urls));
        }
    }
}
