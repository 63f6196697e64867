//! Slide art and QR badge loading

use super::App;
use crate::theme;
use crate::types::Slide;
use crate::utils::{is_remote, placeholder_svg, rasterize_svg};
use eframe::egui;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PLACEHOLDER_WIDTH: u32 = 960;

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

async fn download(client: &reqwest::Client, url: &str, dest: &Path) -> Result<(), FetchError> {
    let bytes = client.get(url).send().await?.error_for_status()?.bytes().await?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    // Write aside then rename so a half-written file is never decoded
    let partial = dest.with_extension("part");
    tokio::fs::write(&partial, &bytes).await?;
    tokio::fs::rename(&partial, dest).await?;
    Ok(())
}

fn decode_texture(ctx: &egui::Context, name: &str, path: &Path) -> Option<egui::TextureHandle> {
    let img = image::ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .decode()
        .map_err(|e| warn!(error = %e, path = %path.display(), "Failed to decode image"))
        .ok()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Some(ctx.load_texture(
        name,
        egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
        egui::TextureOptions::LINEAR,
    ))
}

impl App {
    fn remote_cache_path(&self, url: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        self.cache_dir.join("images").join(digest)
    }

    /// Texture for an image reference, or None while it loads or if it is unavailable.
    /// Remote images are fetched in the background at most once per session.
    pub fn load_image(&mut self, ctx: &egui::Context, reference: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.image_textures.get(reference) {
            return cached.clone();
        }

        let remote = is_remote(reference);
        let path = if remote {
            self.remote_cache_path(reference)
        } else {
            self.slides_dir.join(reference)
        };

        if path.exists() {
            let texture = decode_texture(ctx, reference, &path);
            self.image_textures.insert(reference.to_string(), texture.clone());
            return texture;
        }

        if !remote {
            debug!(path = %path.display(), "Slide art missing, using placeholder");
            self.image_textures.insert(reference.to_string(), None);
            return None;
        }

        if self.image_failed.lock().is_ok_and(|failed| failed.contains(reference)) {
            self.image_textures.insert(reference.to_string(), None);
            return None;
        }

        self.fetch_image(ctx, reference, path);
        None
    }

    fn fetch_image(&mut self, ctx: &egui::Context, url: &str, dest: PathBuf) {
        {
            let Ok(mut loading) = self.image_loading.lock() else {
                return;
            };
            if !loading.insert(url.to_string()) {
                return;
            }
        }

        let url = url.to_string();
        let client = self.http.clone();
        let sem = self.fetch_semaphore.clone();
        let token = self.cancel_token.clone();
        let loading = self.image_loading.clone();
        let failed = self.image_failed.clone();
        let ctx = ctx.clone();

        debug!(url = %url, "Fetching image");
        self.runtime.spawn(async move {
            let _permit = sem.acquire().await.ok();
            tokio::select! {
                _ = token.cancelled() => return,
                result = download(&client, &url, &dest) => {
                    if let Err(e) = result {
                        warn!(error = %e, url = %url, "Failed to fetch image");
                        if let Ok(mut failed) = failed.lock() {
                            failed.insert(url.clone());
                        }
                    }
                }
            }
            if let Ok(mut loading) = loading.lock() {
                loading.remove(&url);
            }
            ctx.request_repaint();
        });
    }

    /// Gradient stand-in tinted by the slide category
    pub fn placeholder_texture(&mut self, ctx: &egui::Context, category: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.placeholder_textures.get(category) {
            return cached.clone();
        }
        let c = theme::category_color(category);
        let texture = rasterize_svg(&placeholder_svg([c.r(), c.g(), c.b()]), PLACEHOLDER_WIDTH).map(
            |(pixels, w, h)| {
                ctx.load_texture(
                    format!("placeholder_{category}"),
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                    egui::TextureOptions::LINEAR,
                )
            },
        );
        self.placeholder_textures.insert(category.to_string(), texture.clone());
        texture
    }

    pub fn slide_texture(&mut self, ctx: &egui::Context, slide: &Slide) -> Option<egui::TextureHandle> {
        self.load_image(ctx, &slide.image)
            .or_else(|| self.placeholder_texture(ctx, &slide.category))
    }

    /// Start loading every slide's art so navigation never waits on the network
    pub fn prefetch_slide_images(&mut self, ctx: &egui::Context) {
        let references: Vec<String> = self
            .controller
            .carousel()
            .slides()
            .iter()
            .map(|s| s.image.clone())
            .collect();
        debug!(count = references.len(), "Prefetching slide art");
        for reference in references {
            self.load_image(ctx, &reference);
        }
    }
}
