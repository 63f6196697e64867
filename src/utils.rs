//! Utility functions

use crate::constants::{QR_SERVICE_URL, QR_SIZE};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::PathBuf;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, matching `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// Square viewBox - for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 256 256"><rect x="16" y="40" width="224" height="144" rx="18" fill="#18181b" stroke="#2dd4bf" stroke-width="12"/><path d="M112 84 L160 112 L112 140 Z" fill="#2dd4bf"/><rect x="88" y="200" width="80" height="14" rx="7" fill="#fff"/></svg>"##;

/// Build the QR image URL for `text`. The service renders the code; nothing is fetched here.
pub fn generate_qr_code(text: &str) -> String {
    format!(
        "{}?size={}&data={}",
        QR_SERVICE_URL,
        QR_SIZE,
        utf8_percent_encode(text, URI_COMPONENT)
    )
}

/// Gradient placeholder art for a slide whose image is missing
pub fn placeholder_svg(accent: [u8; 3]) -> String {
    let [r, g, b] = accent;
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1920 1080"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#09090b"/><stop offset="1" stop-color="rgb({r},{g},{b})"/></linearGradient></defs><rect width="1920" height="1080" fill="url(#g)"/><circle cx="1480" cy="380" r="260" fill="rgb({r},{g},{b})" fill-opacity="0.25"/><circle cx="1620" cy="720" r="140" fill="rgb({r},{g},{b})" fill-opacity="0.18"/></svg>"##
    )
}

/// Rasterize an SVG at the given width, preserving aspect ratio.
/// Returns straight-alpha RGBA pixels with their dimensions.
pub fn rasterize_svg(svg: &str, width: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(svg, &resvg::usvg::Options::default()).ok()?;
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), width, height))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("TV Carousel")
}

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    get_data_dir().join("cache")
}

pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_url_for_plain_text() {
        assert_eq!(
            generate_qr_code("hello world"),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=hello%20world"
        );
    }

    #[test]
    fn qr_url_for_empty_text() {
        assert_eq!(
            generate_qr_code(""),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data="
        );
    }

    #[test]
    fn qr_url_escapes_query_delimiters() {
        let url = generate_qr_code("https://a.example/x?y=1&z=2#top");
        let data = url.split_once("&data=").unwrap().1;
        assert!(!data.contains(['&', '?', '=', '#', '/', ':']));
        assert_eq!(
            percent_encoding::percent_decode_str(data).decode_utf8().unwrap(),
            "https://a.example/x?y=1&z=2#top"
        );
    }

    #[test]
    fn qr_url_keeps_uri_component_marks() {
        assert_eq!(
            generate_qr_code("Hi! (it's *great*) ~_-."),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=Hi!%20(it's%20*great*)%20~_-."
        );
    }

    #[test]
    fn qr_url_encodes_unicode() {
        assert!(generate_qr_code("café").ends_with("data=caf%C3%A9"));
    }

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://im.runware.ai/a.png"));
        assert!(!is_remote("slides/home-assistant.png"));
    }

    #[test]
    fn icon_rasterizes_square() {
        let (pixels, w, h) = rasterize_svg(ICON_SVG, 64).unwrap();
        assert_eq!((w, h), (64, 64));
        assert_eq!(pixels.len(), 64 * 64 * 4);
    }

    #[test]
    fn placeholder_keeps_tv_aspect() {
        let (_, w, h) = rasterize_svg(&placeholder_svg([0x2d, 0xd4, 0xbf]), 480).unwrap();
        assert_eq!((w, h), (480, 270));
    }
}
