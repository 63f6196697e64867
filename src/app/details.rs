//! Slide details document, opened in the system browser

use super::App;
use crate::types::{Notice, Slide};
use crate::utils::is_remote;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::{info, warn};

/// HTML fragment describing one slide
pub(crate) fn slide_fragment(slide: &Slide) -> String {
    let mut html = format!(
        "<p><small>{}</small></p>\n<h1>{}</h1>\n<p>{}</p>",
        encode_text(&slide.category.to_uppercase()),
        encode_text(&slide.title),
        encode_text(&slide.description),
    );
    if is_remote(&slide.image) {
        html.push_str(&format!(
            "\n<img src=\"{}\" alt=\"{}\" style=\"max-width: 100%; border-radius: 8px;\">",
            encode_double_quoted_attribute(&slide.image),
            encode_double_quoted_attribute(&slide.title),
        ));
    }
    html
}

impl App {
    pub fn open_slide_details(&mut self) {
        let slide = self.controller.carousel().current().clone();

        // Only one details document is alive at a time
        if let Some(previous) = self.details_url.take() {
            self.content.revoke(&previous);
        }

        let url = self.content.generate_content_url(&slide_fragment(&slide));
        let opened = self
            .content
            .export(&url, &self.cache_dir.join("content"))
            .and_then(|path| open::that(&path).map(|_| path));
        match opened {
            Ok(path) => info!(slide = slide.id, path = %path.display(), "Opened slide details"),
            Err(e) => {
                warn!(error = %e, slide = slide.id, "Failed to open slide details");
                self.toasts.push(Notice::error("Could not open slide details"));
            }
        }
        self.details_url = Some(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{default_slides, slides_with_overrides};

    #[test]
    fn fragment_escapes_text() {
        let mut slide = default_slides().remove(0);
        slide.title = "Fish & <Chips>".into();
        let html = slide_fragment(&slide);
        assert!(html.contains("<h1>Fish &amp; &lt;Chips&gt;</h1>"));
        assert!(html.contains("RESTAURANT AI"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn fragment_embeds_remote_art() {
        let urls: Vec<String> = (0..4).map(|i| format!("https://im.example/{i}.png?a=1&b=\"2\"")).collect();
        let slide = slides_with_overrides(Some(&urls)).remove(1);
        let html = slide_fragment(&slide);
        assert!(html.contains("<img src=\"https://im.example/1.png?a=1&amp;b=&quot;2&quot;\""));
    }
}
