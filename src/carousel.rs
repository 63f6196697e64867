//! Slide definitions and the circular carousel primitive

use crate::types::Slide;

const DEFAULT_SLIDES: [(&str, &str, &str, &str); 4] = [
    (
        "Smart Restaurant Ordering",
        "Experience seamless dining with Atlas AI. Simply speak your order naturally and let our intelligent assistant handle menu recommendations, dietary preferences, and complete order processing with restaurant systems.",
        "slides/restaurant-ordering.png",
        "Restaurant AI",
    ),
    (
        "Home Assistant Control",
        "Transform your smart home experience with Atlas. Control lights, temperature, security systems, and entertainment devices through natural conversation. Your home responds intelligently to your voice commands.",
        "slides/home-assistant.png",
        "Smart Home",
    ),
    (
        "Intelligent Function Calling",
        "Atlas leverages advanced Gemini AI to understand context and execute complex multi-step tasks. From booking appointments to managing calendars, experience the future of AI-powered automation.",
        "slides/function-calling.png",
        "AI Automation",
    ),
    (
        "Voice-Powered Navigation",
        "Navigate through applications effortlessly with Atlas voice control. Switch between apps, search content, and control your entertainment system using natural speech recognition technology.",
        "slides/voice-navigation.png",
        "Voice Control",
    ),
];

pub const SLIDE_COUNT: usize = DEFAULT_SLIDES.len();

/// The four fixed slides with their bundled art
pub fn default_slides() -> Vec<Slide> {
    DEFAULT_SLIDES
        .iter()
        .enumerate()
        .map(|(i, (title, description, image, category))| Slide {
            id: i as u32 + 1,
            title: title.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            category: category.to_string(),
        })
        .collect()
}

/// Default slides with their art replaced positionally. Any list that is not exactly
/// one URL per slide leaves every slide on its default art.
pub fn slides_with_overrides(custom: Option<&[String]>) -> Vec<Slide> {
    let mut slides = default_slides();
    if let Some(urls) = custom.filter(|urls| urls.len() == SLIDE_COUNT) {
        for (slide, url) in slides.iter_mut().zip(urls) {
            slide.image = url.clone();
        }
    }
    slides
}

/// Horizontally navigable strip of slides. Navigation wraps in both directions.
#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<Slide>,
    selected: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Carousel {
    pub fn new(custom: Option<&[String]>) -> Self {
        Self { slides: slides_with_overrides(custom), selected: 0 }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> &Slide {
        &self.slides[self.selected]
    }

    pub fn scroll_next(&mut self) {
        self.selected = (self.selected + 1) % self.slides.len();
    }

    pub fn scroll_prev(&mut self) {
        self.selected = (self.selected + self.slides.len() - 1) % self.slides.len();
    }

    /// Returns false if `index` is out of range
    pub fn scroll_to(&mut self, index: usize) -> bool {
        if index < self.slides.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn set_custom_images(&mut self, custom: Option<&[String]>) {
        self.slides = slides_with_overrides(custom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://im.example/{i}.png")).collect()
    }

    #[test]
    fn four_overrides_replace_art_positionally() {
        let custom = urls(4);
        let slides = slides_with_overrides(Some(&custom));
        for (slide, url) in slides.iter().zip(&custom) {
            assert_eq!(&slide.image, url);
        }
        // Only the art changes
        let defaults = default_slides();
        assert_eq!(slides[2].title, defaults[2].title);
        assert_eq!(slides[2].category, defaults[2].category);
    }

    #[test]
    fn other_lengths_keep_defaults() {
        let defaults = default_slides();
        for n in [0, 1, 3, 5, 8] {
            let custom = urls(n);
            assert_eq!(slides_with_overrides(Some(&custom)), defaults, "length {n}");
        }
        assert_eq!(slides_with_overrides(None), defaults);
    }

    #[test]
    fn next_wraps_to_first() {
        let mut carousel = Carousel::default();
        for _ in 0..SLIDE_COUNT - 1 {
            carousel.scroll_next();
        }
        assert_eq!(carousel.selected(), SLIDE_COUNT - 1);
        carousel.scroll_next();
        assert_eq!(carousel.selected(), 0);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut carousel = Carousel::default();
        carousel.scroll_prev();
        assert_eq!(carousel.selected(), SLIDE_COUNT - 1);
        carousel.scroll_prev();
        assert_eq!(carousel.selected(), SLIDE_COUNT - 2);
    }

    #[test]
    fn full_cycle_returns_home() {
        let mut carousel = Carousel::default();
        for _ in 0..SLIDE_COUNT * 3 {
            carousel.scroll_next();
        }
        assert_eq!(carousel.selected(), 0);
    }

    #[test]
    fn scroll_to_ignores_out_of_range() {
        let mut carousel = Carousel::default();
        assert!(carousel.scroll_to(2));
        assert!(!carousel.scroll_to(SLIDE_COUNT));
        assert_eq!(carousel.selected(), 2);
        assert_eq!(carousel.current().title, "Intelligent Function Calling");
    }

    #[test]
    fn overrides_keep_selection() {
        let mut carousel = Carousel::default();
        carousel.scroll_to(3);
        let custom = urls(4);
        carousel.set_custom_images(Some(&custom));
        assert_eq!(carousel.selected(), 3);
        assert_eq!(carousel.current().image, custom[3]);
    }
}
