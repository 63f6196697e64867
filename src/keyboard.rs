//! Arrow-key navigation, gated on which section owns keyboard focus

use crate::types::{FocusSection, NavIntent};
use eframe::egui;

/// Read-only view of the focus indicator. The shell owns the value; the bridge only reads it.
pub trait FocusProvider {
    fn current_section(&self) -> FocusSection;
}

impl FocusProvider for FocusSection {
    fn current_section(&self) -> FocusSection {
        *self
    }
}

#[derive(Debug, Default)]
pub struct KeyboardBridge {
    attached: bool,
}

impl KeyboardBridge {
    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn translate(&self, key: egui::Key, focus: &impl FocusProvider) -> Option<NavIntent> {
        if !self.attached || focus.current_section() != FocusSection::Carousel {
            return None;
        }
        match key {
            egui::Key::ArrowLeft => Some(NavIntent::Previous),
            egui::Key::ArrowRight => Some(NavIntent::Next),
            _ => None,
        }
    }

    /// Consume a handled arrow key from this frame's input. Keys are left in place when the
    /// carousel is not focused, so the focused widget still receives them.
    pub fn poll(&self, ctx: &egui::Context, focus: &impl FocusProvider) -> Option<NavIntent> {
        for key in [egui::Key::ArrowLeft, egui::Key::ArrowRight] {
            let Some(intent) = self.translate(key, focus) else {
                continue;
            };
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, key)) {
                return Some(intent);
            }
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn key_input(key: egui::Key) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    fn attached() -> KeyboardBridge {
        let mut bridge = KeyboardBridge::default();
        bridge.attach();
        bridge
    }

    #[test]
    fn arrows_map_to_intents() {
        let bridge = attached();
        let focus = FocusSection::Carousel;
        assert_eq!(bridge.translate(egui::Key::ArrowLeft, &focus), Some(NavIntent::Previous));
        assert_eq!(bridge.translate(egui::Key::ArrowRight, &focus), Some(NavIntent::Next));
        assert_eq!(bridge.translate(egui::Key::ArrowUp, &focus), None);
    }

    #[test]
    fn ignored_when_other_section_focused() {
        let bridge = attached();
        assert_eq!(bridge.translate(egui::Key::ArrowRight, &FocusSection::Generator), None);
    }

    #[test]
    fn ignored_when_detached() {
        let mut bridge = attached();
        assert!(bridge.is_attached());
        bridge.detach();
        assert!(!bridge.is_attached());
        assert_eq!(bridge.translate(egui::Key::ArrowRight, &FocusSection::Carousel), None);
    }

    #[test]
    fn poll_consumes_handled_key() {
        let bridge = attached();
        let ctx = egui::Context::default();
        let mut intent = None;
        let mut still_pressed = true;
        let _ = ctx.run(key_input(egui::Key::ArrowLeft), |ctx| {
            intent = bridge.poll(ctx, &FocusSection::Carousel);
            still_pressed = ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft));
        });
        assert_eq!(intent, Some(NavIntent::Previous));
        assert!(!still_pressed);
    }

    #[test]
    fn poll_leaves_key_for_focused_widget() {
        let bridge = attached();
        let ctx = egui::Context::default();
        let mut intent = None;
        let mut still_pressed = false;
        let _ = ctx.run(key_input(egui::Key::ArrowRight), |ctx| {
            intent = bridge.poll(ctx, &FocusSection::Generator);
            still_pressed = ctx.input(|i| i.key_pressed(egui::Key::ArrowRight));
        });
        assert_eq!(intent, None);
        assert!(still_pressed);
    }
}
