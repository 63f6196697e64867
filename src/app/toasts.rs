//! Toast notifications (bottom-right stack, 3s visible then fade, pause on hover)

use crate::theme;
use crate::types::{Notice, NoticeKind};
use eframe::egui;
use std::time::Instant;

const VISIBLE_SECS: f32 = 3.0;
const FADE_SECS: f32 = 0.5;
const MAX_TOASTS: usize = 5;

struct Toast {
    notice: Notice,
    start: Instant,
}

#[derive(Default)]
pub(crate) struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, notice: Notice) {
        if self.items.len() == MAX_TOASTS {
            self.items.remove(0);
        }
        self.items.push(Toast { notice, start: Instant::now() });
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if self.items.is_empty() {
            return;
        }

        let total = VISIBLE_SECS + FADE_SECS;
        let margin = theme::SPACING_XL;
        let screen = ctx.screen_rect();

        let mut hovered = Vec::new();
        egui::Area::new(egui::Id::new("toasts"))
            .fixed_pos(egui::pos2(screen.right() - margin, screen.bottom() - margin))
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .interactable(true)
            .show(ctx, |ui| {
                ui.set_width(theme::TOAST_WIDTH);
                for (i, toast) in self.items.iter().enumerate() {
                    let elapsed = toast.start.elapsed().as_secs_f32();
                    let alpha = if elapsed > VISIBLE_SECS {
                        ((total - elapsed) / FADE_SECS).clamp(0.0, 1.0)
                    } else {
                        1.0
                    };
                    let (icon, color) = match toast.notice.kind {
                        NoticeKind::Info => (egui_phosphor::regular::INFO, theme::STATUS_INFO),
                        NoticeKind::Success => (egui_phosphor::regular::CHECK_CIRCLE, theme::STATUS_SUCCESS),
                        NoticeKind::Error => (egui_phosphor::regular::WARNING_CIRCLE, theme::STATUS_ERROR),
                    };

                    let response = egui::Frame::new()
                        .fill(egui::Color32::from_rgba_unmultiplied(0x1a, 0x1a, 0x1e, (230.0 * alpha) as u8))
                        .stroke(egui::Stroke::new(1.0, theme::with_alpha(color, 0.4 * alpha)))
                        .corner_radius(theme::RADIUS_MEDIUM)
                        .inner_margin(egui::Margin::symmetric(16, 10))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal_wrapped(|ui| {
                                ui.label(egui::RichText::new(icon).color(theme::with_alpha(color, alpha)));
                                ui.label(
                                    egui::RichText::new(&toast.notice.message)
                                        .color(theme::with_alpha(theme::TEXT_PRIMARY, alpha)),
                                );
                            });
                        })
                        .response;
                    if response.hovered() {
                        hovered.push(i);
                    }
                }
            });

        // Pause timer while hovering
        for i in hovered {
            self.items[i].start = Instant::now();
        }

        self.items.retain(|t| t.start.elapsed().as_secs_f32() < total);
        if !self.items.is_empty() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_toast_dropped_when_full() {
        let mut toasts = Toasts::default();
        for i in 0..MAX_TOASTS + 2 {
            toasts.push(Notice::info(format!("n{i}")));
        }
        assert_eq!(toasts.items.len(), MAX_TOASTS);
        assert_eq!(toasts.items[0].notice.message, "n2");
    }
}
