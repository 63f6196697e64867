//! Carousel view rendering (slide art, overlay text, controls, QR badge)

use super::App;
use crate::theme;
use crate::types::{NavIntent, Slide};
use crate::ui::components::{cover_uv, horizontal_gradient, indicator_dots, nav_button};
use crate::utils::{generate_qr_code, is_remote};
use eframe::egui;

/// What the user asked for while the carousel was drawn
#[derive(Default)]
pub(crate) struct CarouselActions {
    pub navigate: Option<NavIntent>,
    pub open_details: bool,
}

/// Text encoded in a slide's QR badge: its remote art if any, the title otherwise
pub(crate) fn qr_payload(slide: &Slide) -> &str {
    if is_remote(&slide.image) {
        &slide.image
    } else {
        &slide.title
    }
}

impl App {
    pub(crate) fn render_carousel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) -> CarouselActions {
        let mut actions = CarouselActions::default();
        let rect = ui.max_rect();
        let slide = self.controller.carousel().current().clone();
        let selected = self.controller.carousel().selected();
        let count = self.controller.carousel().len();

        // Background art
        match self.slide_texture(ctx, &slide) {
            Some(texture) => {
                let uv = cover_uv(texture.size_vec2(), rect.size());
                ui.painter().image(texture.id(), rect, uv, egui::Color32::WHITE);
            }
            None => {
                ui.painter().rect_filled(rect, 0.0, theme::BG_ELEVATED);
            }
        }

        // Gradient overlay so the copy stays readable on any art
        horizontal_gradient(
            ui.painter(),
            rect,
            &[
                (0.0, egui::Color32::from_black_alpha(204)),
                (0.5, egui::Color32::from_black_alpha(102)),
                (1.0, egui::Color32::TRANSPARENT),
            ],
        );

        self.paint_slide_text(ui, rect, &slide);

        // Controls
        let mid_y = rect.center().y;
        let inset = theme::SLIDE_PADDING + theme::NAV_BUTTON_SIZE / 2.0;
        if nav_button(ui, egui::pos2(rect.left() + inset, mid_y), egui_phosphor::regular::CARET_LEFT, "carousel_prev")
            .clicked()
        {
            actions.navigate = Some(NavIntent::Previous);
        }
        if nav_button(ui, egui::pos2(rect.right() - inset, mid_y), egui_phosphor::regular::CARET_RIGHT, "carousel_next")
            .clicked()
        {
            actions.navigate = Some(NavIntent::Next);
        }
        let dots_center = egui::pos2(rect.center().x, rect.bottom() - theme::SLIDE_PADDING / 2.0);
        if let Some(index) = indicator_dots(ui, dots_center, count, selected) {
            actions.navigate = Some(NavIntent::GoTo(index));
        }

        if self.show_qr_codes {
            actions.open_details |= self.render_qr_badge(ui, ctx, rect, &slide);
        }

        actions
    }

    fn paint_slide_text(&self, ui: &egui::Ui, rect: egui::Rect, slide: &Slide) {
        let painter = ui.painter();
        let wrap = theme::SLIDE_TEXT_MAX_WIDTH;
        let left = rect.left() + theme::SLIDE_PADDING;

        let description = painter.layout(
            slide.description.clone(),
            egui::FontId::proportional(theme::FONT_SLIDE_BODY),
            theme::TEXT_MUTED,
            wrap,
        );
        let title = painter.layout(
            slide.title.clone(),
            egui::FontId::proportional(theme::FONT_SLIDE_TITLE),
            theme::TEXT_PRIMARY,
            wrap,
        );
        let category = painter.layout_no_wrap(
            slide.category.to_uppercase(),
            egui::FontId::proportional(theme::FONT_CATEGORY),
            theme::TEXT_MUTED,
        );

        // Stack upwards from the bottom-left corner
        let mut y = rect.bottom() - theme::SLIDE_PADDING * 1.5 - description.size().y;
        painter.galley(egui::pos2(left, y), description, theme::TEXT_MUTED);
        y -= theme::SPACING_XL + title.size().y;
        painter.galley(egui::pos2(left, y), title, theme::TEXT_PRIMARY);
        y -= theme::SPACING_MD + category.size().y;
        painter.galley(egui::pos2(left, y), category, theme::TEXT_MUTED);
    }

    /// QR badge in the bottom-right corner. Returns true if "Details" was clicked.
    fn render_qr_badge(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, rect: egui::Rect, slide: &Slide) -> bool {
        let qr_url = generate_qr_code(qr_payload(slide));
        let size = theme::QR_BADGE_SIZE;
        let pad = theme::SPACING_MD;
        let badge = egui::Rect::from_min_size(
            egui::pos2(
                rect.right() - theme::SLIDE_PADDING - size - pad * 2.0,
                rect.bottom() - theme::SLIDE_PADDING * 1.5 - size - pad * 2.0,
            ),
            egui::vec2(size + pad * 2.0, size + pad * 2.0),
        );

        let painter = ui.painter();
        painter.rect_filled(badge, theme::RADIUS_LARGE, egui::Color32::WHITE);
        let inner = badge.shrink(pad);
        match self.load_image(ctx, &qr_url) {
            Some(texture) => {
                ui.painter().image(
                    texture.id(),
                    inner,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                ui.painter().text(
                    inner.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::QR_CODE,
                    egui::FontId::proportional(theme::FONT_ICON_LARGE * 2.0),
                    theme::TEXT_DIM,
                );
            }
        }

        let button_rect = egui::Rect::from_min_size(
            egui::pos2(badge.left(), badge.bottom() + theme::SPACING_SM),
            egui::vec2(badge.width(), theme::BUTTON_HEIGHT_LARGE),
        );
        ui.put(
            button_rect,
            theme::button(format!("{}  Details", egui_phosphor::regular::ARTICLE)),
        )
        .clicked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{default_slides, slides_with_overrides};

    #[test]
    fn qr_encodes_title_for_local_art() {
        let slide = default_slides().remove(1);
        assert_eq!(qr_payload(&slide), "Home Assistant Control");
    }

    #[test]
    fn qr_encodes_generated_art_url() {
        let urls: Vec<String> = (0..4).map(|i| format!("https://im.example/{i}.png")).collect();
        let slide = slides_with_overrides(Some(&urls)).remove(0);
        assert_eq!(qr_payload(&slide), "https://im.example/0.png");
    }
}
