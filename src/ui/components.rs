//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

/// UV rect that crops a texture to fill `target` without distortion (CSS `object-fit: cover`)
pub fn cover_uv(texture_size: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    }
    let tex_aspect = texture_size.x / texture_size.y;
    let target_aspect = target.x / target.y;
    if tex_aspect > target_aspect {
        // Wider than the target: trim the sides
        let visible = target_aspect / tex_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let visible = tex_aspect / target_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, inset), egui::pos2(1.0, 1.0 - inset))
    }
}

/// Paint a left-to-right gradient through the given (position 0..1, color) stops
pub fn horizontal_gradient(painter: &egui::Painter, rect: egui::Rect, stops: &[(f32, egui::Color32)]) {
    let mut mesh = egui::Mesh::default();
    for (i, &(t, color)) in stops.iter().enumerate() {
        let x = egui::lerp(rect.left()..=rect.right(), t);
        mesh.colored_vertex(egui::pos2(x, rect.top()), color);
        mesh.colored_vertex(egui::pos2(x, rect.bottom()), color);
        if i > 0 {
            let base = (i as u32 - 1) * 2;
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 2, base + 3);
        }
    }
    painter.add(egui::Shape::mesh(mesh));
}

/// Round translucent arrow button. Returns the click response.
pub fn nav_button(ui: &mut egui::Ui, center: egui::Pos2, icon: &str, id: &str) -> egui::Response {
    let rect = egui::Rect::from_center_size(center, egui::Vec2::splat(theme::NAV_BUTTON_SIZE));
    let response = ui.interact(rect, ui.id().with(id), egui::Sense::click());
    let (fill, draw_rect) = theme::button_visual(
        &response,
        egui::Color32::from_rgba_unmultiplied(0x18, 0x18, 0x1b, 170),
        rect,
    );
    let painter = ui.painter();
    painter.circle(
        draw_rect.center(),
        draw_rect.width() / 2.0,
        fill,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
    );
    painter.text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(theme::FONT_ICON_LARGE * 0.8),
        theme::TEXT_PRIMARY,
    );
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Row of slide indicator dots centred on `center`. Returns the clicked index.
pub fn indicator_dots(ui: &mut egui::Ui, center: egui::Pos2, count: usize, selected: usize) -> Option<usize> {
    let spacing = theme::DOT_SIZE_ACTIVE + theme::SPACING_MD;
    let width = spacing * count.saturating_sub(1) as f32;
    let mut clicked = None;
    for i in 0..count {
        let pos = egui::pos2(center.x - width / 2.0 + spacing * i as f32, center.y);
        let hit = egui::Rect::from_center_size(pos, egui::Vec2::splat(theme::DOT_SIZE_ACTIVE + 4.0));
        let response = ui.interact(hit, ui.id().with(("dot", i)), egui::Sense::click());
        let (radius, color) = if i == selected {
            (theme::DOT_SIZE_ACTIVE / 2.0, theme::ACCENT)
        } else if response.hovered() {
            (theme::DOT_SIZE / 2.0, theme::TEXT_SECONDARY)
        } else {
            (theme::DOT_SIZE / 2.0, theme::with_alpha(theme::TEXT_PRIMARY, 0.45))
        };
        ui.painter().circle_filled(pos, radius, color);
        if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
            clicked = Some(i);
        }
    }
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_trims_wide_texture_sides() {
        let uv = cover_uv(egui::vec2(2000.0, 500.0), egui::vec2(1000.0, 500.0));
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!((uv.min.y, uv.max.y), (0.0, 1.0));
    }

    #[test]
    fn cover_trims_tall_texture_top_and_bottom() {
        let uv = cover_uv(egui::vec2(1000.0, 1000.0), egui::vec2(1000.0, 500.0));
        assert!((uv.min.y - 0.25).abs() < 1e-6);
        assert!((uv.max.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn cover_matching_aspect_is_identity() {
        let uv = cover_uv(egui::vec2(1920.0, 1080.0), egui::vec2(960.0, 540.0));
        assert!((uv.min.x).abs() < 1e-6 && (uv.max.x - 1.0).abs() < 1e-6);
        assert!((uv.min.y).abs() < 1e-6 && (uv.max.y - 1.0).abs() < 1e-6);
    }
}
