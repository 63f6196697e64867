//! Theme constants for TV Carousel
//! Slate/indigo palette tuned for a dark living room and ten-foot viewing

use egui::Color32;
use egui::style::WidgetVisuals;

// =============================================================================
// COLORS - Surfaces
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x02, 0x06, 0x17); // slate-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a); // slate-900
pub const BG_INPUT: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b); // slate-800
const BG_HOVER: Color32 = Color32::from_rgb(0x33, 0x41, 0x55); // slate-700
const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 204);

// =============================================================================
// COLORS - Accent / text / status
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x63, 0x66, 0xf1); // indigo-500
const ACCENT_TEXT: Color32 = Color32::WHITE;
const LINK: Color32 = Color32::from_rgb(0x81, 0x8c, 0xf8); // indigo-400

pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0); // slate-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1); // slate-300
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b); // slate-500

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const BORDER_INPUT: Color32 = Color32::from_rgb(0x47, 0x55, 0x69); // slate-600

pub const STATUS_INFO: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8); // sky-400
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80); // green-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xfb, 0x71, 0x85); // rose-400

const BTN_DEFAULT: Color32 = Color32::from_rgba_premultiplied(0x1e, 0x29, 0x3b, 0xcc);
const BTN_DISABLED: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);

/// Accent used for placeholder art and the category label
pub fn category_color(category: &str) -> Color32 {
    match category {
        "Restaurant AI" => Color32::from_rgb(0x81, 0x8c, 0xf8),
        "Smart Home" => Color32::from_rgb(0x34, 0xd3, 0x99),
        "AI Automation" => Color32::from_rgb(0xc0, 0x84, 0xfc),
        "Voice Control" => Color32::from_rgb(0x2d, 0xd4, 0xbf),
        _ => TEXT_DIM,
    }
}

// =============================================================================
// TYPOGRAPHY
// =============================================================================
pub const FONT_SLIDE_TITLE: f32 = 60.0;
pub const FONT_SLIDE_BODY: f32 = 18.0;
pub const FONT_CATEGORY: f32 = 14.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 12.0;
pub const FONT_ICON_LARGE: f32 = 32.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const SLIDE_TEXT_MAX_WIDTH: f32 = 512.0;
pub const SLIDE_PADDING: f32 = 32.0;
pub const NAV_BUTTON_SIZE: f32 = 56.0;
pub const DOT_SIZE: f32 = 10.0;
pub const DOT_SIZE_ACTIVE: f32 = 14.0;
pub const QR_BADGE_SIZE: f32 = 150.0;
pub const GENERATOR_PANEL_WIDTH: f32 = 448.0;
pub const TOAST_WIDTH: f32 = 360.0;
pub const BUTTON_HEIGHT_LARGE: f32 = 36.0;

pub const RADIUS_MEDIUM: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 8.0;
pub const STROKE_DEFAULT: f32 = 1.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

fn widget(fill: Color32, border: Color32, text: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: if border == Color32::TRANSPARENT {
            egui::Stroke::NONE
        } else {
            egui::Stroke::new(STROKE_DEFAULT, border)
        },
        fg_stroke: egui::Stroke::new(STROKE_DEFAULT, text),
        corner_radius: RADIUS_MEDIUM.into(),
        expansion: 0.0,
    }
}

pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_INPUT;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.hyperlink_color = LINK;
    visuals.selection.bg_fill = with_alpha(ACCENT, 0.45);
    visuals.selection.stroke = egui::Stroke::new(STROKE_DEFAULT, ACCENT);
    visuals.widgets.noninteractive = widget(BG_ELEVATED, BORDER_SUBTLE, TEXT_PRIMARY);
    visuals.widgets.inactive = widget(BG_INPUT, BORDER_INPUT, TEXT_SECONDARY);
    visuals.widgets.hovered = widget(BG_HOVER, Color32::TRANSPARENT, TEXT_PRIMARY);
    visuals.widgets.active = widget(ACCENT, Color32::TRANSPARENT, ACCENT_TEXT);
    visuals.widgets.open = widget(BG_INPUT, BORDER_SUBTLE, TEXT_PRIMARY);
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(SPACING_LG, 6.0);
    });
}

/// Translucent black card used for floating overlays
pub fn overlay_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_OVERLAY)
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into()).fill(BTN_DEFAULT).corner_radius(RADIUS_MEDIUM)
}

/// Primary action button; greyed out while `enabled` is false
pub fn button_accent(text: impl Into<String>, enabled: bool) -> egui::Button<'static> {
    let (fill, color) = if enabled { (ACCENT, ACCENT_TEXT) } else { (BTN_DISABLED, TEXT_DIM) };
    egui::Button::new(egui::RichText::new(text.into()).color(color))
        .fill(fill)
        .corner_radius(RADIUS_MEDIUM)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT_LARGE))
}

/// Fill and rect for a hand-painted control: brighter on hover, pressed in on click
pub fn button_visual(response: &egui::Response, base_fill: Color32, rect: egui::Rect) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (mix_white(base_fill, 0.06), rect.shrink(1.5))
    } else if response.hovered() {
        (mix_white(base_fill, 0.15), rect)
    } else {
        (base_fill, rect)
    }
}

pub fn with_alpha(c: Color32, alpha: f32) -> Color32 {
    let a = (f32::from(c.a()) * alpha.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
}

fn mix_white(c: Color32, amount: f32) -> Color32 {
    let up = |v: u8| (f32::from(v) + (255.0 - f32::from(v)) * amount) as u8;
    Color32::from_rgba_unmultiplied(up(c.r()), up(c.g()), up(c.b()), c.a())
}
