//! Image generator overlay (top-right)

use super::App;
use crate::constants::RUNWARE_SIGNUP_URL;
use crate::theme;
use eframe::egui;

impl App {
    pub(crate) fn render_generator_panel(&mut self, ctx: &egui::Context) {
        let mut generate = false;

        egui::Area::new(egui::Id::new("generator_panel"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-theme::SPACING_XL, theme::SPACING_XL))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                theme::overlay_frame().show(ui, |ui| {
                    ui.set_max_width(theme::GENERATOR_PANEL_WIDTH);
                    ui.label(
                        egui::RichText::new("Generate Carousel Images")
                            .size(theme::FONT_HEADING)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.add_space(theme::SPACING_SM);
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing.x = 0.0;
                        ui.label(
                            egui::RichText::new(
                                "Enter your Runware API key to generate professional illustrations for the carousel. Get your API key from ",
                            )
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_MUTED),
                        );
                        ui.hyperlink_to(
                            egui::RichText::new("runware.ai").size(theme::FONT_SMALL).underline(),
                            RUNWARE_SIGNUP_URL,
                        );
                    });
                    ui.add_space(theme::SPACING_LG);

                    let busy = self.image_panel.is_busy();
                    let mut credential = self.image_panel.credential().to_string();
                    let input = ui.add_enabled(
                        !busy,
                        egui::TextEdit::singleline(&mut credential)
                            .id(Self::credential_input_id())
                            .password(true)
                            .hint_text("Enter Runware API Key")
                            .desired_width(f32::INFINITY)
                            .font(egui::FontId::proportional(theme::FONT_BODY))
                            .margin(egui::Margin::same(8)),
                    );
                    if input.changed() {
                        self.image_panel.set_credential(credential);
                    }
                    ui.add_space(theme::SPACING_LG);

                    let enabled = !busy && self.image_panel.has_credential();
                    let label = if busy { "Generating Images..." } else { "Generate Images" };
                    let response = ui.add_enabled(
                        enabled,
                        theme::button_accent(label, enabled).min_size(egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT_LARGE)),
                    );
                    if response.clicked() {
                        generate = true;
                    }
                });
            });

        if generate {
            self.start_image_generation(ctx);
        }
    }
}
