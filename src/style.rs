use egui::{Color32, Context, Stroke, Style, Visuals};

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    // Roomy spacing for a small, calm utility window
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(12);

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.0, Color32::TRANSPARENT);
    visuals.widgets.hovered.bg_fill = Color32::from_gray(240);
    visuals.widgets.active.bg_fill = Color32::from_gray(230);

    visuals.selection.bg_fill = Color32::from_rgb(255, 214, 200);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(120, 90, 80));

    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_spacing_and_light_visuals() {
        let ctx = Context::default();
        configure_style(&ctx);

        let style = ctx.style();
        assert_eq!(style.spacing.window_margin, egui::Margin::same(12));
        assert_eq!(style.spacing.item_spacing, egui::vec2(8.0, 8.0));
        assert!(!style.visuals.dark_mode);
        assert_eq!(style.visuals.window_shadow, egui::epaint::Shadow::NONE);
    }
}
