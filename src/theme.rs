//! Figure theme: light paper-like background so rank colors read as on a
//! printed plot, shared by the raster output and the viewer window.

use crate::core::Color;

/// Fixed figure colors (rank colors come from the palette)
pub mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BACKGROUND: Color = Color::from_rgb(255, 255, 255); // #FFFFFF - figure
    pub const PANEL: Color = Color::from_rgb(245, 245, 245); // #F5F5F5 - viewer chrome

    // === Lines & Borders ===
    pub const FRAME: Color = Color::from_rgb(160, 160, 160); // #A0A0A0 - plot frame

    // === Text ===
    pub const TEXT_PRIMARY: Color = Color::from_rgb(20, 20, 20); // #141414 - title
    pub const TEXT_MUTED: Color = Color::from_rgb(110, 110, 110); // #6E6E6E - axis labels
}

#[cfg(feature = "viewer")]
pub fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Light egui Visuals matching the saved figure
#[cfg(feature = "viewer")]
pub fn figure_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = color32(PANEL);
    visuals.window_fill = color32(BACKGROUND);
    visuals.extreme_bg_color = color32(BACKGROUND);
    visuals.override_text_color = Some(color32(TEXT_PRIMARY));

    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, color32(TEXT_MUTED));
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, color32(FRAME));

    // No shadows - flat figure
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
