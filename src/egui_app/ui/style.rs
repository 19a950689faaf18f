use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::health::StatusStyle;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(14, 16, 19),
        bg_secondary: Color32::from_rgb(26, 29, 33),
        bg_tertiary: Color32::from_rgb(40, 44, 50),
        panel_outline: Color32::from_rgb(52, 58, 64),
        grid_soft: Color32::from_rgb(32, 35, 40),
        text_primary: Color32::from_rgb(222, 226, 230),
        text_muted: Color32::from_rgb(150, 158, 166),
        accent: Color32::from_rgb(13, 110, 253),
        warning: Color32::from_rgb(255, 193, 7),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_secondary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.grid_soft;
    visuals.error_fg_color = StatusStyle::DANGER.color();
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_widget(&mut visuals.widgets.inactive, palette);
    set_widget(&mut visuals.widgets.hovered, palette);
    set_widget(&mut visuals.widgets.active, palette);
    set_widget(&mut visuals.widgets.open, palette);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent);
    visuals.window_corner_radius = CornerRadius::same(6);
    visuals.menu_corner_radius = CornerRadius::same(4);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_widget(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(4);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn card_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub fn card_hover_border() -> Stroke {
    Stroke::new(1.5, palette().accent)
}

pub fn modal_backdrop_color() -> Color32 {
    Color32::from_rgba_premultiplied(0, 0, 0, 160)
}

/// Readable label color on top of a status badge.
pub fn badge_text_color(style: StatusStyle) -> Color32 {
    if style == StatusStyle::WARNING {
        Color32::from_rgb(33, 37, 41)
    } else {
        Color32::WHITE
    }
}

/// Footer badge tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Working",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
