//! Reusable UI components
//!
//! Standalone widgets shared by the upload screen, gallery and dialogs.

use crate::theme;
use eframe::egui;

/// Small uppercase caption above a field or section
pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text.to_uppercase())
                .size(theme::FONT_SMALL)
                .strong()
                .color(theme::TEXT_DIM),
        )
        .selectable(false),
    );
}

/// Pill badge with colored text on a dark fill
pub fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(theme::ACCENT_SOFT)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(text).size(theme::FONT_SMALL).strong().color(color))
                    .selectable(false),
            );
        });
}

/// UV rect that crops a texture to fill `target` without distortion.
pub fn cover_uv(texture: [usize; 2], target: egui::Vec2) -> egui::Rect {
    let tex_aspect = texture[0] as f32 / texture[1].max(1) as f32;
    let target_aspect = target.x / target.y.max(1.0);
    if tex_aspect > target_aspect {
        let w = target_aspect / tex_aspect;
        egui::Rect::from_min_max(egui::pos2((1.0 - w) / 2.0, 0.0), egui::pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = tex_aspect / target_aspect;
        egui::Rect::from_min_max(egui::pos2(0.0, (1.0 - h) / 2.0), egui::pos2(1.0, (1.0 + h) / 2.0))
    }
}

/// Size that fits a texture inside `bounds`, keeping its aspect ratio.
pub fn fit_size(texture: [usize; 2], bounds: egui::Vec2) -> egui::Vec2 {
    let (w, h) = (texture[0] as f32, texture[1].max(1) as f32);
    let scale = (bounds.x / w).min(bounds.y / h);
    egui::vec2(w * scale, h * scale)
}

/// Square image tile with a highlight border when selected.
pub fn image_tile(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    size: f32,
    selected: bool,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_SURFACE);
    match texture {
        Some(tex) => {
            let uv = cover_uv(tex.size(), rect.size());
            egui::Image::new(egui::load::SizedTexture::new(tex.id(), rect.size()))
                .uv(uv)
                .corner_radius(theme::RADIUS_LARGE)
                .paint_at(ui, rect.shrink(1.0));
        }
        None => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::IMAGE,
                egui::FontId::proportional(size * 0.25),
                theme::TEXT_DIM,
            );
        }
    }

    let stroke = if selected {
        egui::Stroke::new(2.0, theme::ACCENT)
    } else if response.hovered() {
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT)
    } else {
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE)
    };
    ui.painter()
        .rect_stroke(rect, theme::RADIUS_LARGE, stroke, egui::StrokeKind::Inside);
    response
}

/// Empty upload slot: a plus icon and a caption, clickable.
pub fn empty_slot(ui: &mut egui::Ui, size: f32, label: &str, enabled: bool) -> egui::Response {
    let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), sense);
    if !ui.is_rect_visible(rect) {
        return response;
    }
    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    let (fill, draw_rect) = theme::button_visual(&response, theme::BG_INPUT, rect);
    let painter = ui.painter();
    painter.rect_filled(draw_rect, theme::RADIUS_LARGE, fill);
    let border = if enabled && response.hovered() { theme::ACCENT } else { theme::BORDER_DEFAULT };
    painter.rect_stroke(
        draw_rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_MEDIUM, border),
        egui::StrokeKind::Inside,
    );
    painter.text(
        draw_rect.center() - egui::vec2(0.0, 10.0),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::PLUS,
        egui::FontId::proportional(24.0),
        border,
    );
    painter.text(
        draw_rect.center() + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(theme::FONT_SMALL),
        theme::TEXT_MUTED,
    );
    response
}

/// Round icon button painted over an image corner. Returns true if clicked.
pub fn corner_button(ui: &mut egui::Ui, anchor: egui::Pos2, icon: &str, id: egui::Id) -> bool {
    let rect = egui::Rect::from_center_size(anchor, egui::vec2(22.0, 22.0));
    let response = ui.interact(rect, id, egui::Sense::click());
    let fill = if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        theme::BTN_DANGER
    } else {
        egui::Color32::from_black_alpha(170)
    };
    ui.painter().circle_filled(rect.center(), 11.0, fill);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(12.0),
        theme::TEXT_PRIMARY,
    );
    response.clicked()
}

/// Blocking overlay with a spinner and status lines. Input behind it is ignored.
pub fn loading_overlay(ctx: &egui::Context, title: &str, message: &str, detail: Option<&str>) {
    egui::Modal::new(egui::Id::new("loading_overlay"))
        .backdrop_color(egui::Color32::from_black_alpha(200))
        .frame(theme::modal_frame())
        .show(ctx, |ui| {
            ui.set_width(320.0);
            ui.vertical_centered(|ui| {
                ui.add_space(theme::SPACING_MD);
                ui.add(egui::Spinner::new().size(36.0).color(theme::ACCENT));
                ui.add_space(theme::SPACING_LG);
                ui.label(egui::RichText::new(title).size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_SM);
                ui.label(egui::RichText::new(message).color(theme::TEXT_MUTED));
                if let Some(detail) = detail {
                    ui.add_space(theme::SPACING_SM);
                    ui.label(egui::RichText::new(detail).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
                }
                ui.add_space(theme::SPACING_MD);
            });
        });
}
