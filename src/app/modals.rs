//! Modal dialogs (image prompt, video, reset confirm, alerts) and the toast

use super::tasks::{lock, progress_line, TaskKind};
use super::{cached_texture, App};
use crate::theme;
use crate::types::{AspectRatio, ImageSize, MusicStyle, VideoAspect, VideoDuration};
use crate::ui::components::{image_tile, loading_overlay, section_label};
use eframe::egui;
use egui_phosphor::regular as icons;

/// Title row with a close button, shared by the dialogs. Returns true if close was clicked.
fn dialog_title(ui: &mut egui::Ui, icon: &str, title: &str) -> bool {
    let mut close = false;
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}  {}", icon, title))
                    .size(theme::FONT_HEADING)
                    .strong(),
            )
            .selectable(false),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
            let color = if response.hovered() {
                ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                theme::STATUS_ERROR
            } else {
                theme::TEXT_DIM
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                icons::X,
                egui::FontId::proportional(16.0),
                color,
            );
            close = response.clicked();
        });
    });
    ui.add_space(theme::SPACING_SM);
    ui.separator();
    ui.add_space(theme::SPACING_MD);
    close
}

fn backdrop() -> egui::Color32 {
    egui::Color32::from_black_alpha(160)
}

impl App {
    pub(crate) fn render_modals(&mut self, ctx: &egui::Context) {
        self.render_image_dialog(ctx);
        self.render_video_dialog(ctx);
        self.render_reset_confirm(ctx);
        self.render_loading(ctx);
        self.render_alert(ctx);
        self.render_toast(ctx);
    }

    fn render_image_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_image_dialog || self.is_busy() {
            return;
        }
        let s = self.lang().strings();
        let mut close = false;
        let mut start = false;

        let modal = egui::Modal::new(egui::Id::new("image_dialog"))
            .backdrop_color(backdrop())
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(440.0);
                close = dialog_title(ui, icons::MAGIC_WAND, s.generate_image);

                section_label(ui, s.image_prompt_label);
                ui.add(
                    egui::TextEdit::multiline(&mut self.session.image_prompt)
                        .hint_text(s.image_prompt_placeholder)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(theme::SPACING_MD);
                ui.add(
                    egui::TextEdit::singleline(&mut self.session.image_alt)
                        .hint_text(s.image_alt_placeholder)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(theme::SPACING_LG);

                ui.columns(2, |cols| {
                    section_label(&mut cols[0], s.format);
                    egui::ComboBox::from_id_salt("image_aspect")
                        .selected_text(self.settings.image_aspect.as_str())
                        .width(150.0)
                        .show_ui(&mut cols[0], |ui| {
                            for ratio in AspectRatio::ALL {
                                ui.selectable_value(&mut self.settings.image_aspect, ratio, ratio.as_str());
                            }
                        });
                    section_label(&mut cols[1], s.quality);
                    egui::ComboBox::from_id_salt("image_size")
                        .selected_text(self.settings.image_size.as_str())
                        .width(150.0)
                        .show_ui(&mut cols[1], |ui| {
                            for size in ImageSize::ALL {
                                ui.selectable_value(&mut self.settings.image_size, size, size.as_str());
                            }
                        });
                });
                ui.add_space(theme::SPACING_XL);

                ui.vertical_centered_justified(|ui| {
                    let ready = !self.session.image_prompt.trim().is_empty();
                    let button = theme::button_accent(format!("{}  {}", icons::SPARKLE, s.start_production))
                        .min_size(egui::vec2(0.0, 36.0));
                    if ui.add_enabled(ready, button).clicked() {
                        start = true;
                    }
                });
            });

        if start {
            self.start_image_generation(ctx);
        } else if close || modal.should_close() {
            self.show_image_dialog = false;
        }
    }

    fn render_video_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_video_dialog || self.is_busy() {
            return;
        }
        let s = self.lang().strings();
        let lang = self.lang();
        let source_index = self.session.video_source_index();
        let mut close = false;
        let mut start = false;
        let mut picked = None;

        let modal = egui::Modal::new(egui::Id::new("video_dialog"))
            .backdrop_color(backdrop())
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(480.0);
                close = dialog_title(ui, icons::VIDEO_CAMERA, s.make_video);

                section_label(ui, s.source_image);
                egui::ScrollArea::horizontal()
                    .id_salt("video_sources")
                    .max_height(76.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for (index, asset) in self.session.gallery.iter().enumerate() {
                                let texture = cached_texture(&mut self.textures, ctx, &asset.id, &asset.media);
                                if image_tile(ui, texture.as_ref(), 64.0, index == source_index).clicked() {
                                    picked = Some(index);
                                }
                            }
                        });
                    });
                ui.add_space(theme::SPACING_LG);

                section_label(ui, s.video_prompt_label);
                ui.add(
                    egui::TextEdit::multiline(&mut self.session.video_prompt)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(theme::SPACING_LG);

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        section_label(ui, s.duration);
                        let mut short = self.settings.video_duration == VideoDuration::Short;
                        if theme::segmented_toggle(ui, "5s", "12s", &mut short) {
                            self.settings.video_duration = if short { VideoDuration::Short } else { VideoDuration::Extended };
                        }
                    });
                    ui.add_space(theme::SPACING_XL);
                    ui.vertical(|ui| {
                        section_label(ui, s.format);
                        let mut landscape = self.settings.video_aspect == VideoAspect::Landscape;
                        if theme::segmented_toggle(ui, "16:9", "9:16", &mut landscape) {
                            self.settings.video_aspect = if landscape { VideoAspect::Landscape } else { VideoAspect::Portrait };
                        }
                    });
                    ui.add_space(theme::SPACING_XL);
                    ui.vertical(|ui| {
                        section_label(ui, s.music);
                        egui::ComboBox::from_id_salt("music_style")
                            .selected_text(self.settings.music_style.label(lang))
                            .width(140.0)
                            .show_ui(ui, |ui| {
                                for style in MusicStyle::ALL {
                                    ui.selectable_value(&mut self.settings.music_style, style, style.label(lang));
                                }
                            });
                    });
                });
                ui.add_space(theme::SPACING_XL);

                ui.vertical_centered_justified(|ui| {
                    let ready = !self.session.video_prompt.trim().is_empty() && !self.session.gallery.is_empty();
                    let button = theme::button_accent(format!("{}  {}", icons::FILM_SLATE, s.start_production))
                        .min_size(egui::vec2(0.0, 36.0));
                    if ui.add_enabled(ready, button).clicked() {
                        start = true;
                    }
                });
            });

        if let Some(index) = picked {
            self.session.video_source = Some(index);
        }
        if start {
            self.start_video(ctx);
        } else if close || modal.should_close() {
            self.show_video_dialog = false;
        }
    }

    fn render_reset_confirm(&mut self, ctx: &egui::Context) {
        if !self.show_reset_confirm {
            return;
        }
        let s = self.lang().strings();
        let mut confirmed = false;
        let mut cancelled = false;

        let modal = egui::Modal::new(egui::Id::new("reset_confirm"))
            .backdrop_color(backdrop())
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(340.0);
                ui.label(egui::RichText::new(s.new_product).size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(s.reset_confirm).color(theme::TEXT_MUTED));
                ui.add_space(theme::SPACING_XL);
                ui.horizontal(|ui| {
                    if ui.add(theme::button_danger(s.yes)).clicked() {
                        confirmed = true;
                    }
                    if ui.add(theme::button(s.cancel)).clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            self.reset();
        } else if cancelled || modal.should_close() {
            self.show_reset_confirm = false;
        }
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else { return };
        let s = self.lang().strings();
        let mut dismissed = false;

        let modal = egui::Modal::new(egui::Id::new("alert"))
            .backdrop_color(backdrop())
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(380.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(icons::WARNING_CIRCLE).size(20.0).color(theme::STATUS_ERROR));
                    ui.label(egui::RichText::new(s.error_title).size(theme::FONT_HEADING).strong());
                });
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(message).color(theme::TEXT_SECONDARY));
                ui.add_space(theme::SPACING_XL);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button_accent(s.ok).min_size(egui::vec2(72.0, 28.0))).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed || modal.should_close() {
            self.alert = None;
        }
    }

    fn render_loading(&mut self, ctx: &egui::Context) {
        let (running, progress) = {
            let state = lock(&self.task);
            (state.running, state.video_progress)
        };
        let Some(kind) = running else { return };
        let s = self.lang().strings();

        let message = match kind {
            TaskKind::Video => format!("{} ({})", kind.loading_message(s), self.settings.video_duration.as_str()),
            _ => kind.loading_message(s).to_string(),
        };
        let detail = progress.map(|p| progress_line(p, s));
        loading_overlay(ctx, s.ai_working, &message, detail.as_deref());
    }

    // Bottom-right of the central panel, 3s visible then fade, paused on hover
    fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(message), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = if elapsed > visible_duration {
            ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED.gamma_multiply(alpha))
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::ACCENT.gamma_multiply(0.4 * alpha)))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(icons::CHECK_CIRCLE).color(theme::STATUS_SUCCESS.gamma_multiply(alpha)),
                            );
                            ui.label(egui::RichText::new(message).color(theme::TEXT_PRIMARY.gamma_multiply(alpha)));
                        });
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}
