//! View rendering (header, upload screen, gallery, listing card)

use super::uploads::slot_texture_key;
use super::{cached_texture, App};
use crate::constants::UPLOAD_SLOTS;
use crate::export::ExportFormat;
use crate::i18n::Lang;
use crate::theme;
use crate::types::ImageKind;
use crate::ui::components::{badge, corner_button, empty_slot, fit_size, image_tile, section_label};
use crate::utils::{format_bytes, rasterize_logo_square};
use eframe::egui;
use egui_phosphor::regular as icons;

enum CardAction {
    ToggleEdit,
    Copy,
    Export(ExportFormat),
}

enum VideoAction {
    Play,
    Save,
    Close,
}

fn icon_label(icon: &str, label: &str) -> String {
    format!("{}  {}", icon, label)
}

impl App {
    /// Header, optional listing panel and the central panel for the current screen.
    pub(crate) fn render_panels(&mut self, ctx: &egui::Context) {
        self.render_header(ctx);

        // Side panel must be added BEFORE CentralPanel
        if self.session.listing.is_some() {
            self.render_listing_panel(ctx);
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                // Store panel rect for toast positioning
                self.central_panel_rect = Some(ui.max_rect());
                if self.session.listing.is_some() {
                    self.render_gallery(ui, ctx);
                } else {
                    self.render_upload_screen(ui, ctx);
                }
            });
    }

    // ========================================================================
    // HEADER
    // ========================================================================

    fn render_header(&mut self, ctx: &egui::Context) {
        let s = self.lang().strings();
        let busy = self.is_busy();

        egui::TopBottomPanel::top("header")
            .exact_height(theme::HEADER_HEIGHT)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(16, 0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if self.logo_texture.is_none() {
                        self.logo_texture = rasterize_logo_square(64).map(|(pixels, w, h)| {
                            ctx.load_texture(
                                "logo",
                                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                                egui::TextureOptions::LINEAR,
                            )
                        });
                    }
                    if let Some(texture) = &self.logo_texture {
                        ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(32.0, 32.0)));
                    }
                    ui.add_space(theme::SPACING_MD);
                    ui.vertical(|ui| {
                        ui.add_space(9.0);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(s.app_title)
                                    .size(theme::FONT_HEADING)
                                    .strong()
                                    .color(theme::TEXT_PRIMARY),
                            )
                            .selectable(false),
                        );
                        ui.add(
                            egui::Label::new(egui::RichText::new(s.tagline).size(theme::FONT_SMALL).color(theme::ACCENT))
                                .selectable(false),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut turkish = self.settings.lang == Lang::Tr;
                        if theme::segmented_toggle(ui, "TR", "EN", &mut turkish) {
                            self.settings.lang = self.settings.lang.toggle();
                            self.save_settings();
                        }

                        let has_content = self.session.has_uploads() || self.session.listing.is_some();
                        if has_content {
                            ui.add_space(theme::SPACING_LG);
                            let button = theme::button(icon_label(icons::ARROW_COUNTER_CLOCKWISE, s.new_product));
                            if ui.add_enabled(!busy, button).clicked() {
                                self.show_reset_confirm = true;
                            }
                        }
                    });
                });
            });
    }

    // ========================================================================
    // UPLOAD SCREEN
    // ========================================================================

    fn render_upload_screen(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let s = self.lang().strings();
        let busy = self.is_busy();
        let mut pick_slot = None;
        let mut clear_slot = None;
        let mut remove_doc = None;
        let mut add_docs = false;
        let mut analyze = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(720.0);
                ui.add_space(40.0);
                ui.label(
                    egui::RichText::new(s.hero_title)
                        .size(theme::FONT_HERO)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(s.hero_desc).size(theme::FONT_BODY).color(theme::TEXT_MUTED));
                ui.add_space(32.0);

                // Photo slots
                let row_width = theme::UPLOAD_TILE * UPLOAD_SLOTS as f32 + theme::SPACING_LG * (UPLOAD_SLOTS - 1) as f32;
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_LG;
                    ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
                    for index in 0..UPLOAD_SLOTS {
                        match &self.session.slots[index] {
                            Some(slot) => {
                                let key = slot_texture_key(index);
                                let texture = cached_texture(&mut self.textures, ctx, &key, &slot.media);
                                let response = image_tile(ui, texture.as_ref(), theme::UPLOAD_TILE, false);
                                let anchor = response.rect.right_top() + egui::vec2(-14.0, 14.0);
                                let clear_id = ui.id().with(("clear_slot", index));
                                if !busy && corner_button(ui, anchor, icons::X, clear_id) {
                                    clear_slot = Some(index);
                                } else if response.clicked() && !busy {
                                    pick_slot = Some(index);
                                }
                                response.on_hover_text(slot.file_name.as_str());
                            }
                            None => {
                                if empty_slot(ui, theme::UPLOAD_TILE, s.add_image, !busy).clicked() {
                                    pick_slot = Some(index);
                                }
                            }
                        }
                    }
                });
                ui.add_space(24.0);

                // Optional context
                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.session.product_name)
                                .hint_text(s.product_name_hint)
                                .desired_width(f32::INFINITY),
                        );
                        ui.add_space(theme::SPACING_MD);
                        ui.add(
                            egui::TextEdit::multiline(&mut self.session.product_description)
                                .hint_text(s.description_hint)
                                .desired_rows(3)
                                .desired_width(f32::INFINITY),
                        );
                        ui.add_space(theme::SPACING_LG);

                        section_label(ui, s.tech_docs);
                        ui.add_space(theme::SPACING_SM);
                        for (index, doc) in self.session.tech_docs.iter().enumerate() {
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(icons::FILE_PDF).color(theme::HIGHLIGHT));
                                ui.label(egui::RichText::new(&doc.file_name).color(theme::TEXT_SECONDARY));
                                ui.label(
                                    egui::RichText::new(format_bytes(doc.media.bytes.len() as u64))
                                        .size(theme::FONT_SMALL)
                                        .color(theme::TEXT_DIM),
                                );
                                let remove = ui.add_enabled(
                                    !busy,
                                    egui::Button::new(egui::RichText::new(icons::TRASH).color(theme::STATUS_ERROR)).frame(false),
                                );
                                if remove.clicked() {
                                    remove_doc = Some(index);
                                }
                            });
                        }
                        if ui.add_enabled(!busy, theme::button(icon_label(icons::PAPERCLIP, s.add_docs))).clicked() {
                            add_docs = true;
                        }
                    });
                });
                ui.add_space(24.0);

                let start = theme::button_accent(icon_label(icons::SPARKLE, s.start_analysis))
                    .min_size(egui::vec2(260.0, 44.0));
                if ui.add_enabled(!busy, start).clicked() {
                    analyze = true;
                }
                ui.add_space(40.0);
            });
        });

        if let Some(index) = clear_slot {
            self.clear_slot(index);
        }
        if let Some(index) = pick_slot {
            self.pick_image_for_slot(index);
        }
        if let Some(index) = remove_doc {
            self.remove_tech_doc(index);
        }
        if add_docs {
            self.pick_tech_docs();
        }
        if analyze {
            self.start_analysis(ctx);
        }
    }

    // ========================================================================
    // GALLERY (central panel once a listing exists)
    // ========================================================================

    fn render_gallery(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let s = self.lang().strings();
        let busy = self.is_busy();
        let count = self.session.gallery.len();

        ui.horizontal(|ui| {
            section_label(ui, s.gallery);
            ui.label(egui::RichText::new(count.to_string()).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
        });
        ui.add_space(theme::SPACING_MD);

        // Main preview
        let extra = if self.session.video.is_some() { 120.0 } else { 0.0 };
        let preview_height = (ui.available_height() - 330.0 - extra).max(220.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), preview_height), egui::Sense::hover());
        ui.painter().rect_filled(rect, theme::RADIUS_XL, theme::BG_INPUT);

        let selected = self.session.selected;
        let texture = self
            .session
            .gallery
            .get(selected)
            .and_then(|asset| cached_texture(&mut self.textures, ctx, &asset.id, &asset.media));
        match texture {
            Some(texture) => {
                let size = fit_size(texture.size(), rect.shrink(theme::SPACING_LG).size());
                let image_rect = egui::Rect::from_center_size(rect.center(), size);
                egui::Image::new(egui::load::SizedTexture::new(texture.id(), size))
                    .corner_radius(theme::RADIUS_LARGE)
                    .paint_at(ui, image_rect);
            }
            None => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    icons::IMAGE,
                    egui::FontId::proportional(48.0),
                    theme::TEXT_DIM,
                );
            }
        }

        if let Some(asset) = self.session.gallery.get(selected) {
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                if asset.kind == ImageKind::Generated {
                    badge(ui, s.generated_badge, theme::HIGHLIGHT);
                }
                ui.label(egui::RichText::new(&asset.alt_text).size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
            });
        }
        ui.add_space(theme::SPACING_MD);

        // Thumbnail strip
        let mut clicked = None;
        egui::ScrollArea::horizontal()
            .id_salt("thumbnail_strip")
            .max_height(theme::GALLERY_TILE + 12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (index, asset) in self.session.gallery.iter().enumerate() {
                        let texture = cached_texture(&mut self.textures, ctx, &asset.id, &asset.media);
                        let response = image_tile(ui, texture.as_ref(), theme::GALLERY_TILE, index == selected);
                        if response.clicked() {
                            clicked = Some(index);
                        }
                        response.on_hover_text(asset.prompt.as_deref().unwrap_or(&asset.alt_text));
                    }
                });
            });
        if let Some(index) = clicked {
            self.session.selected = index;
            self.session.edit_instruction.clear();
        }
        ui.add_space(theme::SPACING_MD);

        // Actions
        let mut download_image = false;
        let mut download_all = false;
        ui.horizontal_wrapped(|ui| {
            if ui.add_enabled(!busy, theme::button(icon_label(icons::DOWNLOAD_SIMPLE, s.download_image))).clicked() {
                download_image = true;
            }
            if ui.add_enabled(!busy && count > 0, theme::button(icon_label(icons::FILE_ZIP, s.download_all))).clicked() {
                download_all = true;
            }
            if ui.add_enabled(!busy, theme::button_accent(icon_label(icons::MAGIC_WAND, s.generate_image))).clicked() {
                self.show_image_dialog = true;
            }
            if ui.add_enabled(!busy && count > 0, theme::button_accent(icon_label(icons::VIDEO_CAMERA, s.make_video))).clicked() {
                self.session.video_source = Some(selected);
                self.show_video_dialog = true;
            }
        });
        if download_image {
            self.download_selected_image();
        }
        if download_all {
            self.export(ctx, ExportFormat::GalleryZip);
        }
        ui.add_space(theme::SPACING_LG);

        // Quick edit of the selected image
        let mut apply = false;
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            section_label(ui, s.quick_edit);
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.session.edit_instruction)
                        .hint_text(s.edit_placeholder)
                        .desired_width(ui.available_width() - 110.0),
                );
                let ready = !busy && !self.session.edit_instruction.trim().is_empty();
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.add_enabled(ready, theme::button_accent(icon_label(icons::PAINT_BRUSH, s.apply))).clicked()
                    || (ready && submitted)
                {
                    apply = true;
                }
            });
        });
        if apply {
            self.start_image_edit(ctx);
        }

        if self.session.video.is_some() {
            ui.add_space(theme::SPACING_LG);
            self.render_video_panel(ui);
        }
    }

    fn render_video_panel(&mut self, ui: &mut egui::Ui) {
        let s = self.lang().strings();
        let Some(video) = &self.session.video else { return };
        let details = format!(
            "{} · {} · {} #{}",
            video.duration.as_str(),
            format_bytes(video.size_bytes),
            s.source_image,
            video.source_index + 1
        );

        let mut action = None;
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icons::FILM_STRIP).size(22.0).color(theme::STATUS_SUCCESS));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(s.video_ready).strong().color(theme::TEXT_PRIMARY));
                    ui.label(egui::RichText::new(details).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button(icon_label(icons::X, s.close))).clicked() {
                        action = Some(VideoAction::Close);
                    }
                    if ui.add(theme::button(icon_label(icons::FLOPPY_DISK, s.save_video))).clicked() {
                        action = Some(VideoAction::Save);
                    }
                    if ui.add(theme::button_accent(icon_label(icons::PLAY, s.play))).clicked() {
                        action = Some(VideoAction::Play);
                    }
                });
            });
        });

        match action {
            Some(VideoAction::Play) => self.play_video(),
            Some(VideoAction::Save) => self.save_video_as(),
            Some(VideoAction::Close) => self.discard_video(),
            None => {}
        }
    }

    // ========================================================================
    // LISTING CARD (right panel)
    // ========================================================================

    fn render_listing_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("listing_panel")
            .exact_width(theme::SIDE_PANEL_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin { left: 0, right: 16, top: 16, bottom: 16 }),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().id_salt("listing_scroll").show(ui, |ui| {
                    theme::card_frame().show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        self.render_listing_card(ui, ctx);
                    });
                });
            });
    }

    fn render_listing_card(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let s = self.lang().strings();
        let busy = self.is_busy();
        let editing = self.editing_listing;
        let Some(listing) = self.session.listing.as_mut() else { return };
        let mut action = None;

        if editing {
            for (label, value) in [
                (s.label_category, &mut listing.category),
                (s.label_title, &mut listing.title),
                (s.label_price, &mut listing.suggested_price),
            ] {
                section_label(ui, label);
                ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
                ui.add_space(theme::SPACING_MD);
            }
            section_label(ui, s.label_description);
            ui.add(
                egui::TextEdit::multiline(&mut listing.description)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(theme::SPACING_MD);
            section_label(ui, s.label_features);
            ui.add(
                egui::TextEdit::multiline(&mut self.edit_features)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(theme::SPACING_MD);
            section_label(ui, s.label_tags);
            ui.add(egui::TextEdit::singleline(&mut self.edit_tags).desired_width(f32::INFINITY));
        } else {
            badge(ui, &listing.category.to_uppercase(), theme::HIGHLIGHT);
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(&listing.title)
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.add_space(theme::SPACING_LG);

            egui::Frame::new()
                .fill(theme::BG_INPUT)
                .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                .corner_radius(theme::RADIUS_LARGE)
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    section_label(ui, s.suggested_price);
                    ui.label(
                        egui::RichText::new(&listing.suggested_price)
                            .size(theme::FONT_HERO)
                            .strong()
                            .color(theme::STATUS_SUCCESS),
                    );
                    ui.label(egui::RichText::new(s.market_average).size(theme::FONT_SMALL).color(theme::TEXT_DIM));
                });
            ui.add_space(theme::SPACING_LG);

            section_label(ui, s.product_story);
            ui.add_space(theme::SPACING_SM);
            ui.label(egui::RichText::new(&listing.description).color(theme::TEXT_SECONDARY));
            ui.add_space(theme::SPACING_LG);

            section_label(ui, s.top_features);
            ui.add_space(theme::SPACING_SM);
            for feature in &listing.features {
                ui.horizontal_top(|ui| {
                    ui.label(egui::RichText::new(icons::CHECK_CIRCLE).color(theme::ACCENT));
                    ui.label(egui::RichText::new(feature).color(theme::TEXT_SECONDARY));
                });
            }
            ui.add_space(theme::SPACING_LG);

            section_label(ui, s.label_tags);
            ui.add_space(theme::SPACING_SM);
            ui.horizontal_wrapped(|ui| {
                for tag in &listing.tags {
                    badge(ui, &format!("#{tag}"), theme::TEXT_MUTED);
                }
            });
        }

        ui.add_space(theme::SPACING_XL);
        ui.separator();
        ui.add_space(theme::SPACING_MD);

        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                let toggle = if editing {
                    theme::button_accent(icon_label(icons::CHECK, s.done))
                } else {
                    theme::button(icon_label(icons::PENCIL_SIMPLE, s.edit_listing))
                };
                if ui.add(toggle).clicked() {
                    action = Some(CardAction::ToggleEdit);
                }
                if ui.add_enabled(!editing, theme::button(icon_label(icons::COPY, s.copy))).clicked() {
                    action = Some(CardAction::Copy);
                }
                ui.add_enabled_ui(!editing, |ui| {
                    ui.menu_button(icon_label(icons::EXPORT, s.export), |ui| {
                        ui.spacing_mut().item_spacing.y = 2.0;
                        let entries = [
                            (icons::FILE_PDF, s.export_pdf, ExportFormat::Pdf),
                            (icons::FILE_DOC, s.export_word, ExportFormat::Word),
                            (icons::FILE_HTML, s.export_html, ExportFormat::Html),
                            (icons::FILE_IMAGE, s.export_png, ExportFormat::CardPng),
                        ];
                        let labels: Vec<String> = entries.iter().map(|(icon, label, _)| icon_label(icon, label)).collect();
                        let label_refs: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
                        theme::set_menu_width(ui, &label_refs);
                        for (icon, label, format) in entries {
                            if theme::menu_item(ui, icon, label) {
                                action = Some(CardAction::Export(format));
                                ui.close_menu();
                            }
                        }
                    });
                });
            });
        });

        match action {
            Some(CardAction::ToggleEdit) => {
                if editing {
                    listing.set_features_text(&self.edit_features);
                    listing.set_tags_text(&self.edit_tags);
                    self.editing_listing = false;
                } else {
                    self.edit_features = listing.features_text();
                    self.edit_tags = listing.tags_text();
                    self.editing_listing = true;
                }
            }
            Some(CardAction::Copy) => self.copy_listing(ctx),
            Some(CardAction::Export(format)) => self.export(ctx, format),
            None => {}
        }
    }
}
