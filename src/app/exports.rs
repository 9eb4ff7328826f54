//! Save dialogs, clipboard and the video file on disk

use super::App;
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::listing::ListingRecord;
use crate::types::ImageAsset;
use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Download name for a single gallery image.
pub fn image_file_name(asset: &ImageAsset) -> String {
    format!("ai-product-{}.png", asset.id)
}

pub fn video_file_name(listing: Option<&ListingRecord>) -> String {
    let stem = listing.map(|l| l.file_stem()).unwrap_or_else(|| "product".to_string());
    format!("{stem}_video.mp4")
}

fn save_single_image(asset: &ImageAsset, path: &Path) -> Result<()> {
    let (png, _, _) = export::to_png(&asset.media)?;
    export::write_file(path, &png)
}

impl App {
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }

    /// Ask for a destination and remember its folder for next time.
    fn pick_save_path(&mut self, file_name: &str, filter: &str, extension: &str) -> Option<PathBuf> {
        let path = rfd::FileDialog::new()
            .set_directory(self.settings.export_dir_or_default())
            .set_file_name(file_name)
            .add_filter(filter, &[extension])
            .save_file()?;

        if let Some(parent) = path.parent() {
            self.settings.export_dir = Some(parent.to_string_lossy().to_string());
            self.save_settings();
        }
        debug!(path = %path.display(), "Save path chosen");
        Some(path)
    }

    pub fn export(&mut self, ctx: &egui::Context, format: ExportFormat) {
        let missing = match format {
            ExportFormat::GalleryZip => self.session.gallery.is_empty(),
            _ => self.session.listing.is_none(),
        };
        if missing || self.is_busy() {
            return;
        }
        let name = format.file_name(self.session.listing.as_ref());
        if let Some(path) = self.pick_save_path(&name, format.filter_name(), format.extension()) {
            self.start_export(ctx, format, path);
        }
    }

    pub fn download_selected_image(&mut self) {
        let Some(asset) = self.session.selected_image().cloned() else { return };
        let Some(path) = self.pick_save_path(&image_file_name(&asset), "PNG", "png") else { return };

        let s = self.lang().strings();
        match save_single_image(&asset, &path) {
            Ok(()) => self.show_toast(format!("{}: {}", s.export_saved, image_file_name(&asset))),
            Err(e) => {
                error!(error = %e, "Image download failed");
                self.alert = Some(format!("{}\n\n{}", s.export_failed, e.user_hint(self.lang())));
            }
        }
    }

    pub fn copy_listing(&mut self, ctx: &egui::Context) {
        let Some(listing) = &self.session.listing else { return };
        ctx.copy_text(listing.clipboard_text(self.lang()));
        self.show_toast(self.lang().strings().copy_success);
    }

    pub fn play_video(&mut self) {
        let Some(video) = &self.session.video else { return };
        if let Err(e) = open::that(&video.path) {
            warn!(error = %e, path = %video.path.display(), "Failed to open video player");
            self.alert = Some(e.to_string());
        }
    }

    pub fn save_video_as(&mut self) {
        let Some(source) = self.session.video.as_ref().map(|v| v.path.clone()) else { return };
        let name = video_file_name(self.session.listing.as_ref());
        let Some(dest) = self.pick_save_path(&name, "MP4", "mp4") else { return };

        let s = self.lang().strings();
        match std::fs::copy(&source, &dest) {
            Ok(bytes) => {
                info!(path = %dest.display(), bytes, "Video exported");
                self.show_toast(format!("{}: {}", s.export_saved, name));
            }
            Err(e) => {
                error!(error = %e, "Video export failed");
                self.alert = Some(format!("{}\n\n{}", s.export_failed, e));
            }
        }
    }

    /// Drop the current video and delete its temporary file.
    pub fn discard_video(&mut self) {
        if let Some(video) = self.session.video.take() {
            match std::fs::remove_file(&video.path) {
                Ok(()) => debug!(id = %video.id, path = %video.path.display(), "Removed video file"),
                Err(e) => warn!(error = %e, path = %video.path.display(), "Failed to remove video file"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use crate::listing::sample;
    use crate::types::ImageKind;

    #[test]
    fn download_names() {
        let asset = ImageAsset::new(fixtures::png(2, 2), ImageKind::Generated, "alt");
        assert_eq!(image_file_name(&asset), format!("ai-product-{}.png", asset.id));
        assert_eq!(video_file_name(None), "product_video.mp4");
        assert!(video_file_name(Some(&sample())).ends_with("_video.mp4"));
    }

    #[test]
    fn single_image_is_saved_as_png() {
        let dir = tempfile::tempdir().unwrap();
        let asset = ImageAsset::new(fixtures::jpeg(4, 3), ImageKind::Original, "alt");
        let path = dir.path().join(image_file_name(&asset));
        save_single_image(&asset, &path).unwrap();

        let saved = std::fs::read(&path).unwrap();
        assert!(saved.starts_with(b"\x89PNG"));
        let img = image::load_from_memory(&saved).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }
}
