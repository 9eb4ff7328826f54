//! Product photo and document uploads: file pickers and drag-and-drop

use super::App;
use crate::types::{MediaPayload, UploadSlot};
use eframe::egui;
use std::path::Path;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// MIME type from the file extension, used when sniffing fails.
fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Turn raw file bytes into an image upload. Anything that is not an image is rejected.
pub fn image_upload(file_name: String, bytes: Vec<u8>) -> Option<UploadSlot> {
    let mut media = MediaPayload::sniffed(bytes);
    if !media.mime_type.starts_with("image/") {
        let mime = mime_from_extension(Path::new(&file_name)).filter(|m| m.starts_with("image/"))?;
        media.mime_type = mime.to_string();
    }
    Some(UploadSlot { file_name, media })
}

fn read_upload(path: &Path) -> Option<UploadSlot> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to read upload");
            return None;
        }
    };
    let name = path.file_name()?.to_string_lossy().to_string();
    image_upload(name, bytes)
}

impl App {
    /// Pick an image for a specific upload slot.
    pub fn pick_image_for_slot(&mut self, index: usize) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        if let Some(upload) = read_upload(&path) {
            debug!(slot = index, file = %upload.file_name, "Image uploaded");
            self.textures.remove(&slot_texture_key(index));
            self.session.slots[index] = Some(upload);
        }
    }

    pub fn clear_slot(&mut self, index: usize) {
        self.session.slots[index] = None;
        self.textures.remove(&slot_texture_key(index));
    }

    /// Files dropped onto the window fill the free slots in order.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() || self.session.listing.is_some() {
            return;
        }
        for file in dropped {
            let upload = match (&file.path, &file.bytes) {
                (Some(path), _) => read_upload(path),
                (None, Some(bytes)) => image_upload(file.name.clone(), bytes.to_vec()),
                _ => None,
            };
            let Some(upload) = upload else { continue };
            match self.session.place_upload(upload) {
                Some(index) => {
                    self.textures.remove(&slot_texture_key(index));
                }
                None => {
                    debug!("All upload slots full, ignoring remaining drops");
                    break;
                }
            }
        }
    }

    pub fn pick_tech_docs(&mut self) {
        let Some(paths) = rfd::FileDialog::new().add_filter("PDF", &["pdf"]).pick_files() else {
            return;
        };
        for path in paths {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let file_name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
                    let mime = mime_from_extension(&path).unwrap_or("application/pdf");
                    self.session.tech_docs.push(UploadSlot { file_name, media: MediaPayload::new(bytes, mime) });
                }
                Err(e) => warn!(error = %e, path = %path.display(), "Failed to read document"),
            }
        }
    }

    pub fn remove_tech_doc(&mut self, index: usize) {
        if index < self.session.tech_docs.len() {
            self.session.tech_docs.remove(index);
        }
    }
}

pub fn slot_texture_key(index: usize) -> String {
    format!("slot-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn sniffed_images_are_accepted() {
        let png = fixtures::png(2, 2).bytes;
        let upload = image_upload("whatever.bin".into(), png).unwrap();
        assert_eq!(upload.media.mime_type, "image/png");
        assert_eq!(upload.file_name, "whatever.bin");
    }

    #[test]
    fn extension_is_the_fallback() {
        let upload = image_upload("photo.JPG".into(), vec![1, 2, 3]).unwrap();
        assert_eq!(upload.media.mime_type, "image/jpeg");
        assert!(image_upload("notes.txt".into(), vec![1, 2, 3]).is_none());
        assert!(image_upload("manual.pdf".into(), vec![1, 2, 3]).is_none());
    }

    #[test]
    fn extensions_map_to_mime_types() {
        assert_eq!(mime_from_extension(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(mime_from_extension(Path::new("manual.PDF")), Some("application/pdf"));
        assert_eq!(mime_from_extension(Path::new("noext")), None);
    }
}
