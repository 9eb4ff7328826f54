//! Local exports of the listing and gallery

pub mod archive;
pub mod card;
pub mod html;
pub mod pdf;

use crate::error::{Error, Result};
use crate::i18n::Lang;
use crate::listing::ListingRecord;
use crate::types::{ImageAsset, MediaPayload};
use std::io::Cursor;
use std::path::Path;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Word,
    Html,
    CardPng,
    GalleryZip,
}

impl ExportFormat {
    pub fn suffix(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "_listing.pdf",
            ExportFormat::Word => "_listing.doc",
            ExportFormat::Html => "_listing.html",
            ExportFormat::CardPng => "_card.png",
            ExportFormat::GalleryZip => "_all_images.zip",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "doc",
            ExportFormat::Html => "html",
            ExportFormat::CardPng => "png",
            ExportFormat::GalleryZip => "zip",
        }
    }

    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Word => "Word",
            ExportFormat::Html => "HTML",
            ExportFormat::CardPng => "PNG",
            ExportFormat::GalleryZip => "ZIP",
        }
    }

    /// Default file name; the gallery archive falls back to `product` without a listing.
    pub fn file_name(self, listing: Option<&ListingRecord>) -> String {
        let stem = listing.map(|l| l.file_stem()).unwrap_or_else(|| "product".to_string());
        format!("{}{}", stem, self.suffix())
    }
}

/// Snapshot of everything an export may need, detached from the UI state.
#[derive(Debug, Clone)]
pub struct ExportInput {
    pub listing: Option<ListingRecord>,
    pub lang: Lang,
    pub gallery: Vec<ImageAsset>,
    /// Image shown at the top of the summary card
    pub hero: Option<MediaPayload>,
}

/// Produce the encoded bytes for one export.
pub fn render(format: ExportFormat, input: &ExportInput) -> Result<Vec<u8>> {
    let listing = || {
        input
            .listing
            .as_ref()
            .ok_or_else(|| Error::InvalidListing("no listing to export".into()))
    };
    match format {
        ExportFormat::Pdf => pdf::render(listing()?, input.lang),
        ExportFormat::Word => Ok(html::word_document(listing()?, input.lang).into_bytes()),
        ExportFormat::Html => Ok(html::standalone_page(listing()?, input.lang).into_bytes()),
        ExportFormat::CardPng => card::render_png(listing()?, input.lang, input.hero.as_ref()),
        ExportFormat::GalleryZip => archive::gallery_zip(&input.gallery),
    }
}

pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(())
}

/// Re-encode any decodable image as PNG, returning the bytes and pixel size.
pub fn to_png(media: &MediaPayload) -> Result<(Vec<u8>, u32, u32)> {
    let img = image::load_from_memory(&media.bytes)?;
    let (w, h) = (img.width(), img.height());
    if media.is_png() {
        return Ok((media.bytes.clone(), w, h));
    }
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
    Ok((out, w, h))
}

/// Greedy word wrap to at most `max_chars` per line. Words longer than a
/// line are split. Source line breaks are kept.
pub fn wrap_chars(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                lines.push(chars.drain(..max_chars).collect());
            }
            if chars.is_empty() {
                continue;
            }
            if line_len > 0 && line_len + 1 + chars.len() > max_chars {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += chars.len();
            line.extend(chars);
        }
        if line_len > 0 {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::MediaPayload;
    use std::io::Cursor;

    pub fn png(w: u32, h: u32) -> MediaPayload {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 30, 30, 255]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png).unwrap();
        MediaPayload::new(out, "image/png")
    }

    pub fn jpeg(w: u32, h: u32) -> MediaPayload {
        let img = image::RgbImage::from_pixel(w, h, image::Rgb([30, 30, 200]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg).unwrap();
        MediaPayload::new(out, "image/jpeg")
    }
}
