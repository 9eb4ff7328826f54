//! Utility functions

use crate::types::MediaPayload;
use eframe::egui;
use std::path::PathBuf;

// Square mark only, for window/taskbar icons
const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#3b82f6"/><stop offset="1" stop-color="#1d4ed8"/></linearGradient></defs><rect x="0" y="0" width="64" height="64" rx="16" fill="url(#g)"/><path d="M18 22h28l-3 28H21z" fill="#fff"/><path d="M25 22a7 7 0 0 1 14 0" fill="none" stroke="#fff" stroke-width="4"/><path d="M52 6l3 7 7 3-7 3-3 7-3-7-7-3 7-3z" fill="#f97316"/></svg>"##;

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_logo_square(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(&tree, resvg::usvg::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Some((premul_to_straight(&pixmap), size, size))
}

/// tiny-skia stores premultiplied RGBA; image and egui want straight alpha.
pub fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// App data directory holding settings, logs and rendered videos
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Listing Studio")
}

pub fn videos_dir(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("videos")
}

/// Format bytes into human-readable string (B, KB, MB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Decode an image payload into an egui texture.
pub fn load_texture(ctx: &egui::Context, name: &str, media: &MediaPayload) -> Option<egui::TextureHandle> {
    let img = image::load_from_memory(&media.bytes).ok()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Some(ctx.load_texture(
        name,
        egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
        egui::TextureOptions::LINEAR,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_square_and_opaque_in_the_middle() {
        let (pixels, w, h) = rasterize_logo_square(64).unwrap();
        assert_eq!((w, h), (64, 64));
        let center = ((32 * 64 + 32) * 4) as usize;
        assert_eq!(pixels[center + 3], 255);
    }

    #[test]
    fn bytes_are_human_readable() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
