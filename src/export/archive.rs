use super::to_png;
use crate::error::Result;
use crate::types::ImageAsset;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn entry_name(index: usize) -> String {
    format!("product-image-{}.png", index + 1)
}

/// Pack the gallery in display order as `product-image-{n}.png`. Images that
/// are not PNG already are re-encoded so every entry matches its extension.
pub fn gallery_zip(images: &[ImageAsset]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (i, asset) in images.iter().enumerate() {
        let (png, _, _) = to_png(&asset.media)?;
        zip.start_file(entry_name(i), options)?;
        zip.write_all(&png)?;
        debug!(entry = %entry_name(i), bytes = png.len(), "Added image to archive");
    }

    Ok(zip.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use crate::types::ImageKind;
    use std::io::Read;

    #[test]
    fn entries_are_numbered_pngs_in_order() {
        let images = vec![
            ImageAsset::new(fixtures::png(4, 4), ImageKind::Original, "a"),
            ImageAsset::new(fixtures::jpeg(6, 3), ImageKind::Generated, "b"),
            ImageAsset::new(fixtures::png(2, 2), ImageKind::Generated, "c"),
        ];
        let bytes = gallery_zip(&images).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        for n in 0..3 {
            let mut entry = archive.by_index(n).unwrap();
            assert_eq!(entry.name(), format!("product-image-{}.png", n + 1));
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::Png);
        }

        let mut second = Vec::new();
        archive.by_name("product-image-2.png").unwrap().read_to_end(&mut second).unwrap();
        let decoded = image::load_from_memory(&second).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 3));
    }

    #[test]
    fn empty_gallery_gives_empty_archive() {
        let bytes = gallery_zip(&[]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn undecodable_image_fails_the_archive() {
        let broken = ImageAsset::new(
            crate::types::MediaPayload::new(vec![1, 2, 3], "image/png"),
            ImageKind::Generated,
            "x",
        );
        assert!(gallery_zip(&[broken]).is_err());
    }
}
