//! In-memory product session: uploads, listing, gallery and dialog inputs
//!
//! Nothing here outlives the process; `reset` drops it all.

use crate::constants::UPLOAD_SLOTS;
use crate::gemini::wire::AnalysisContext;
use crate::i18n::Lang;
use crate::listing::ListingRecord;
use crate::types::{ImageAsset, ImageKind, MediaPayload, UploadSlot, VideoAsset};

#[derive(Debug, Default)]
pub struct Session {
    pub slots: [Option<UploadSlot>; UPLOAD_SLOTS],
    pub product_name: String,
    pub product_description: String,
    pub tech_docs: Vec<UploadSlot>,

    pub listing: Option<ListingRecord>,
    pub gallery: Vec<ImageAsset>,
    pub selected: usize,

    pub image_prompt: String,
    pub image_alt: String,
    pub edit_instruction: String,
    pub video_prompt: String,
    /// Gallery index picked in the video dialog; falls back to the selection.
    pub video_source: Option<usize>,
    pub video: Option<VideoAsset>,
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl Session {
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    pub fn has_uploads(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Put an upload into the first free slot, returning its index.
    pub fn place_upload(&mut self, upload: UploadSlot) -> Option<usize> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(upload);
        Some(index)
    }

    pub fn uploaded_images(&self) -> Vec<MediaPayload> {
        self.slots.iter().flatten().map(|s| s.media.clone()).collect()
    }

    pub fn analysis_context(&self, lang: Lang) -> AnalysisContext {
        AnalysisContext {
            lang,
            product_name: non_blank(&self.product_name),
            description: non_blank(&self.product_description),
            technical_docs: self.tech_docs.iter().map(|d| d.media.clone()).collect(),
        }
    }

    /// Install a fresh listing: the analysed uploads become the gallery and the
    /// dialogs are preset from the title.
    pub fn apply_analysis(&mut self, listing: ListingRecord, images: Vec<MediaPayload>, lang: Lang) {
        let label = lang.strings().product_image;
        self.gallery = images
            .into_iter()
            .enumerate()
            .map(|(i, media)| {
                ImageAsset::new(media, ImageKind::Original, format!("{} - {} {}", listing.title, label, i + 1))
            })
            .collect();
        self.selected = 0;
        self.image_prompt = listing.title.clone();
        self.image_alt = listing.title.clone();
        self.video_prompt = format!("Promotion for: {}", listing.title);
        self.video_source = None;
        self.listing = Some(listing);
    }

    /// Append a generated image and select it. An empty alt text falls back to the title.
    pub fn add_generated(&mut self, media: MediaPayload, prompt: String, alt: String) {
        let alt = non_blank(&alt)
            .or_else(|| self.listing.as_ref().map(|l| l.title.clone()))
            .unwrap_or_default();
        let mut asset = ImageAsset::new(media, ImageKind::Generated, alt);
        asset.prompt = Some(prompt);
        self.gallery.push(asset);
        self.selected = self.gallery.len() - 1;
        self.image_alt.clear();
    }

    /// Swap the pixels of an existing asset, keeping its place and metadata.
    pub fn replace_image(&mut self, id: &str, media: MediaPayload) -> bool {
        match self.gallery.iter_mut().find(|a| a.id == id) {
            Some(asset) => {
                asset.media = media;
                self.edit_instruction.clear();
                true
            }
            None => false,
        }
    }

    pub fn selected_image(&self) -> Option<&ImageAsset> {
        self.gallery.get(self.selected)
    }

    pub fn video_source_index(&self) -> usize {
        self.video_source
            .filter(|i| *i < self.gallery.len())
            .unwrap_or(self.selected)
    }

    pub fn video_source_image(&self) -> Option<&ImageAsset> {
        self.gallery.get(self.video_source_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::sample;

    fn upload(name: &str) -> UploadSlot {
        UploadSlot {
            file_name: name.into(),
            media: MediaPayload::new(name.as_bytes().to_vec(), "image/png"),
        }
    }

    #[test]
    fn uploads_fill_first_free_slot() {
        let mut session = Session::default();
        assert_eq!(session.place_upload(upload("a")), Some(0));
        assert_eq!(session.place_upload(upload("b")), Some(1));
        session.slots[0] = None;
        assert_eq!(session.place_upload(upload("c")), Some(0));
        assert_eq!(session.place_upload(upload("d")), Some(2));
        assert_eq!(session.place_upload(upload("e")), Some(3));
        assert_eq!(session.place_upload(upload("f")), None);
        let names: Vec<_> = session.slots.iter().flatten().map(|s| s.file_name.as_str()).collect();
        assert_eq!(names, ["c", "b", "d", "e"]);
    }

    #[test]
    fn analysis_presets_dialogs_from_title() {
        let mut session = Session::default();
        session.place_upload(upload("front"));
        session.place_upload(upload("back"));
        session.selected = 5;

        let images = session.uploaded_images();
        session.apply_analysis(sample(), images, Lang::En);

        assert_eq!(session.gallery.len(), 2);
        assert_eq!(session.gallery[1].alt_text, "Handmade Ceramic Mug - Product Image 2");
        assert!(session.gallery.iter().all(|a| a.kind == ImageKind::Original));
        assert_eq!(session.selected, 0);
        assert_eq!(session.image_prompt, "Handmade Ceramic Mug");
        assert_eq!(session.image_alt, "Handmade Ceramic Mug");
        assert_eq!(session.video_prompt, "Promotion for: Handmade Ceramic Mug");
    }

    #[test]
    fn turkish_alt_text_uses_turkish_label() {
        let mut session = Session::default();
        session.apply_analysis(sample(), vec![MediaPayload::new(vec![1], "image/png")], Lang::Tr);
        assert_eq!(session.gallery[0].alt_text, "Handmade Ceramic Mug - Ürün Görseli 1");
    }

    #[test]
    fn generated_image_is_appended_and_selected() {
        let mut session = Session::default();
        session.apply_analysis(sample(), vec![MediaPayload::new(vec![1], "image/png")], Lang::En);

        session.add_generated(MediaPayload::new(vec![2], "image/png"), "on a desk".into(), "  ".into());
        assert_eq!(session.gallery.len(), 2);
        assert_eq!(session.selected, 1);
        let added = session.selected_image().unwrap();
        assert_eq!(added.kind, ImageKind::Generated);
        assert_eq!(added.alt_text, "Handmade Ceramic Mug");
        assert_eq!(added.prompt.as_deref(), Some("on a desk"));
        assert!(session.image_alt.is_empty());
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut session = Session::default();
        let images = vec![MediaPayload::new(vec![1], "image/png"), MediaPayload::new(vec![2], "image/png")];
        session.apply_analysis(sample(), images, Lang::En);
        session.edit_instruction = "white background".into();
        let id = session.gallery[1].id.clone();

        assert!(session.replace_image(&id, MediaPayload::new(vec![9], "image/png")));
        assert_eq!(session.gallery.len(), 2);
        assert_eq!(session.gallery[1].media.bytes, vec![9]);
        assert_eq!(session.gallery[1].id, id);
        assert!(session.edit_instruction.is_empty());
        assert!(!session.replace_image("missing", MediaPayload::new(vec![0], "image/png")));
    }

    #[test]
    fn video_source_falls_back_to_selection() {
        let mut session = Session::default();
        let images = (0..3).map(|i| MediaPayload::new(vec![i], "image/png")).collect();
        session.apply_analysis(sample(), images, Lang::En);
        session.selected = 2;
        assert_eq!(session.video_source_index(), 2);
        session.video_source = Some(1);
        assert_eq!(session.video_source_index(), 1);
        session.video_source = Some(7);
        assert_eq!(session.video_source_index(), 2);
    }

    #[test]
    fn context_drops_blank_fields() {
        let mut session = Session::default();
        session.product_name = "  ".into();
        session.product_description = " glazed stoneware ".into();
        let ctx = session.analysis_context(Lang::En);
        assert_eq!(ctx.product_name, None);
        assert_eq!(ctx.description.as_deref(), Some("glazed stoneware"));
        assert!(ctx.technical_docs.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::default();
        session.place_upload(upload("a"));
        session.apply_analysis(sample(), session.uploaded_images(), Lang::En);
        session.reset();
        assert!(!session.has_uploads());
        assert!(session.listing.is_none());
        assert!(session.gallery.is_empty());
        assert!(session.video_prompt.is_empty());
    }
}
