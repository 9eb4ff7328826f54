//! A4 PDF export with embedded DejaVu Sans faces

use crate::error::{Error, Result};
use crate::i18n::Lang;
use crate::listing::ListingRecord;
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

static FONT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static FONT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TEXT_WIDTH: f32 = PAGE_W - 2.0 * MARGIN;
const PT_TO_MM: f32 = 0.3528;
/// Average DejaVu Sans glyph advance as a fraction of the font size.
const AVG_GLYPH: f32 = 0.55;

const TITLE_PT: f32 = 22.0;
const HEADING_PT: f32 = 14.0;
const META_PT: f32 = 12.0;
const BODY_PT: f32 = 10.0;
const BODY_LEAD: f32 = 5.0;

/// One positioned line of text. `y_mm` is measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub x_mm: f32,
    pub y_mm: f32,
    pub page: usize,
}

/// Wrap for the given column width in millimetres, estimating glyph widths.
pub fn wrap(text: &str, width_mm: f32, size_pt: f32) -> Vec<String> {
    super::wrap_chars(text, (width_mm / (size_pt * PT_TO_MM * AVG_GLYPH)) as usize)
}

struct Cursor {
    lines: Vec<PdfLine>,
    y: f32,
    page: usize,
}

impl Cursor {
    fn push(&mut self, text: String, size: f32, bold: bool, x: f32) {
        if self.y > PAGE_H - MARGIN {
            self.page += 1;
            self.y = MARGIN;
        }
        self.lines.push(PdfLine { text, size, bold, x_mm: x, y_mm: self.y, page: self.page });
    }

    fn block(&mut self, text: &str, size: f32, bold: bool, x: f32, lead: f32) {
        for line in wrap(text, TEXT_WIDTH - (x - MARGIN), size) {
            self.push(line, size, bold, x);
            self.y += lead;
        }
    }
}

/// Lay out the listing top to bottom: title, category and price, description,
/// feature bullets, tags.
pub fn layout(listing: &ListingRecord, lang: Lang) -> Vec<PdfLine> {
    let s = lang.strings();
    let mut c = Cursor { lines: Vec::new(), y: MARGIN, page: 0 };

    c.block(&listing.title, TITLE_PT, true, MARGIN, 9.0);
    c.y += 1.0;
    c.block(&format!("{}: {}", s.label_category, listing.category), META_PT, false, MARGIN, 7.0);
    c.block(&format!("{}: {}", s.label_price, listing.suggested_price), META_PT, false, MARGIN, 7.0);
    c.y += 8.0;

    c.block(&format!("{}:", s.label_description), HEADING_PT, true, MARGIN, 7.0);
    c.block(&listing.description, BODY_PT, false, MARGIN, BODY_LEAD);
    c.y += 10.0;

    c.block(&format!("{}:", s.label_features), HEADING_PT, true, MARGIN, 7.0);
    for feature in &listing.features {
        c.block(&format!("- {feature}"), BODY_PT, false, MARGIN + 5.0, BODY_LEAD);
    }
    c.y += 10.0;

    c.block(&format!("{}: {}", s.label_tags, listing.tags.join(", ")), BODY_PT, false, MARGIN, BODY_LEAD);
    c.lines
}

pub fn render(listing: &ListingRecord, lang: Lang) -> Result<Vec<u8>> {
    let lines = layout(listing, lang);
    let pages = lines.last().map(|l| l.page + 1).unwrap_or(1);

    let (doc, first_page, first_layer) =
        PdfDocument::new(listing.title.as_str(), Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let regular = add_font(&doc, FONT_REGULAR)?;
    let bold = add_font(&doc, FONT_BOLD)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for n in 1..pages {
        let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), format!("Layer {}", n + 1));
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &lines {
        let font = if line.bold { &bold } else { &regular };
        layers[line.page].use_text(line.text.as_str(), line.size, Mm(line.x_mm), Mm(PAGE_H - line.y_mm), font);
    }

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}

fn add_font(doc: &PdfDocumentReference, ttf: &[u8]) -> Result<IndirectFontRef> {
    doc.add_external_font(ttf).map_err(|e| Error::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::sample;
    use lopdf::content::Content;
    use lopdf::{Dictionary, Document};
    use std::collections::HashMap;

    fn texts(lines: &[PdfLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn layout_contains_every_field() {
        let listing = sample();
        let lines = layout(&listing, Lang::En);
        let texts = texts(&lines);

        assert_eq!(texts[0], "Handmade Ceramic Mug");
        assert!(texts.contains(&"Category: Home & Kitchen"));
        assert!(texts.contains(&"Price: $24.99"));
        assert!(texts.contains(&"Description:"));
        assert!(texts.contains(&"A sturdy stoneware mug glazed by hand."));
        assert!(texts.contains(&"- 350 ml capacity"));
        assert!(texts.contains(&"- Dishwasher safe"));
        assert_eq!(*texts.last().unwrap(), "Tags: ceramic, mug, handmade");
    }

    #[test]
    fn layout_moves_down_the_page() {
        let lines = layout(&sample(), Lang::Tr);
        assert!(lines.windows(2).all(|w| w[0].page < w[1].page || w[0].y_mm < w[1].y_mm));
        assert!(lines.iter().all(|l| l.page == 0));
        let bullet = lines.iter().find(|l| l.text.starts_with("- ")).unwrap();
        assert_eq!(bullet.x_mm, MARGIN + 5.0);
        assert_eq!(lines[0].size, TITLE_PT);
    }

    #[test]
    fn long_content_flows_onto_more_pages() {
        let mut listing = sample();
        listing.features = (1..=80).map(|n| format!("Feature number {n}")).collect();
        let lines = layout(&listing, Lang::En);
        assert!(lines.last().unwrap().page >= 1);
        assert!(lines.iter().all(|l| l.y_mm <= PAGE_H - MARGIN + BODY_LEAD));
        assert_eq!(lines.iter().filter(|l| l.text.starts_with("- Feature number")).count(), 80);
    }

    #[test]
    fn wrap_keeps_words_and_splits_long_ones() {
        let text = "alpha beta gamma delta";
        let lines = wrap(text, 20.0, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);

        let long = "x".repeat(300);
        let lines = wrap(&long, TEXT_WIDTH, BODY_PT);
        assert!(lines.len() >= 3);
        assert_eq!(lines.concat(), long);
    }

    /// Glyph id to character, read from a font's ToUnicode CMap.
    fn glyph_map(doc: &Document, font: &Dictionary) -> HashMap<u16, char> {
        let (_, cmap) = doc.dereference(font.get(b"ToUnicode").unwrap()).unwrap();
        let stream = cmap.as_stream().unwrap();
        let data = stream.decompressed_content().unwrap_or_else(|_| stream.content.clone());
        String::from_utf8_lossy(&data)
            .lines()
            .filter_map(|line| {
                let (gid, code) = line.trim().split_once("> <")?;
                let gid = u16::from_str_radix(gid.strip_prefix('<')?, 16).ok()?;
                let code = u32::from_str_radix(code.strip_suffix('>')?, 16).ok()?;
                Some((gid, char::from_u32(code)?))
            })
            .collect()
    }

    /// Every text run of the document in drawing order, decoded back to Unicode.
    fn rendered_text(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).unwrap();
        let mut runs: Vec<String> = Vec::new();

        for page_id in doc.page_iter() {
            let page = doc.get_dictionary(page_id).unwrap();
            let (_, resources) = doc.dereference(page.get(b"Resources").unwrap()).unwrap();
            let (_, fonts) = doc.dereference(resources.as_dict().unwrap().get(b"Font").unwrap()).unwrap();
            let maps: HashMap<Vec<u8>, HashMap<u16, char>> = fonts
                .as_dict()
                .unwrap()
                .iter()
                .map(|(name, font)| {
                    let (_, font) = doc.dereference(font).unwrap();
                    (name.clone(), glyph_map(&doc, font.as_dict().unwrap()))
                })
                .collect();

            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            let mut current: Option<&HashMap<u16, char>> = None;
            for op in &content.operations {
                match op.operator.as_str() {
                    "Tf" => current = maps.get(op.operands[0].as_name().unwrap()),
                    "Tj" => {
                        let map = current.unwrap();
                        let glyphs = op.operands[0].as_str().unwrap();
                        runs.push(
                            glyphs
                                .chunks(2)
                                .map(|g| map[&u16::from_be_bytes([g[0], g[1]])])
                                .collect::<String>(),
                        );
                    }
                    _ => {}
                }
            }
        }
        runs
    }

    fn turkish_listing() -> ListingRecord {
        ListingRecord {
            title: "Şık Seramik Kupa".into(),
            description: "Elde sırlanmış, çift cidarlı İznik desenli kupa. Ölçü: 350 ml.".into(),
            features: vec!["Bulaşık makinesinde yıkanabilir".into(), "Güğüm kulplu, 350 ml".into()],
            suggested_price: "₺249,90".into(),
            category: "Ev & Mutfak".into(),
            tags: vec!["kupa".into(), "seramik".into(), "hediyelik eşya".into()],
        }
    }

    #[test]
    fn render_produces_a_pdf() {
        let bytes = render(&sample(), Lang::Tr).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn rendered_pdf_carries_the_listing_text_exactly() {
        let listing = turkish_listing();
        let s = Lang::Tr.strings();
        let runs = rendered_text(&render(&listing, Lang::Tr).unwrap());

        assert_eq!(runs[0], "Şık Seramik Kupa");
        assert!(runs.contains(&format!("{}: ₺249,90", s.label_price)));
        assert!(runs.contains(&format!("{}: Ev & Mutfak", s.label_category)));
        assert!(runs.contains(&"Açıklama:".to_string()));
        assert!(runs.contains(&"Özellikler:".to_string()));
        assert!(runs.contains(&"Elde sırlanmış, çift cidarlı İznik desenli kupa. Ölçü: 350 ml.".to_string()));
        for feature in &listing.features {
            assert!(runs.contains(&format!("- {feature}")), "missing feature {feature}");
        }
        assert_eq!(
            runs.last().unwrap(),
            &format!("{}: kupa, seramik, hediyelik eşya", s.label_tags)
        );
    }

    #[test]
    fn rendered_runs_match_the_layout() {
        let mut listing = turkish_listing();
        listing.features = (1..=80).map(|n| format!("Özellik numarası {n}")).collect();
        let expected: Vec<String> = layout(&listing, Lang::En).into_iter().map(|l| l.text).collect();
        assert_eq!(rendered_text(&render(&listing, Lang::En).unwrap()), expected);
    }
}
