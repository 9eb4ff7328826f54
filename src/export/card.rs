//! Summary card rendered to PNG via SVG

use super::{html::escape, to_png, wrap_chars};
use crate::error::{Error, Result};
use crate::i18n::Lang;
use crate::listing::ListingRecord;
use crate::types::MediaPayload;
use crate::utils::premul_to_straight;
use base64::Engine;
use std::fmt::Write;
use std::io::Cursor;

pub const CARD_WIDTH: f32 = 600.0;
/// Export resolution multiplier.
pub const SCALE: f32 = 2.0;

const PAD: f32 = 40.0;
const INNER: f32 = CARD_WIDTH - 2.0 * PAD;
const HERO_MAX_H: f32 = 360.0;
const GLYPH: f32 = 0.55;

const ACCENT: &str = "#2563eb";
const INK: &str = "#0f172a";
const MUTED: &str = "#64748b";

pub struct CardSvg {
    pub svg: String,
    pub width: f32,
    pub height: f32,
}

fn lines_for(text: &str, size: f32) -> Vec<String> {
    wrap_chars(text, (INNER / (size * GLYPH)) as usize)
}

fn text(out: &mut String, x: f32, y: f32, size: f32, weight: u16, fill: &str, body: &str) {
    let _ = writeln!(
        out,
        r#"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{size}" font-weight="{weight}" fill="{fill}">{}</text>"#,
        escape(body)
    );
}

/// Build the card markup. The hero image, when given, is embedded as a PNG data URL.
pub fn card_svg(listing: &ListingRecord, lang: Lang, hero: Option<&MediaPayload>) -> Result<CardSvg> {
    let s = lang.strings();
    let mut body = String::new();
    let mut y = 0.0;

    if let Some(hero) = hero {
        let (png, w, h) = to_png(hero)?;
        let hero_h = (CARD_WIDTH * h as f32 / w.max(1) as f32).min(HERO_MAX_H);
        let data = base64::engine::general_purpose::STANDARD.encode(&png);
        let _ = writeln!(
            body,
            r#"<image x="0" y="0" width="{CARD_WIDTH}" height="{hero_h}" preserveAspectRatio="xMidYMid slice" href="data:image/png;base64,{data}"/>"#
        );
        y = hero_h;
    }
    y += PAD;

    let category = listing.category.to_uppercase();
    let pill_w = category.chars().count() as f32 * 12.0 * 0.62 + 24.0;
    let _ = writeln!(body, r##"<rect x="{PAD}" y="{y}" width="{pill_w}" height="24" rx="12" fill="#eff6ff"/>"##);
    text(&mut body, PAD + 12.0, y + 16.5, 12.0, 700, ACCENT, &category);
    y += 24.0 + 20.0;

    for line in lines_for(&listing.title, 28.0) {
        y += 30.0;
        text(&mut body, PAD, y, 28.0, 800, INK, &line);
    }
    y += 16.0;

    let _ = writeln!(body, r##"<rect x="{PAD}" y="{y}" width="{INNER}" height="64" rx="12" fill="#f8fafc"/>"##);
    text(&mut body, PAD + 16.0, y + 24.0, 12.0, 700, MUTED, &s.suggested_price.to_uppercase());
    text(&mut body, PAD + 16.0, y + 52.0, 26.0, 800, ACCENT, &listing.suggested_price);
    y += 64.0 + 28.0;

    text(&mut body, PAD, y, 13.0, 700, INK, &s.product_story.to_uppercase());
    y += 6.0;
    for line in lines_for(&listing.description, 15.0) {
        y += 22.0;
        text(&mut body, PAD, y, 15.0, 400, MUTED, &line);
    }
    y += 28.0;

    if !listing.features.is_empty() {
        text(&mut body, PAD, y, 13.0, 700, INK, &s.top_features.to_uppercase());
        y += 6.0;
        for feature in &listing.features {
            for (i, line) in lines_for(feature, 15.0).into_iter().enumerate() {
                y += 22.0;
                let bullet = if i == 0 { "\u{2022} " } else { "  " };
                text(&mut body, PAD, y, 15.0, 400, INK, &format!("{bullet}{line}"));
            }
        }
        y += 28.0;
    }

    if !listing.tags.is_empty() {
        let tags = listing.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join("  ");
        for line in lines_for(&tags, 13.0) {
            y += 20.0;
            text(&mut body, PAD, y, 13.0, 600, ACCENT, &line);
        }
    }

    let height = (y + PAD).ceil();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{CARD_WIDTH}" height="{height}" viewBox="0 0 {CARD_WIDTH} {height}">
<rect width="100%" height="100%" fill="#ffffff"/>
{body}</svg>
"##
    );
    Ok(CardSvg { svg, width: CARD_WIDTH, height })
}

/// Render the card at `SCALE` on a white background and encode it as PNG.
pub fn render_png(listing: &ListingRecord, lang: Lang, hero: Option<&MediaPayload>) -> Result<Vec<u8>> {
    let card = card_svg(listing, lang, hero)?;

    let mut opt = resvg::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(&card.svg, &opt).map_err(|e| Error::Render(e.to_string()))?;

    let width = (card.width * SCALE).ceil() as u32;
    let height = (card.height * SCALE).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("invalid card size {width}x{height}")))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);
    resvg::render(&tree, resvg::usvg::Transform::from_scale(SCALE, SCALE), &mut pixmap.as_mut());

    let rgba = image::RgbaImage::from_raw(width, height, premul_to_straight(&pixmap))
        .ok_or_else(|| Error::Render("pixel buffer size mismatch".into()))?;
    let mut out = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use crate::listing::sample;

    #[test]
    fn svg_carries_listing_text() {
        let card = card_svg(&sample(), Lang::En, None).unwrap();
        assert!(card.svg.contains(">Handmade Ceramic Mug</text>"));
        assert!(card.svg.contains(">$24.99</text>"));
        assert!(card.svg.contains("HOME &amp; KITCHEN"));
        assert!(card.svg.contains("\u{2022} Dishwasher safe"));
        assert!(card.svg.contains("#ceramic  #mug  #handmade"));
        assert!(!card.svg.contains("<image"));
    }

    #[test]
    fn hero_image_is_embedded_and_pushes_content_down() {
        let plain = card_svg(&sample(), Lang::En, None).unwrap();
        let with_hero = card_svg(&sample(), Lang::En, Some(&fixtures::jpeg(40, 20))).unwrap();
        assert!(with_hero.svg.contains("href=\"data:image/png;base64,"));
        assert_eq!(with_hero.height, plain.height + 300.0);
    }

    #[test]
    fn png_is_rendered_at_double_scale() {
        let listing = sample();
        let hero = fixtures::png(30, 30);
        let card = card_svg(&listing, Lang::Tr, Some(&hero)).unwrap();
        let png = render_png(&listing, Lang::Tr, Some(&hero)).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 1200);
        assert_eq!(decoded.height(), (card.height * SCALE) as u32);
        // corner pixel sits on the white background below the hero
        let corner = decoded.to_rgba8().get_pixel(0, decoded.height() - 1).0;
        assert_eq!(corner, [255, 255, 255, 255]);
    }
}
