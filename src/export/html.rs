//! Word-compatible and standalone HTML documents

use crate::i18n::Lang;
use crate::listing::ListingRecord;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn feature_items(listing: &ListingRecord) -> String {
    listing
        .features
        .iter()
        .map(|f| format!("<li>{}</li>", escape(f)))
        .collect()
}

fn tag_line(listing: &ListingRecord) -> String {
    escape(&listing.tags.join(", "))
}

/// HTML with Office namespaces, saved as `.doc` so Word opens it as a document.
/// Starts with a UTF-8 byte order mark.
pub fn word_document(listing: &ListingRecord, lang: Lang) -> String {
    let s = lang.strings();
    format!(
        "\u{feff}<html xmlns:o='urn:schemas-microsoft-com:office:office' \
xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head><meta charset='utf-8'><title>{title}</title></head>
<body>
  <h1>{title}</h1>
  <p><b>{cat_label}:</b> {category}</p>
  <p><b>{price_label}:</b> {price}</p>
  <h2>{desc_label}</h2>
  <p>{description}</p>
  <h2>{feat_label}</h2>
  <ul>{features}</ul>
  <p><b>{tags_label}:</b> {tags}</p>
</body>
</html>
",
        title = escape(&listing.title),
        cat_label = s.label_category,
        category = escape(&listing.category),
        price_label = s.label_price,
        price = escape(&listing.suggested_price),
        desc_label = s.label_description,
        description = escape(&listing.description),
        feat_label = s.label_features,
        features = feature_items(listing),
        tags_label = s.label_tags,
        tags = tag_line(listing),
    )
}

/// Self-contained page with embedded styling.
pub fn standalone_page(listing: &ListingRecord, lang: Lang) -> String {
    let s = lang.strings();
    format!(
        r#"<!DOCTYPE html>
<html lang="{code}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; padding: 40px; line-height: 1.6; max-width: 800px; margin: auto; }}
    h1 {{ color: #1e293b; }}
    .price {{ font-size: 24px; font-weight: bold; color: #2563eb; }}
    .tags {{ color: #64748b; font-size: 14px; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p class="price">{price}</p>
  <p><strong>{cat_label}:</strong> {category}</p>
  <hr>
  <h3>{desc_label}</h3>
  <p>{description}</p>
  <h3>{feat_label}</h3>
  <ul>{features}</ul>
  <p class="tags">{tags_label}: {tags}</p>
</body>
</html>
"#,
        code = lang.code(),
        title = escape(&listing.title),
        price = escape(&listing.suggested_price),
        cat_label = s.label_category,
        category = escape(&listing.category),
        desc_label = s.label_product_description,
        description = escape(&listing.description),
        feat_label = s.label_features,
        features = feature_items(listing),
        tags_label = s.label_tags,
        tags = tag_line(listing),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::sample;

    fn assert_has_listing(doc: &str, listing: &ListingRecord) {
        assert!(doc.contains(&format!("<h1>{}</h1>", listing.title)));
        assert!(doc.contains(&listing.suggested_price));
        for feature in &listing.features {
            assert!(doc.contains(&format!("<li>{feature}</li>")), "missing {feature}");
        }
        assert!(doc.contains(&listing.tags.join(", ")));
    }

    #[test]
    fn word_document_has_every_field() {
        let mut listing = sample();
        listing.category = "Kitchen".into();
        let doc = word_document(&listing, Lang::En);
        assert!(doc.starts_with('\u{feff}'));
        assert!(doc.contains("urn:schemas-microsoft-com:office:word"));
        assert!(doc.contains("<p><b>Category:</b> Kitchen</p>"));
        assert!(doc.contains("<p><b>Price:</b> $24.99</p>"));
        assert_has_listing(&doc, &listing);
    }

    #[test]
    fn standalone_page_has_every_field_and_style() {
        let listing = sample();
        let page = standalone_page(&listing, Lang::Tr);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<style>"));
        assert!(page.contains(r#"<p class="price">$24.99</p>"#));
        assert!(page.contains("Ürün Açıklaması"));
        assert!(page.contains("Etiketler: ceramic, mug, handmade"));
        assert!(page.contains(&listing.description));
        // `&` in the category is escaped, everything else is verbatim
        assert!(page.contains("Home &amp; Kitchen"));
        assert_has_listing(&page, &listing);
    }

    #[test]
    fn markup_in_listing_is_escaped() {
        let mut listing = sample();
        listing.title = "<script>alert('x')</script>".into();
        let page = standalone_page(&listing, Lang::En);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }
}
