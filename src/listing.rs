//! The generated listing record and its text helpers

use crate::error::{Error, Result};
use crate::i18n::Lang;
use serde::{Deserialize, Serialize};

/// Marketing copy for one product, as returned by the analysis model.
///
/// Every field is required on the wire; a response that omits one is
/// rejected instead of being filled with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub suggested_price: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl ListingRecord {
    /// Parse the model's JSON text into a listing.
    pub fn from_json(text: &str) -> Result<Self> {
        let text = strip_code_fence(text);
        let record: ListingRecord = serde_json::from_str(text)
            .map_err(|e| Error::InvalidListing(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidListing("title is empty".into()));
        }
        Ok(())
    }

    /// Plain-text block put on the clipboard by the copy button
    pub fn clipboard_text(&self, lang: Lang) -> String {
        let s = lang.strings();
        let features = self
            .features
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{}: {}\n{}: {}\n{}: {}\n\n{}:\n{}\n\n{}:\n{}\n\n{}: {}",
            s.label_title,
            self.title,
            s.label_category,
            self.category,
            s.suggested_price,
            self.suggested_price,
            s.label_description,
            self.description,
            s.label_key_features,
            features,
            s.label_tags,
            self.tags.join(", "),
        )
        .trim()
        .to_string()
    }

    /// Base name for exported files: whitespace runs become `_`.
    pub fn file_stem(&self) -> String {
        let stem = self.title.split_whitespace().collect::<Vec<_>>().join("_");
        let stem: String = stem
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '-' } else { c })
            .collect();
        if stem.is_empty() {
            "product".to_string()
        } else {
            stem
        }
    }

    pub fn features_text(&self) -> String {
        self.features.join("\n")
    }

    pub fn set_features_text(&mut self, text: &str) {
        self.features = text
            .lines()
            .map(|l| l.trim().trim_start_matches("- ").trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
    }

    pub fn tags_text(&self) -> String {
        self.tags.join(", ")
    }

    pub fn set_tags_text(&mut self, text: &str) {
        self.tags = text
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
}

/// Models occasionally wrap JSON in a markdown fence despite the JSON mime type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
pub(crate) fn sample() -> ListingRecord {
    ListingRecord {
        title: "Handmade Ceramic Mug".into(),
        description: "A sturdy stoneware mug glazed by hand.".into(),
        features: vec!["350 ml capacity".into(), "Dishwasher safe".into()],
        suggested_price: "$24.99".into(),
        category: "Home & Kitchen".into(),
        tags: vec!["ceramic".into(), "mug".into(), "handmade".into()],
    }
}
