//! Common types and data structures

use crate::i18n::Lang;
use base64::Engine;
use std::path::PathBuf;

/// Aspect ratios accepted by the image generation model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "3:4")]
    ThreeFour,
    #[serde(rename = "4:3")]
    FourThree,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::ThreeFour,
        AspectRatio::FourThree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::ThreeFour => "3:4",
            AspectRatio::FourThree => "4:3",
        }
    }
}

/// Output resolution tier for generated images
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    K1,
    #[serde(rename = "2K")]
    K2,
    #[serde(rename = "4K")]
    K4,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::K1, ImageSize::K2, ImageSize::K4];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::K1 => "1K",
            ImageSize::K2 => "2K",
            ImageSize::K4 => "4K",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VideoDuration {
    #[default]
    #[serde(rename = "5s")]
    Short,
    /// Rendered as a first clip plus one continuation clip
    #[serde(rename = "12s")]
    Extended,
}

impl VideoDuration {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoDuration::Short => "5s",
            VideoDuration::Extended => "12s",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VideoAspect {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl VideoAspect {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoAspect::Landscape => "16:9",
            VideoAspect::Portrait => "9:16",
        }
    }
}

/// Soundtrack hint passed along in the video prompt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MusicStyle {
    None,
    #[default]
    Energetic,
    Calm,
    Cinematic,
    Corporate,
    Acoustic,
}

impl MusicStyle {
    pub const ALL: [MusicStyle; 6] = [
        MusicStyle::None,
        MusicStyle::Energetic,
        MusicStyle::Calm,
        MusicStyle::Cinematic,
        MusicStyle::Corporate,
        MusicStyle::Acoustic,
    ];

    /// Name used inside the prompt; `None` when no music was requested.
    pub fn prompt_name(self) -> Option<&'static str> {
        match self {
            MusicStyle::None => None,
            MusicStyle::Energetic => Some("Energetic"),
            MusicStyle::Calm => Some("Calm"),
            MusicStyle::Cinematic => Some("Cinematic"),
            MusicStyle::Corporate => Some("Corporate"),
            MusicStyle::Acoustic => Some("Acoustic"),
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (MusicStyle::None, Lang::Tr) => "Yok",
            (MusicStyle::None, Lang::En) => "None",
            (MusicStyle::Energetic, Lang::Tr) => "Enerjik",
            (MusicStyle::Calm, Lang::Tr) => "Sakin",
            (MusicStyle::Cinematic, Lang::Tr) => "Sinematik",
            (MusicStyle::Corporate, Lang::Tr) => "Kurumsal",
            (MusicStyle::Acoustic, Lang::Tr) => "Akustik",
            (style, Lang::En) => style.prompt_name().unwrap_or("None"),
        }
    }
}

/// Encoded image or document bytes with their declared MIME type
#[derive(Clone, Debug, PartialEq)]
pub struct MediaPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl MediaPayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Build a payload from raw bytes, sniffing the image format.
    pub fn sniffed(bytes: Vec<u8>) -> Self {
        let mime = image::guess_format(&bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream");
        Self::new(bytes, mime)
    }

    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> crate::error::Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .map_err(|e| crate::error::Error::InvalidResponse(format!("bad base64 payload: {e}")))?;
        Ok(Self::new(bytes, mime_type))
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn is_png(&self) -> bool {
        self.bytes.starts_with(b"\x89PNG\r\n\x1a\n")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Original,
    Generated,
}

/// One entry of the gallery
#[derive(Clone, Debug)]
pub struct ImageAsset {
    pub id: String,
    pub media: MediaPayload,
    pub kind: ImageKind,
    pub prompt: Option<String>,
    pub alt_text: String,
}

impl ImageAsset {
    pub fn new(media: MediaPayload, kind: ImageKind, alt_text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            media,
            kind,
            prompt: None,
            alt_text: alt_text.into(),
        }
    }
}

/// A finished promo video stored on disk so the system player can open it
#[derive(Clone, Debug)]
pub struct VideoAsset {
    pub id: String,
    pub path: PathBuf,
    pub duration: VideoDuration,
    pub source_index: usize,
    pub size_bytes: u64,
}

/// A filled upload slot on the start screen
#[derive(Clone, Debug)]
pub struct UploadSlot {
    pub file_name: String,
    pub media: MediaPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_the_api() {
        assert_eq!(serde_json::to_string(&AspectRatio::ThreeFour).unwrap(), "\"3:4\"");
        assert_eq!(serde_json::to_string(&ImageSize::K4).unwrap(), "\"4K\"");
        assert_eq!(serde_json::to_string(&VideoDuration::Extended).unwrap(), "\"12s\"");
        for ratio in AspectRatio::ALL {
            assert_eq!(serde_json::to_string(&ratio).unwrap(), format!("\"{}\"", ratio.as_str()));
        }
    }

    #[test]
    fn music_none_has_no_prompt_name() {
        assert_eq!(MusicStyle::None.prompt_name(), None);
        assert_eq!(MusicStyle::Energetic.label(Lang::Tr), "Enerjik");
        assert_eq!(MusicStyle::Calm.label(Lang::En), "Calm");
    }

    #[test]
    fn base64_payload_decodes() {
        let p = MediaPayload::from_base64("aGVsbG8=", "text/plain").unwrap();
        assert_eq!(p.bytes, b"hello");
        assert_eq!(p.to_base64(), "aGVsbG8=");
        assert!(MediaPayload::from_base64("%%%", "image/png").is_err());
    }
}
