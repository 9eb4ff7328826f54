//! Application constants and configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Listing Studio";

pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_ENV_FALLBACK: &str = "GOOGLE_API_KEY";

pub const MODEL_ANALYSIS: &str = "gemini-3-pro-preview";
pub const MODEL_IMAGE_GEN: &str = "gemini-3-pro-image-preview";
pub const MODEL_IMAGE_EDIT: &str = "gemini-2.5-flash-image";
pub const MODEL_VIDEO_GEN: &str = "veo-3.1-fast-generate-preview";
/// Continuation clips need the full model; the fast variant cannot extend.
pub const MODEL_VIDEO_EXTEND: &str = "veo-3.1-generate-preview";

pub const VIDEO_POLL_INTERVAL_SECS: u64 = 10;
pub const VIDEO_RESOLUTION: &str = "720p";
pub const VIDEO_CONTINUATION_PROMPT: &str =
    "Video continues, keep showing the product from different angles.";

pub const UPLOAD_SLOTS: usize = 4;

/// System instruction for the analysis call. `{LANG}` is replaced with the upper-cased language name.
pub const PRODUCT_ANALYZER_PROMPT: &str = "You are an expert e-commerce product specialist.
Analyze the provided image and create optimized product content for platforms like Amazon, Etsy, or eBay.
Prepare all content in {LANG}.
Return the response in this JSON format: title, description, features (array), suggestedPrice, category, and tags (array).";

pub const IMAGE_GEN_PREFIX: &str = "Professional studio e-commerce photography:";
pub const IMAGE_GEN_SUFFIX: &str = "High quality, clean background, product photography style.";
