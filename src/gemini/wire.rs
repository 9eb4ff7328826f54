//! JSON bodies exchanged with the Generative Language REST API

use crate::constants::*;
use crate::i18n::Lang;
use crate::types::{AspectRatio, ImageSize, MediaPayload, VideoAspect};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ============================================================================
// generateContent
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn media(media: &MediaPayload) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: media.mime_type.clone(),
                data: media.to_base64(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type", default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image of the first candidate
    pub fn first_image(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }

    /// Why nothing usable came back, for logs and error messages.
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_ref()) {
            return format!("prompt blocked: {reason}");
        }
        match self.candidates.first().and_then(|c| c.finish_reason.as_ref()) {
            Some(reason) => format!("finish reason {reason}"),
            None => "no candidates".to_string(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

// ============================================================================
// predictLongRunning (video)
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PredictLongRunningRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
pub struct VideoInstance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VideoImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoRef>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRef {
    pub uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub aspect_ratio: String,
    pub resolution: String,
    pub sample_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<OperationResponse>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedSample {
    #[serde(default)]
    pub video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl Operation {
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()
            .map(|v| v.uri.as_str())
    }
}

// ============================================================================
// Request builders
// ============================================================================

/// Optional user-supplied context that sharpens the analysis
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub lang: Lang,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub technical_docs: Vec<MediaPayload>,
}

pub fn analyzer_system_prompt(lang: Lang) -> String {
    PRODUCT_ANALYZER_PROMPT.replace("{LANG}", &lang.prompt_name().to_uppercase())
}

pub fn analysis_prompt(ctx: &AnalysisContext) -> String {
    let mut prompt = format!(
        "Analyze these product images comprehensively for e-commerce. Create a professional listing \
         by combining details from all images. If possible, add competitive pricing details based on \
         current market trends. Return results in {}.",
        ctx.lang.prompt_name()
    );
    if let Some(name) = ctx.product_name.as_deref().filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!("\nProduct Name: {}", name.trim()));
    }
    if let Some(desc) = ctx.description.as_deref().filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!("\nAdditional User Description: {}", desc.trim()));
    }
    if !ctx.technical_docs.is_empty() {
        prompt.push_str("\nRefer to the attached technical documents for specifications.");
    }
    prompt
}

pub fn listing_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "features": { "type": "ARRAY", "items": { "type": "STRING" } },
            "suggestedPrice": { "type": "STRING" },
            "category": { "type": "STRING" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["title", "description", "features", "suggestedPrice", "category", "tags"]
    })
}

pub fn analysis_request(images: &[MediaPayload], ctx: &AnalysisContext) -> GenerateContentRequest {
    let mut parts: Vec<Part> = images.iter().map(Part::media).collect();
    parts.extend(ctx.technical_docs.iter().map(Part::media));
    parts.push(Part::text(analysis_prompt(ctx)));

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts,
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(analyzer_system_prompt(ctx.lang))],
        }),
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(listing_schema()),
            ..Default::default()
        }),
    }
}

pub fn image_prompt(base: &str) -> String {
    format!("{} {}. {}", IMAGE_GEN_PREFIX, base.trim(), IMAGE_GEN_SUFFIX)
}

pub fn image_request(prompt: &str, aspect: AspectRatio, size: ImageSize) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part::text(image_prompt(prompt))],
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["TEXT".into(), "IMAGE".into()]),
            image_config: Some(ImageConfig {
                aspect_ratio: aspect.as_str().into(),
                image_size: Some(size.as_str().into()),
            }),
            ..Default::default()
        }),
    }
}

pub fn edit_request(image: &MediaPayload, instruction: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part::media(image), Part::text(instruction.trim())],
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["TEXT".into(), "IMAGE".into()]),
            ..Default::default()
        }),
    }
}

fn video_parameters(aspect: VideoAspect) -> VideoParameters {
    VideoParameters {
        aspect_ratio: aspect.as_str().into(),
        resolution: VIDEO_RESOLUTION.into(),
        sample_count: 1,
    }
}

pub fn video_request(image: &MediaPayload, prompt: String, aspect: VideoAspect) -> PredictLongRunningRequest {
    PredictLongRunningRequest {
        instances: vec![VideoInstance {
            prompt,
            image: Some(VideoImage {
                bytes_base64_encoded: image.to_base64(),
                mime_type: image.mime_type.clone(),
            }),
            video: None,
        }],
        parameters: video_parameters(aspect),
    }
}

pub fn extension_request(previous_uri: &str, aspect: VideoAspect) -> PredictLongRunningRequest {
    PredictLongRunningRequest {
        instances: vec![VideoInstance {
            prompt: VIDEO_CONTINUATION_PROMPT.into(),
            image: None,
            video: Some(VideoRef {
                uri: previous_uri.to_string(),
            }),
        }],
        parameters: video_parameters(aspect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> MediaPayload {
        MediaPayload::new(vec![1, 2, 3], "image/png")
    }

    #[test]
    fn analysis_request_carries_images_docs_and_schema() {
        let ctx = AnalysisContext {
            lang: Lang::En,
            product_name: Some("Mug".into()),
            description: Some("  ".into()),
            technical_docs: vec![MediaPayload::new(b"%PDF".to_vec(), "application/pdf")],
        };
        let body = serde_json::to_value(analysis_request(&[png(), png()], &ctx)).unwrap();

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert_eq!(parts[2]["inlineData"]["mimeType"], "application/pdf");
        let prompt = parts[3]["text"].as_str().unwrap();
        assert!(prompt.contains("Return results in English."));
        assert!(prompt.contains("Product Name: Mug"));
        assert!(!prompt.contains("Additional User Description"));
        assert!(prompt.contains("technical documents"));

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        let required = body["generationConfig"]["responseSchema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 6);
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("ENGLISH"));
    }

    #[test]
    fn turkish_prompt_names_the_language() {
        let ctx = AnalysisContext::default();
        assert!(analysis_prompt(&ctx).ends_with("Return results in Turkish."));
        assert!(analyzer_system_prompt(Lang::Tr).contains("TURKISH"));
    }

    #[test]
    fn image_request_sets_ratio_and_size() {
        let body = serde_json::to_value(image_request("red mug", AspectRatio::FourThree, ImageSize::K2)).unwrap();
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "4:3");
        assert_eq!(body["generationConfig"]["imageConfig"]["imageSize"], "2K");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Professional studio e-commerce photography: red mug. High quality, clean background, product photography style."
        );
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn edit_request_sends_image_before_instruction() {
        let body = serde_json::to_value(edit_request(&png(), " white background ")).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert!(parts[0].get("inlineData").is_some());
        assert_eq!(parts[1]["text"], "white background");
    }

    #[test]
    fn response_accepts_both_inline_data_spellings() {
        let camel: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"here"},{"inlineData":{"mimeType":"image/png","data":"AQID"}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(camel.first_image().unwrap().data, "AQID");

        let snake: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inline_data":{"mime_type":"image/jpeg","data":"AQID"}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(snake.first_image().unwrap().mime_type, "image/jpeg");
        assert!(snake.text().is_none());
    }

    #[test]
    fn empty_reason_reports_blocks() {
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(blocked.empty_reason(), "prompt blocked: SAFETY");
        assert_eq!(GenerateContentResponse::default().empty_reason(), "no candidates");
    }

    #[test]
    fn operation_exposes_video_uri_when_done() {
        let pending: Operation = serde_json::from_str(r#"{"name":"models/veo/operations/1"}"#).unwrap();
        assert!(!pending.done);
        assert!(pending.video_uri().is_none());

        let done: Operation = serde_json::from_str(
            r#"{"name":"models/veo/operations/1","done":true,"response":{"generateVideoResponse":{"generatedSamples":[{"video":{"uri":"https://files/v1?alt=media"}}]}}}"#,
        )
        .unwrap();
        assert_eq!(done.video_uri(), Some("https://files/v1?alt=media"));
    }

    #[test]
    fn extension_request_references_previous_clip() {
        let body = serde_json::to_value(extension_request("https://files/v1", VideoAspect::Portrait)).unwrap();
        let instance = &body["instances"][0];
        assert_eq!(instance["video"]["uri"], "https://files/v1");
        assert_eq!(instance["prompt"], VIDEO_CONTINUATION_PROMPT);
        assert!(instance.get("image").is_none());
        assert_eq!(body["parameters"]["aspectRatio"], "9:16");
        assert_eq!(body["parameters"]["resolution"], "720p");
        assert_eq!(body["parameters"]["sampleCount"], 1);
    }
}
