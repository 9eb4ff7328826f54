//! Client for the Gemini / Veo generative endpoints

pub mod wire;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::listing::ListingRecord;
use crate::types::{AspectRatio, ImageSize, MediaPayload, VideoAspect};
use crate::video::{OperationStatus, VideoBackend, VideoRequest};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use wire::{AnalysisContext, ApiErrorBody, GenerateContentResponse, Operation};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Pick the first non-blank key from the environment, then the settings file.
pub fn resolve_api_key(settings_key: Option<&str>) -> Result<String> {
    first_key([
        std::env::var(API_KEY_ENV).ok(),
        std::env::var(API_KEY_ENV_FALLBACK).ok(),
        settings_key.map(str::to_string),
    ])
}

fn first_key(candidates: impl IntoIterator<Item = Option<String>>) -> Result<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
        .ok_or(Error::MissingApiKey)
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub analysis_model: String,
    pub image_model: String,
    pub edit_model: String,
    pub video_model: String,
    pub video_extend_model: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
            analysis_model: MODEL_ANALYSIS.to_string(),
            image_model: MODEL_IMAGE_GEN.to_string(),
            edit_model: MODEL_IMAGE_EDIT.to_string(),
            video_model: MODEL_VIDEO_GEN.to_string(),
            video_extend_model: MODEL_VIDEO_EXTEND.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url.trim_end_matches('/'), model, method)
    }

    fn operation_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name.trim_start_matches('/'))
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: Arc<GeminiConfig>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, url: &str, body: &B) -> Result<R> {
        debug!(url, "POST");
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<R>().await?)
    }

    async fn generate_content(&self, model: &str, body: &wire::GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = self.config.model_url(model, "generateContent");
        self.post_json(&url, body).await
    }

    /// Produce a listing from the product photos.
    pub async fn analyze_product(&self, images: &[MediaPayload], ctx: &AnalysisContext) -> Result<ListingRecord> {
        info!(
            images = images.len(),
            docs = ctx.technical_docs.len(),
            lang = ctx.lang.code(),
            "Analyzing product"
        );
        let body = wire::analysis_request(images, ctx);
        let response = match self.generate_content(&self.config.analysis_model, &body).await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, status = ?e.status(), "Product analysis failed");
                return Err(e);
            }
        };
        let text = response
            .text()
            .ok_or_else(|| Error::InvalidResponse(response.empty_reason()))?;
        let listing = ListingRecord::from_json(&text)?;
        info!(title = %listing.title, "Product analysis successful");
        Ok(listing)
    }

    pub async fn generate_image(&self, prompt: &str, aspect: AspectRatio, size: ImageSize) -> Result<MediaPayload> {
        info!(aspect = aspect.as_str(), size = size.as_str(), "Generating product image");
        let body = wire::image_request(prompt, aspect, size);
        let response = self.generate_content(&self.config.image_model, &body).await?;
        image_from(&response)
    }

    /// Apply a free-text instruction to an existing image with the edit model.
    pub async fn edit_image(&self, image: &MediaPayload, instruction: &str) -> Result<MediaPayload> {
        info!(mime = %image.mime_type, bytes = image.bytes.len(), "Editing product image");
        let body = wire::edit_request(image, instruction);
        let response = self.generate_content(&self.config.edit_model, &body).await?;
        image_from(&response)
    }

    async fn start_operation(&self, model: &str, body: &wire::PredictLongRunningRequest) -> Result<OperationStatus> {
        let url = self.config.model_url(model, "predictLongRunning");
        let op: Operation = self.post_json(&url, body).await?;
        info!(operation = %op.name, model, "Video operation started");
        Ok(status_from(op))
    }
}

impl VideoBackend for GeminiClient {
    async fn start_video(&self, request: &VideoRequest) -> Result<OperationStatus> {
        let body = wire::video_request(&request.image, request.enhanced_prompt(), request.aspect);
        self.start_operation(&self.config.video_model, &body).await
    }

    async fn extend_video(&self, previous_uri: &str, aspect: VideoAspect) -> Result<OperationStatus> {
        let body = wire::extension_request(previous_uri, aspect);
        self.start_operation(&self.config.video_extend_model, &body).await
    }

    async fn poll_operation(&self, name: &str) -> Result<OperationStatus> {
        let response = self
            .http
            .get(self.config.operation_url(name))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        let op: Operation = check_status(response).await?.json().await?;
        Ok(status_from(op))
    }

    async fn download_video(&self, uri: &str) -> Result<Vec<u8>> {
        debug!(uri, "Downloading video");
        let response = self
            .http
            .get(uri)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        let response = check_status(response).await?;

        let mut bytes = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            bytes.extend_from_slice(&chunk?);
        }
        Ok(bytes)
    }
}

fn image_from(response: &GenerateContentResponse) -> Result<MediaPayload> {
    let Some(inline) = response.first_image() else {
        error!(reason = %response.empty_reason(), "No image in response");
        return Err(Error::NoImage);
    };
    let mime = if inline.mime_type.is_empty() { "image/png" } else { inline.mime_type.as_str() };
    MediaPayload::from_base64(&inline.data, mime)
}

fn status_from(op: Operation) -> OperationStatus {
    let video_uri = op.video_uri().map(str::to_string);
    OperationStatus {
        error: op.error.map(|e| format!("{} (code {})", e.message, e.code)),
        name: op.name,
        done: op.done,
        video_uri,
    }
}

/// Turn non-2xx responses into `Error::Api`, decoding the provider's error body when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

fn api_error(status: reqwest::StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => Error::Api {
            code: if parsed.error.code == 0 { status.as_u16() } else { parsed.error.code },
            status: parsed.error.status,
            message: parsed.error.message,
        },
        Err(_) => Error::Api {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default().to_string(),
            message: body.chars().take(300).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_skipped() {
        let key = first_key([Some("  ".into()), None, Some(" abc ".into())]).unwrap();
        assert_eq!(key, "abc");
    }

    #[test]
    fn no_key_is_a_configuration_error() {
        let err = first_key([None, Some(String::new())]).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn urls_are_built_from_base() {
        let config = GeminiConfig::new("k").with_base_url("http://localhost:9000/v1beta/");
        assert_eq!(
            config.model_url("veo-3.1-fast-generate-preview", "predictLongRunning"),
            "http://localhost:9000/v1beta/models/veo-3.1-fast-generate-preview:predictLongRunning"
        );
        assert_eq!(
            config.operation_url("models/veo/operations/abc"),
            "http://localhost:9000/v1beta/models/veo/operations/abc"
        );
    }

    #[test]
    fn provider_error_body_is_decoded() {
        let err = api_error(
            reqwest::StatusCode::FORBIDDEN,
            r#"{"error":{"code":403,"message":"API key not valid.","status":"PERMISSION_DENIED"}}"#,
        );
        match err {
            Error::Api { code, status, message } => {
                assert_eq!(code, 403);
                assert_eq!(status, "PERMISSION_DENIED");
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn plain_error_body_keeps_status() {
        let err = api_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn image_response_is_decoded() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"AQID"}}]}}]}"#,
        )
        .unwrap();
        let image = image_from(&response).unwrap();
        assert_eq!(image.bytes, vec![1, 2, 3]);
        assert_eq!(image.mime_type, "image/png");

        let empty = GenerateContentResponse::default();
        assert!(matches!(image_from(&empty), Err(Error::NoImage)));
    }

    #[test]
    fn operation_errors_are_carried_over() {
        let op: Operation = serde_json::from_str(
            r#"{"name":"operations/9","done":true,"error":{"code":3,"message":"blocked"}}"#,
        )
        .unwrap();
        let status = status_from(op);
        assert!(status.done);
        assert_eq!(status.error.as_deref(), Some("blocked (code 3)"));
        assert!(status.video_uri.is_none());
    }
}
