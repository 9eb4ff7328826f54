//! Promo video job: start, poll until done, optionally extend once, download

use crate::error::{Error, Result};
use crate::types::{MediaPayload, MusicStyle, VideoAspect, VideoDuration};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub image: MediaPayload,
    pub prompt: String,
    pub duration: VideoDuration,
    pub music: MusicStyle,
    pub aspect: VideoAspect,
}

impl VideoRequest {
    pub fn enhanced_prompt(&self) -> String {
        let music = self
            .music
            .prompt_name()
            .map(|m| format!(" Music style: {m}."))
            .unwrap_or_default();
        format!(
            "Product promotion: {}.{} Professional e-commerce ad, smooth camera movements.",
            self.prompt.trim(),
            music
        )
    }
}

/// Snapshot of a long-running operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationStatus {
    pub name: String,
    pub done: bool,
    pub video_uri: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoStage {
    FirstClip,
    Continuation,
    Download,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoProgress {
    pub stage: VideoStage,
    pub polls: u32,
}

/// Backend operations the video job needs.
pub trait VideoBackend {
    fn start_video(&self, request: &VideoRequest) -> impl Future<Output = Result<OperationStatus>> + Send;

    /// Start a continuation clip that picks up from `previous_uri`.
    fn extend_video(
        &self,
        previous_uri: &str,
        aspect: VideoAspect,
    ) -> impl Future<Output = Result<OperationStatus>> + Send;

    fn poll_operation(&self, name: &str) -> impl Future<Output = Result<OperationStatus>> + Send;

    fn download_video(&self, uri: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Run a full video job and return the encoded clip.
///
/// Each operation is polled every `interval` until its `done` flag is set. The
/// 12 second tier chains exactly one continuation onto the first clip.
pub async fn run_video_job<B, F>(
    backend: &B,
    request: &VideoRequest,
    interval: Duration,
    mut on_progress: F,
) -> Result<Vec<u8>>
where
    B: VideoBackend + Sync,
    F: FnMut(VideoProgress) + Send,
{
    info!(
        duration = request.duration.as_str(),
        aspect = request.aspect.as_str(),
        "Starting video job"
    );

    on_progress(VideoProgress { stage: VideoStage::FirstClip, polls: 0 });
    let first = backend.start_video(request).await?;
    let mut uri = wait_for(backend, first, VideoStage::FirstClip, interval, &mut on_progress).await?;

    if request.duration == VideoDuration::Extended {
        on_progress(VideoProgress { stage: VideoStage::Continuation, polls: 0 });
        let continuation = backend.extend_video(&uri, request.aspect).await?;
        uri = wait_for(backend, continuation, VideoStage::Continuation, interval, &mut on_progress).await?;
    }

    on_progress(VideoProgress { stage: VideoStage::Download, polls: 0 });
    let bytes = backend.download_video(&uri).await?;
    info!(bytes = bytes.len(), "Video job complete");
    Ok(bytes)
}

async fn wait_for<B, F>(
    backend: &B,
    mut op: OperationStatus,
    stage: VideoStage,
    interval: Duration,
    on_progress: &mut F,
) -> Result<String>
where
    B: VideoBackend + Sync,
    F: FnMut(VideoProgress) + Send,
{
    let mut polls = 0;
    while !op.done {
        tokio::time::sleep(interval).await;
        let name = op.name.clone();
        op = backend.poll_operation(&name).await?;
        polls += 1;
        debug!(operation = %op.name, polls, done = op.done, "Polled video operation");
        on_progress(VideoProgress { stage, polls });
    }

    if let Some(message) = op.error {
        warn!(operation = %op.name, error = %message, "Video operation failed");
        return Err(Error::VideoOperation { name: op.name, message });
    }
    op.video_uri.ok_or_else(|| Error::VideoOperation {
        name: op.name,
        message: "finished without a video".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::VIDEO_POLL_INTERVAL_SECS;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(VIDEO_POLL_INTERVAL_SECS);

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Start,
        Extend(String),
        Poll(String),
        Download(String),
    }

    /// Scripted backend: each operation name maps to the statuses its polls return.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<Call>>,
        scripts: Mutex<Vec<(String, VecDeque<OperationStatus>)>>,
    }

    fn pending(name: &str) -> OperationStatus {
        OperationStatus { name: name.into(), done: false, video_uri: None, error: None }
    }

    fn finished(name: &str, uri: &str) -> OperationStatus {
        OperationStatus { name: name.into(), done: true, video_uri: Some(uri.into()), error: None }
    }

    impl FakeBackend {
        fn script(self, name: &str, polls: Vec<OperationStatus>) -> Self {
            self.scripts.lock().unwrap().push((name.into(), polls.into()));
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl VideoBackend for FakeBackend {
        async fn start_video(&self, _request: &VideoRequest) -> Result<OperationStatus> {
            self.calls.lock().unwrap().push(Call::Start);
            Ok(pending("op-1"))
        }

        async fn extend_video(&self, previous_uri: &str, _aspect: VideoAspect) -> Result<OperationStatus> {
            self.calls.lock().unwrap().push(Call::Extend(previous_uri.into()));
            Ok(pending("op-2"))
        }

        async fn poll_operation(&self, name: &str) -> Result<OperationStatus> {
            self.calls.lock().unwrap().push(Call::Poll(name.into()));
            let mut scripts = self.scripts.lock().unwrap();
            let (_, queue) = scripts
                .iter_mut()
                .find(|(n, _)| n == name)
                .expect("unscripted operation");
            Ok(queue.pop_front().expect("polled past the script"))
        }

        async fn download_video(&self, uri: &str) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push(Call::Download(uri.into()));
            Ok(uri.as_bytes().to_vec())
        }
    }

    fn request(duration: VideoDuration) -> VideoRequest {
        VideoRequest {
            image: MediaPayload::new(vec![0], "image/png"),
            prompt: "Promotion for: Mug".into(),
            duration,
            music: MusicStyle::Energetic,
            aspect: VideoAspect::Landscape,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn short_video_waits_for_done_before_downloading() {
        let backend = FakeBackend::default().script(
            "op-1",
            vec![pending("op-1"), pending("op-1"), finished("op-1", "uri-1")],
        );
        let started = tokio::time::Instant::now();
        let mut progress = Vec::new();

        let bytes = run_video_job(&backend, &request(VideoDuration::Short), DEFAULT_POLL_INTERVAL, |p| {
            progress.push(p)
        })
        .await
        .unwrap();

        assert_eq!(bytes, b"uri-1");
        assert_eq!(
            backend.calls(),
            vec![
                Call::Start,
                Call::Poll("op-1".into()),
                Call::Poll("op-1".into()),
                Call::Poll("op-1".into()),
                Call::Download("uri-1".into()),
            ]
        );
        assert_eq!(started.elapsed(), Duration::from_secs(30));
        assert_eq!(
            progress.last(),
            Some(&VideoProgress { stage: VideoStage::Download, polls: 0 })
        );
        assert!(progress.contains(&VideoProgress { stage: VideoStage::FirstClip, polls: 3 }));
    }

    #[tokio::test(start_paused = true)]
    async fn extended_video_chains_exactly_one_continuation() {
        let backend = FakeBackend::default()
            .script("op-1", vec![finished("op-1", "uri-1")])
            .script("op-2", vec![pending("op-2"), finished("op-2", "uri-2")]);

        let bytes = run_video_job(&backend, &request(VideoDuration::Extended), DEFAULT_POLL_INTERVAL, |_| {})
            .await
            .unwrap();

        assert_eq!(bytes, b"uri-2");
        let calls = backend.calls();
        let extends: Vec<_> = calls.iter().filter(|c| matches!(c, Call::Extend(_))).collect();
        assert_eq!(extends, vec![&Call::Extend("uri-1".into())]);
        assert_eq!(calls.last(), Some(&Call::Download("uri-2".into())));
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::Download(_))).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn short_video_never_extends() {
        let backend = FakeBackend::default().script("op-1", vec![finished("op-1", "uri-1")]);
        run_video_job(&backend, &request(VideoDuration::Short), DEFAULT_POLL_INTERVAL, |_| {})
            .await
            .unwrap();
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::Extend(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_operation_stops_before_download() {
        let mut failed = pending("op-1");
        failed.done = true;
        failed.error = Some("safety filter".into());
        let backend = FakeBackend::default().script("op-1", vec![failed]);

        let err = run_video_job(&backend, &request(VideoDuration::Extended), DEFAULT_POLL_INTERVAL, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, Error::VideoOperation { ref message, .. } if message == "safety filter"));
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::Download(_) | Call::Extend(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn done_without_video_is_an_error() {
        let mut empty = pending("op-1");
        empty.done = true;
        let backend = FakeBackend::default().script("op-1", vec![empty]);

        let err = run_video_job(&backend, &request(VideoDuration::Short), DEFAULT_POLL_INTERVAL, |_| {})
            .await
            .unwrap_err();
        assert!(err.to_string().contains("finished without a video"));
    }

    #[test]
    fn prompt_mentions_music_only_when_chosen() {
        let mut req = request(VideoDuration::Short);
        assert_eq!(
            req.enhanced_prompt(),
            "Product promotion: Promotion for: Mug. Music style: Energetic. Professional e-commerce ad, smooth camera movements."
        );
        req.music = MusicStyle::None;
        assert_eq!(
            req.enhanced_prompt(),
            "Product promotion: Promotion for: Mug. Professional e-commerce ad, smooth camera movements."
        );
    }
}
