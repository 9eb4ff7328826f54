//! Background operations: one at a time on the app runtime, results handed
//! back through `TaskState` and picked up on the next frame.

use super::App;
use crate::error::{Error, Result};
use crate::export::{self, ExportFormat, ExportInput};
use crate::gemini::GeminiClient;
use crate::i18n::Strings;
use crate::listing::ListingRecord;
use crate::types::{MediaPayload, VideoAsset};
use crate::utils::videos_dir;
use crate::video::{run_video_job, VideoProgress, VideoRequest, VideoStage};
use eframe::egui;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Analysis,
    ImageGeneration,
    ImageEdit,
    Video,
    Export,
}

impl TaskKind {
    pub fn loading_message(self, s: &Strings) -> &'static str {
        match self {
            TaskKind::Analysis => s.analyzing,
            TaskKind::ImageGeneration => s.studio_lights,
            TaskKind::ImageEdit => s.pixels_processing,
            TaskKind::Video => s.director_chair,
            TaskKind::Export => s.preparing_export,
        }
    }

    pub fn failure_message(self, s: &Strings) -> &'static str {
        match self {
            TaskKind::Analysis => s.analysis_failed,
            TaskKind::ImageGeneration => s.generation_failed,
            TaskKind::ImageEdit => s.edit_failed,
            TaskKind::Video => s.video_failed,
            TaskKind::Export => s.export_failed,
        }
    }
}

pub enum TaskOutcome {
    Analyzed { listing: ListingRecord, images: Vec<MediaPayload> },
    ImageGenerated { media: MediaPayload, prompt: String, alt: String },
    ImageEdited { id: String, media: MediaPayload },
    VideoReady(VideoAsset),
    Exported(PathBuf),
    Failed { kind: TaskKind, error: Error },
}

#[derive(Default)]
pub struct TaskState {
    pub running: Option<TaskKind>,
    pub video_progress: Option<VideoProgress>,
    pub outcome: Option<TaskOutcome>,
}

pub(crate) fn lock(state: &Mutex<TaskState>) -> MutexGuard<'_, TaskState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Localized "stage · N checks" line for the loading overlay.
pub fn progress_line(progress: VideoProgress, s: &Strings) -> String {
    let stage = match progress.stage {
        VideoStage::FirstClip => s.video_stage_first,
        VideoStage::Continuation => s.video_stage_extend,
        VideoStage::Download => s.video_stage_download,
    };
    if progress.polls == 0 {
        stage.to_string()
    } else {
        format!("{stage} · {} {}", progress.polls, s.poll_count)
    }
}

fn outcome_of<T>(kind: TaskKind, result: Result<T>, ok: impl FnOnce(T) -> TaskOutcome) -> TaskOutcome {
    match result {
        Ok(value) => ok(value),
        Err(error) => TaskOutcome::Failed { kind, error },
    }
}

/// Run the video job and store the clip under `dir` as `{uuid}.mp4`.
async fn render_video<F>(
    client: &GeminiClient,
    request: &VideoRequest,
    interval: Duration,
    dir: &Path,
    source_index: usize,
    on_progress: F,
) -> Result<VideoAsset>
where
    F: FnMut(VideoProgress) + Send,
{
    let bytes = run_video_job(client, request, interval, on_progress).await?;

    tokio::fs::create_dir_all(dir).await?;
    let id = uuid::Uuid::new_v4().to_string();
    let path = dir.join(format!("{id}.mp4"));
    tokio::fs::write(&path, &bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "Video saved");

    Ok(VideoAsset {
        id,
        path,
        duration: request.duration,
        source_index,
        size_bytes: bytes.len() as u64,
    })
}

impl App {
    pub fn is_busy(&self) -> bool {
        let state = lock(&self.task);
        state.running.is_some() || state.outcome.is_some()
    }

    fn client_or_alert(&mut self) -> Option<GeminiClient> {
        if self.client.is_none() {
            self.alert = Some(Error::MissingApiKey.user_hint(self.lang()));
        }
        self.client.clone()
    }

    fn spawn_task<F>(&mut self, ctx: &egui::Context, kind: TaskKind, task: F)
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        {
            let mut state = lock(&self.task);
            if let Some(running) = state.running {
                warn!(?running, requested = ?kind, "Task already running, ignoring request");
                return;
            }
            state.running = Some(kind);
            state.video_progress = None;
        }
        info!(?kind, "Task started");

        let state = self.task.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = task.await;
            {
                let mut s = lock(&state);
                s.running = None;
                s.outcome = Some(outcome);
            }
            ctx.request_repaint();
        });
    }

    pub fn start_analysis(&mut self, ctx: &egui::Context) {
        if !self.session.has_uploads() {
            self.alert = Some(self.lang().strings().need_image.to_string());
            return;
        }
        let Some(client) = self.client_or_alert() else { return };
        let images = self.session.uploaded_images();
        let context = self.session.analysis_context(self.lang());

        self.spawn_task(ctx, TaskKind::Analysis, async move {
            let result = client.analyze_product(&images, &context).await;
            outcome_of(TaskKind::Analysis, result, |listing| TaskOutcome::Analyzed { listing, images })
        });
    }

    pub fn start_image_generation(&mut self, ctx: &egui::Context) {
        let prompt = self.session.image_prompt.trim().to_string();
        if prompt.is_empty() || self.session.listing.is_none() {
            return;
        }
        let Some(client) = self.client_or_alert() else { return };
        let alt = self.session.image_alt.clone();
        let (aspect, size) = (self.settings.image_aspect, self.settings.image_size);

        self.spawn_task(ctx, TaskKind::ImageGeneration, async move {
            let result = client.generate_image(&prompt, aspect, size).await;
            outcome_of(TaskKind::ImageGeneration, result, |media| TaskOutcome::ImageGenerated { media, prompt, alt })
        });
    }

    pub fn start_image_edit(&mut self, ctx: &egui::Context) {
        let instruction = self.session.edit_instruction.trim().to_string();
        let Some(asset) = self.session.selected_image() else { return };
        if instruction.is_empty() {
            return;
        }
        let (id, media) = (asset.id.clone(), asset.media.clone());
        let Some(client) = self.client_or_alert() else { return };

        self.spawn_task(ctx, TaskKind::ImageEdit, async move {
            let result = client.edit_image(&media, &instruction).await;
            outcome_of(TaskKind::ImageEdit, result, |media| TaskOutcome::ImageEdited { id, media })
        });
    }

    pub fn start_video(&mut self, ctx: &egui::Context) {
        let prompt = self.session.video_prompt.trim().to_string();
        let source_index = self.session.video_source_index();
        let Some(source) = self.session.video_source_image() else { return };
        if prompt.is_empty() {
            return;
        }
        let request = VideoRequest {
            image: source.media.clone(),
            prompt,
            duration: self.settings.video_duration,
            music: self.settings.music_style,
            aspect: self.settings.video_aspect,
        };
        let Some(client) = self.client_or_alert() else { return };
        let interval = self.settings.poll_interval();
        let dir = videos_dir(&self.data_dir);
        let state = self.task.clone();
        let repaint = ctx.clone();

        self.spawn_task(ctx, TaskKind::Video, async move {
            let result = render_video(&client, &request, interval, &dir, source_index, |progress| {
                lock(&state).video_progress = Some(progress);
                repaint.request_repaint();
            })
            .await;
            outcome_of(TaskKind::Video, result, TaskOutcome::VideoReady)
        });
    }

    pub fn start_export(&mut self, ctx: &egui::Context, format: ExportFormat, path: PathBuf) {
        let input = ExportInput {
            listing: self.session.listing.clone(),
            lang: self.lang(),
            gallery: if format == ExportFormat::GalleryZip { self.session.gallery.clone() } else { Vec::new() },
            hero: self.session.selected_image().map(|a| a.media.clone()),
        };

        self.spawn_task(ctx, TaskKind::Export, async move {
            let result = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
                let bytes = export::render(format, &input)?;
                export::write_file(&path, &bytes)?;
                Ok(path)
            })
            .await
            .unwrap_or_else(|e| Err(Error::Io(std::io::Error::other(e))));
            outcome_of(TaskKind::Export, result, TaskOutcome::Exported)
        });
    }

    /// Apply a finished task's result to the session. Called once per frame.
    pub fn poll_task(&mut self) {
        let Some(outcome) = lock(&self.task).outcome.take() else { return };
        let s = self.lang().strings();

        match outcome {
            TaskOutcome::Analyzed { listing, images } => {
                info!(title = %listing.title, images = images.len(), "Listing ready");
                self.textures.clear();
                self.editing_listing = false;
                self.session.apply_analysis(listing, images, self.lang());
            }
            TaskOutcome::ImageGenerated { media, prompt, alt } => {
                self.session.add_generated(media, prompt, alt);
                self.show_image_dialog = false;
            }
            TaskOutcome::ImageEdited { id, media } => {
                if self.session.replace_image(&id, media) {
                    self.textures.remove(&id);
                } else {
                    warn!(id, "Edited image no longer in gallery");
                }
            }
            TaskOutcome::VideoReady(video) => {
                self.discard_video();
                self.session.video = Some(video);
                self.session.video_source = None;
                self.show_video_dialog = false;
            }
            TaskOutcome::Exported(path) => {
                let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
                self.show_toast(format!("{}: {}", s.export_saved, name));
            }
            TaskOutcome::Failed { kind, error } => {
                error!(?kind, error = %error, status = ?error.status(), "Task failed");
                self.alert = Some(format!("{}\n\n{}", kind.failure_message(s), error.user_hint(self.lang())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;

    #[test]
    fn progress_line_shows_stage_and_polls() {
        let s = Lang::En.strings();
        let line = progress_line(VideoProgress { stage: VideoStage::Continuation, polls: 3 }, s);
        assert_eq!(line, "Shooting the continuation · 3 checks");
        let line = progress_line(VideoProgress { stage: VideoStage::Download, polls: 0 }, s);
        assert_eq!(line, "Downloading video");
    }

    #[test]
    fn failures_map_to_their_own_alert() {
        let s = Lang::En.strings();
        assert_eq!(TaskKind::Video.failure_message(s), "Could not generate video.");
        assert_eq!(TaskKind::ImageEdit.loading_message(s), s.pixels_processing);
    }

    #[test]
    fn failed_results_carry_kind() {
        let outcome = outcome_of(TaskKind::ImageEdit, Err::<(), _>(Error::NoImage), |_| unreachable!());
        assert!(matches!(outcome, TaskOutcome::Failed { kind: TaskKind::ImageEdit, error: Error::NoImage }));
    }
}
