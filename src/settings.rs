//! User settings stored as settings.json in the app data directory

use crate::constants::VIDEO_POLL_INTERVAL_SECS;
use crate::i18n::Lang;
use crate::types::{AspectRatio, ImageSize, MusicStyle, VideoAspect, VideoDuration};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    pub lang: Lang,

    // Last used generation options
    pub image_aspect: AspectRatio,
    pub image_size: ImageSize,
    pub video_duration: VideoDuration,
    pub video_aspect: VideoAspect,
    pub music_style: MusicStyle,

    // Paths
    pub export_dir: Option<String>,

    // Backend
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub poll_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            lang: Lang::default(),
            image_aspect: AspectRatio::default(),
            image_size: ImageSize::default(),
            video_duration: VideoDuration::default(),
            video_aspect: VideoAspect::default(),
            music_style: MusicStyle::default(),
            export_dir: None,
            api_key: None,
            api_base_url: None,
            poll_interval_secs: VIDEO_POLL_INTERVAL_SECS,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Where save dialogs open; the user's download folder unless overridden.
    pub fn export_dir_or_default(&self) -> PathBuf {
        self.export_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Poll interval for video operations, never below one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            lang: Lang::En,
            image_aspect: AspectRatio::Portrait,
            video_duration: VideoDuration::Extended,
            music_style: MusicStyle::Calm,
            export_dir: Some("/tmp/exports".into()),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn missing_or_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());

        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"lang":"en","image_aspect":"16:9","video_duration":"12s"}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.lang, Lang::En);
        assert_eq!(settings.image_aspect, AspectRatio::Landscape);
        assert_eq!(settings.video_duration, VideoDuration::Extended);
        assert_eq!(settings.poll_interval(), Duration::from_secs(10));
        assert_eq!(settings.music_style, MusicStyle::Energetic);
    }
}
