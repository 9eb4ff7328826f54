//! App module - application state, background tasks and rendering

mod exports;
mod modals;
mod session;
mod tasks;
mod uploads;
mod views;

use session::Session;
use tasks::TaskState;

use crate::gemini::{resolve_api_key, GeminiClient, GeminiConfig};
use crate::i18n::Lang;
use crate::settings::Settings;
use crate::theme;
use crate::types::MediaPayload;
use crate::utils::load_texture;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) data_dir: PathBuf,
    pub(crate) settings: Settings,
    /// None until an API key is found; actions then raise the missing-key alert.
    pub(crate) client: Option<GeminiClient>,
    pub(crate) session: Session,
    pub(crate) task: Arc<Mutex<TaskState>>,
    // Decoded previews keyed by asset id or upload slot
    pub(crate) textures: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Listing card edit mode
    pub(crate) editing_listing: bool,
    pub(crate) edit_features: String,
    pub(crate) edit_tags: String,
    // Dialogs
    pub(crate) show_image_dialog: bool,
    pub(crate) show_video_dialog: bool,
    pub(crate) show_reset_confirm: bool,
    pub(crate) alert: Option<String>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Central panel rect for toast positioning
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window geometry
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

fn build_client(settings: &Settings) -> crate::error::Result<GeminiClient> {
    let key = resolve_api_key(settings.api_key.as_deref())?;
    let mut config = GeminiConfig::new(key);
    if let Some(url) = settings.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        config = config.with_base_url(url.trim());
    }
    Ok(GeminiClient::new(config))
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;

        let (client, alert) = match build_client(&settings) {
            Ok(client) => {
                info!(base_url = %client.config().base_url, "Gemini client ready");
                (Some(client), None)
            }
            Err(e) => {
                error!(error = %e, "Gemini client unavailable");
                (None, Some(e.user_hint(settings.lang)))
            }
        };

        Ok(Self {
            runtime,
            data_dir,
            settings,
            client,
            session: Session::default(),
            task: Arc::new(Mutex::new(TaskState::default())),
            textures: HashMap::new(),
            logo_texture: None,
            editing_listing: false,
            edit_features: String::new(),
            edit_tags: String::new(),
            show_image_dialog: false,
            show_video_dialog: false,
            show_reset_confirm: false,
            alert,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn lang(&self) -> Lang {
        self.settings.lang
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    /// Start over with a new product. Generation options and language are kept.
    pub fn reset(&mut self) {
        info!("Starting a new product");
        self.discard_video();
        self.session.reset();
        self.textures.clear();
        self.editing_listing = false;
        self.show_image_dialog = false;
        self.show_video_dialog = false;
        self.show_reset_confirm = false;
    }
}

/// Cached texture for an image, decoded on first use. Undecodable images stay `None`.
pub(crate) fn cached_texture(
    textures: &mut HashMap<String, Option<egui::TextureHandle>>,
    ctx: &egui::Context,
    key: &str,
    media: &MediaPayload,
) -> Option<egui::TextureHandle> {
    textures
        .entry(key.to_string())
        .or_insert_with(|| load_texture(ctx, key, media))
        .clone()
}
