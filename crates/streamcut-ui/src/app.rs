// src/app.rs (streamcut-ui)
use streamcut_core::commands::AppCommand;
use streamcut_core::messages::ClipRequest;
use streamcut_core::state::{AssetStatus, ClipJob, SessionState, View};
use streamcut_core::{RangeEffect, RangeEvent};
use streamcut_api::{ApiWorker, ServiceClient, ServiceConfig};
use streamcut_media::HlsBackend;
use crate::context::AppContext;
use crate::theme::configure_style;
use crate::modules::{
    PanelModule,
    library::LibraryPanel,
    player::PlayerPanel,
    share::SharePanel,
    trimmer::TrimmerPanel,
    upload::UploadPanel,
};
use crate::streamcut_log;
use eframe::egui;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
struct AppStorage {
    session: SessionState,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct StreamCutApp {
    state:   SessionState,
    context: AppContext,
    // Panels as concrete types — eliminates per-frame name-string lookup
    // and makes typos a compile error instead of a silently blank panel.
    library: LibraryPanel,
    player:  PlayerPanel,
    trimmer: TrimmerPanel,
    share:   SharePanel,
    upload:  UploadPanel,
    /// Commands emitted by panels each frame, processed after the UI pass
    pending_cmds: Vec<AppCommand>,
}

impl StreamCutApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode — prevents egui overwriting our theme on OS
        // light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let state = cc.storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
            .map(|d| d.session)
            .unwrap_or_default();

        let api = ApiWorker::new(ServiceClient::new(ServiceConfig::from_env()));
        for asset in &state.library {
            // Poster textures are runtime-only, and an asset that was
            // preparing at exit may be ready now — refresh both on startup.
            match (&asset.status, &asset.playback_id) {
                (AssetStatus::Ready, Some(pid)) => api.probe_poster(asset.id, pid.clone()),
                (AssetStatus::Preparing, _)     => api.refresh_asset(asset.asset_id.clone()),
                _ => {}
            }
        }
        streamcut_log!("[app] restored {} assets", state.library.len());

        let context = AppContext::new(api, Box::new(HlsBackend::new()));

        Self {
            state,
            context,
            library:      LibraryPanel,
            player:       PlayerPanel::new(),
            trimmer:      TrimmerPanel::new(),
            share:        SharePanel::new(),
            upload:       UploadPanel,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: AppCommand) {
        match cmd {
            // ── Playback ─────────────────────────────────────────────────────
            AppCommand::Play => {
                let total = self.state.selected_duration();
                if total > 0.0 && self.state.current_time >= total - 0.1 {
                    self.state.current_time = 0.0;
                    self.context.player.seek(0.0);
                }
                self.state.is_playing = true;
                self.context.player.set_paused(false);
            }
            AppCommand::Pause => {
                self.state.is_playing = false;
                self.context.player.set_paused(true);
            }
            AppCommand::SetPlayhead(t) => {
                self.state.current_time = t.max(0.0);
                self.context.player.seek(self.state.current_time);
                self.context.drop_pending_frame();
            }
            AppCommand::ClearPlaybackError => {
                self.state.playback_error = None;
            }

            // ── Navigation / library ─────────────────────────────────────────
            AppCommand::OpenLibrary => {
                self.state.view = View::Library;
            }
            AppCommand::OpenPlayer(id) => {
                self.open_asset(id, View::Player);
            }
            AppCommand::OpenTrimmer(id) => {
                self.open_asset(id, View::Trimmer);
            }
            AppCommand::SelectAsset(id) => {
                self.state.selected_asset = id;
            }
            AppCommand::ForgetAsset(id) => {
                self.context.posters.remove(&id);
                self.context.frame_cache.remove(&id);
                self.state.delete_asset(id);
            }

            // ── Clip range selection ─────────────────────────────────────────
            // The marker write lands first; the seek effect runs after.
            // A rapid double-mark therefore cannot race its own seek.
            AppCommand::MarkStart => {
                let pos = self.state.current_time;
                let fx = self.state.selection.apply(RangeEvent::MarkStart(pos));
                self.run_range_effect(fx);
            }
            AppCommand::MarkEnd => {
                let pos = self.state.current_time;
                let fx = self.state.selection.apply(RangeEvent::MarkEnd(pos));
                self.run_range_effect(fx);
            }
            AppCommand::RangeWidgetUpdate { start, end } => {
                let fx = self.state.selection.apply(RangeEvent::WidgetUpdate { start, end });
                self.run_range_effect(fx);
            }
            AppCommand::ClearRange => {
                let fx = self.state.selection.apply(RangeEvent::Clear);
                self.run_range_effect(fx);
            }
            AppCommand::CreateClip => {
                self.submit_clip();
            }
            AppCommand::ClearClipStatus => {
                self.state.clip_error = None;
            }

            // ── Upload ───────────────────────────────────────────────────────
            AppCommand::UploadFile(path) => {
                if self.state.upload_job.is_some() {
                    // One transfer at a time; the panel greys its button
                    // out but drag-and-drop can still land here.
                    return;
                }
                let title = path.file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                let job = Uuid::new_v4();
                self.state.upload_job      = Some(job);
                self.state.upload_progress = None;
                self.state.upload_done     = None;
                self.state.upload_error    = None;
                self.context.api.start_upload(job, path, title);
            }
            AppCommand::ClearUploadStatus => {
                self.state.upload_done  = None;
                self.state.upload_error = None;
            }

            // ── Share / report ───────────────────────────────────────────────
            AppCommand::SetShareStatus(msg) => {
                self.state.share_status = Some(msg);
            }
            AppCommand::ClearShareStatus => {
                self.state.share_status = None;
            }
            AppCommand::SubmitReport { playback_id, reason, comment } => {
                self.state.report_error = None;
                self.context.api.file_report(playback_id, reason, comment);
            }
        }
    }

    fn open_asset(&mut self, id: Uuid, view: View) {
        if self.state.selected_asset != Some(id) {
            self.state.selected_asset = Some(id);
            self.state.current_time   = 0.0;
            self.state.is_playing     = false;
            self.state.playback_error = None;
            self.state.selection      = Default::default();
        }
        self.state.view = view;
    }

    fn run_range_effect(&mut self, fx: Option<RangeEffect>) {
        match fx {
            Some(RangeEffect::SeekTo(t)) => {
                self.state.current_time = t;
                self.context.player.seek(t);
                self.context.drop_pending_frame();
            }
            None => {}
        }
    }

    fn submit_clip(&mut self) {
        if self.state.clip_job.is_some() {
            return; // one request in flight at a time
        }
        let Some(asset) = self.state.selected().cloned() else { return };
        let Some((start_time, end_time)) = self.state.selection.bounds() else { return };
        if !asset.is_ready() {
            self.state.clip_error = Some("source asset is not ready yet".into());
            return;
        }

        let job = Uuid::new_v4();
        self.state.clip_job = Some(ClipJob {
            job,
            source: asset.id,
            start_time,
            end_time,
        });
        self.state.clip_error = None;
        self.context.api.create_clip(job, ClipRequest {
            source_id: asset.asset_id,
            start_time,
            end_time,
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in files {
            if let Some(path) = file.path {
                self.pending_cmds.push(AppCommand::UploadFile(path));
            }
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for StreamCutApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Runtime-only fields are serde(skip); the snapshot is just the
        // library and navigation state.
        eframe::set_value(storage, eframe::APP_KEY, &AppStorage {
            session: self.state.clone(),
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.api.shutdown();
        self.context.player.detach();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.context.ingest_api_results(&mut self.state, ctx);
        self.context.sync_attachment(&self.state);
        self.context.poll_playback(&mut self.state, ctx);

        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("✂ StreamCut")
                            .strong().size(15.0).color(crate::theme::ACCENT),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new("Drop a video anywhere to upload")
                            .size(12.0).weak(),
                    );
                });
            });

        egui::SidePanel::left("library_panel")
            .resizable(true)
            .default_width(250.0)
            .min_width(180.0)
            .show(ctx, |ui| {
                self.library.ui(ui, &self.state, &mut self.context.posters, &mut self.pending_cmds);
            });

        egui::SidePanel::right("share_panel")
            .resizable(true)
            .default_width(240.0)
            .min_width(180.0)
            .show(ctx, |ui| {
                self.upload.ui(ui, &self.state, &mut self.context.posters, &mut self.pending_cmds);
                ui.separator();
                self.share.ui(ui, &self.state, &mut self.context.posters, &mut self.pending_cmds);
            });

        if self.state.view == View::Trimmer {
            egui::TopBottomPanel::bottom("trimmer_panel")
                .resizable(false)
                .exact_height(130.0)
                .show(ctx, |ui| {
                    self.trimmer.ui(ui, &self.state, &mut self.context.posters, &mut self.pending_cmds);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            // Hand PlayerPanel the current live frame (if any) so it can
            // render it directly — the poster cache stays pure thumbnails.
            self.player.current_frame = self.state.selected_asset
                .and_then(|id| self.context.frame_cache.get(&id).cloned());

            self.player.ui(ui, &self.state, &mut self.context.posters, &mut self.pending_cmds);
        });

        // ── Process commands emitted by panels this frame ─────────────────────
        let cmds: Vec<AppCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // ── Session clock ─────────────────────────────────────────────────────
        if self.state.is_playing {
            let dt = ctx.input(|i| i.stable_dt as f64);
            self.state.current_time += dt;
            let total = self.state.selected_duration();
            if total > 0.0 && self.state.current_time >= total {
                self.state.current_time = total - 0.001;
                self.state.is_playing   = false;
                self.context.player.set_paused(true);
            }
            ctx.request_repaint();
        }
    }
}
