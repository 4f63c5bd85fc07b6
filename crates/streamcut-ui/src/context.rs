// crates/streamcut-ui/src/context.rs
//
// AppContext owns all runtime handles that are NOT part of the serializable
// session state. StreamCutApp holds one of these plus a SessionState and
// the panel list — nothing else.
//
// Layout:
//   AppContext
//     ├── api            — service worker + its result channel
//     ├── player         — playback backend (trait object, HLS by default)
//     ├── posters        — GPU poster thumbnail cache
//     ├── frame_cache    — latest displayed playback frame per asset
//     ├── pending_frame  — next frame, held until its timestamp is due
//     └── attached_asset — which asset the backend is currently playing

use streamcut_api::ApiWorker;
use streamcut_core::state::SessionState;
use streamcut_core::RangeSelection;
use streamcut_core::messages::{ApiResult, PlayerEvent};
use streamcut_media::PlayerBackend;
use crate::modules::PosterCache;
use crate::streamcut_log;
use eframe::egui;
use std::collections::HashMap;
use uuid::Uuid;

pub struct AppContext {
    pub api:    ApiWorker,
    pub player: Box<dyn PlayerBackend>,

    pub posters: PosterCache,
    /// Latest playback frame per asset, as an uploaded texture.
    pub frame_cache: HashMap<Uuid, egui::TextureHandle>,
    /// Next-to-display playback frame, held until its timestamp is due.
    /// Prevents the drain-all pattern from racing ahead of wall-clock time.
    pending_frame: Option<streamcut_core::messages::PlaybackFrame>,

    attached_asset: Option<Uuid>,
}

impl AppContext {
    pub fn new(api: ApiWorker, player: Box<dyn PlayerBackend>) -> Self {
        Self {
            api,
            player,
            posters:        HashMap::new(),
            frame_cache:    HashMap::new(),
            pending_frame:  None,
            attached_asset: None,
        }
    }

    /// Keep the backend pointed at the selected ready asset. Runs every
    /// frame; attach/detach only fire when the target actually changes.
    pub fn sync_attachment(&mut self, state: &SessionState) {
        let target = state
            .selected()
            .filter(|a| a.is_ready())
            .map(|a| (a.id, a.playback_id.clone().unwrap_or_default()));

        match target {
            Some((id, playback_id)) => {
                if self.attached_asset != Some(id) {
                    let url = self.api.client().cfg.playback_url(&playback_id);
                    self.player.attach(id, url, 0.0);
                    self.attached_asset = Some(id);
                    self.pending_frame  = None;
                }
            }
            None => {
                if self.attached_asset.is_some() {
                    self.player.detach();
                    self.attached_asset = None;
                    self.pending_frame  = None;
                }
            }
        }
    }

    pub fn drop_pending_frame(&mut self) {
        self.pending_frame = None;
    }

    // ── Playback ingest ──────────────────────────────────────────────────────

    /// Drain backend events and consume frames whose timestamps are due.
    pub fn poll_playback(&mut self, state: &mut SessionState, ctx: &egui::Context) {
        while let Some(event) = self.player.poll_event() {
            match event {
                PlayerEvent::MetadataReady { asset, duration, .. } => {
                    // The vendor API is authoritative for duration; the
                    // stream only fills gaps.
                    state.apply_stream_duration(asset, duration);
                    if state.selected_asset == Some(asset) {
                        state.playback_error = None;
                    }
                }
                PlayerEvent::PlaybackError { asset, msg } => {
                    if state.selected_asset == Some(asset) {
                        state.playback_error = Some(msg);
                        state.is_playing     = false;
                    }
                }
                PlayerEvent::EndOfStream { asset } => {
                    if state.selected_asset == Some(asset) {
                        state.is_playing = false;
                    }
                }
            }
        }

        // Frame consumption, timestamp-gated against the session clock.
        loop {
            let frame = match self.pending_frame.take() {
                Some(f) => f,
                None => match self.player.poll_frame() {
                    Some(f) => f,
                    None => break,
                },
            };

            // A frame from a previously attached source — drop it.
            if self.attached_asset != Some(frame.asset) {
                continue;
            }

            let due = !state.is_playing || frame.timestamp <= state.current_time + 0.001;
            if !due {
                self.pending_frame = Some(frame);
                // Wake up again when the frame should land.
                ctx.request_repaint();
                break;
            }

            let image = egui::ColorImage::from_rgba_unmultiplied(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );
            let tex = ctx.load_texture(
                format!("frame-{}", frame.asset),
                image,
                egui::TextureOptions::LINEAR,
            );
            self.frame_cache.insert(frame.asset, tex);

            // While paused one refreshed frame is enough (seek feedback).
            if !state.is_playing {
                break;
            }
        }
    }

    // ── API ingest ───────────────────────────────────────────────────────────

    /// Dispatch all queued ApiWorker results into state and caches.
    pub fn ingest_api_results(&mut self, state: &mut SessionState, ctx: &egui::Context) {
        while let Ok(result) = self.api.rx.try_recv() {
            match result {
                ApiResult::UploadProgress { job, sent, total } => {
                    if state.upload_job == Some(job) {
                        state.upload_progress = Some((sent, total));
                    }
                }
                ApiResult::UploadFinished { job, asset_id, title } => {
                    if state.upload_job == Some(job) {
                        state.upload_job      = None;
                        state.upload_progress = None;
                        state.upload_done     = Some(title.clone());
                        state.add_uploaded(asset_id, title);
                    }
                }
                ApiResult::UploadFailed { job, msg } => {
                    if state.upload_job == Some(job) {
                        state.upload_job      = None;
                        state.upload_progress = None;
                        state.upload_error    = Some(msg);
                    }
                }

                ApiResult::AssetReady { asset_id, playback_id, duration } => {
                    state.apply_asset_ready(&asset_id, playback_id.clone(), duration);
                    if let Some(asset) = state.library.iter().find(|a| a.asset_id == asset_id) {
                        self.api.probe_poster(asset.id, playback_id);
                    }
                }
                ApiResult::AssetErrored { asset_id, msg } => {
                    state.apply_asset_errored(&asset_id, msg);
                }

                ApiResult::PosterLoaded { id, width, height, bytes } => {
                    if let Some(asset) = state.asset_mut(id) {
                        asset.poster_size = Some((width, height));
                    }
                    match decode_poster_rgba(&bytes) {
                        Ok(image) => {
                            let tex = ctx.load_texture(
                                format!("poster-{id}"),
                                image,
                                egui::TextureOptions::LINEAR,
                            );
                            self.posters.insert(id, tex);
                        }
                        Err(e) => {
                            streamcut_log!("[poster] thumbnail decode failed for {id}: {e}");
                        }
                    }
                }

                ApiResult::ClipCreated { job, asset_id, playback_id } => {
                    let Some(pending) = state.clip_job else { continue };
                    if pending.job != job {
                        streamcut_log!("[clip] stale result for job {job} ignored");
                        continue;
                    }
                    state.clip_job = None;
                    let Some(source) = state.asset(pending.source).cloned() else { continue };

                    let id = state.add_created_clip(
                        asset_id.clone(),
                        playback_id.clone(),
                        &source,
                        pending.start_time,
                        pending.end_time,
                    );
                    state.selection = RangeSelection::default();
                    // The cut is still materializing server-side; poll it
                    // to pick up duration, and grab its poster.
                    self.api.refresh_asset(asset_id);
                    self.api.probe_poster(id, playback_id);
                }
                ApiResult::ClipFailed { job, msg } => {
                    state.apply_clip_failed(job, msg);
                }

                ApiResult::ReportFiled => {
                    state.share_status = Some("Report sent".into());
                    state.report_error = None;
                }
                ApiResult::ReportFailed { msg } => {
                    state.report_error = Some(msg);
                }
            }
        }
    }
}

/// Expand a poster PNG into an egui image. Posters are RGB or RGBA;
/// grayscale never appears but costs one extra match arm to tolerate.
fn decode_poster_rgba(bytes: &[u8]) -> Result<egui::ColorImage, png::DecodingError> {
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size().unwrap_or(0)];
    let info = reader.next_frame(&mut buf)?;

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => buf[..info.buffer_size()].to_vec(),
        png::ColorType::Rgb => buf[..info.buffer_size()]
            .chunks(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf[..info.buffer_size()]
            .iter()
            .flat_map(|&g| [g, g, g, 255])
            .collect(),
        _ => {
            return Err(png::DecodingError::LimitsExceeded);
        }
    };

    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [info.width as usize, info.height as usize],
        &rgba,
    ))
}
