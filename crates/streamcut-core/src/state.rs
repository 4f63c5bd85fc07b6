// crates/streamcut-core/src/state.rs
// Pure session data — no egui, no HTTP, no runtime handles.
// Serializable via serde. Used by streamcut-ui and the worker crates.

use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::selector::RangeSelection;

/// Vendor-side lifecycle of a remote asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Ingest running on the service; no playback ID yet.
    Preparing,
    /// Playable from the streaming edge.
    Ready,
    /// The service gave up on this asset.
    Errored(String),
}

/// How an asset entered this session's library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AssetOrigin {
    Uploaded,
    /// Cut from another asset's timeline. Times are the submitted range,
    /// kept for display — the service owns the actual cut.
    Clipped { source_asset_id: String, start_time: f64, end_time: f64 },
}

/// A video asset hosted by the service, as this session knows it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteAsset {
    /// Local identity — stable even while vendor IDs are still unknown.
    pub id:          Uuid,
    pub asset_id:    String,
    /// Opaque playback handle; None until the service finishes preparing.
    pub playback_id: Option<String>,
    pub title:       String,
    /// Seconds. 0.0 until metadata arrives (vendor API or stream probe).
    pub duration:    f64,
    pub status:      AssetStatus,
    pub origin:      AssetOrigin,
    /// Poster image dimensions, probed out-of-band. Drives player layout;
    /// None means the probe failed or hasn't run and 16:9 is assumed.
    #[serde(default)]
    pub poster_size: Option<(u32, u32)>,
}

impl RemoteAsset {
    pub fn is_ready(&self) -> bool {
        matches!(self.status, AssetStatus::Ready) && self.playback_id.is_some()
    }
}

/// An in-flight clip creation. Carries everything needed to register the
/// resulting asset when the service answers — the user may have moved the
/// selection (or the view) by then.
#[derive(Clone, Copy, Debug)]
pub struct ClipJob {
    pub job:        Uuid,
    /// Local ID of the source asset.
    pub source:     Uuid,
    pub start_time: f64,
    pub end_time:   f64,
}

/// Which screen the central panel is showing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum View {
    Library,
    Player,
    Trimmer,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub library:        Vec<RemoteAsset>,
    pub selected_asset: Option<Uuid>,
    pub view:           View,
    pub current_time:   f64,
    pub is_playing:     bool,
    pub selection:      RangeSelection,

    // ── Clip creation status (runtime-only, not serialized) ──────────────────
    /// The in-flight clip request, or None when idle. Set when CreateClip
    /// is processed; cleared on the matching result. Results carrying a
    /// different job UUID are stale and ignored.
    #[serde(skip)]
    pub clip_job:   Option<ClipJob>,
    /// Set on a failed clip request. TrimmerPanel shows a ✕ banner;
    /// the user may dismiss it and resubmit.
    #[serde(skip)]
    pub clip_error: Option<String>,

    // ── Upload status (runtime-only) ─────────────────────────────────────────
    #[serde(skip)]
    pub upload_job:      Option<Uuid>,
    /// (bytes_sent, bytes_total) — updated by each UploadProgress result.
    #[serde(skip)]
    pub upload_progress: Option<(u64, u64)>,
    /// Title of the most recently completed upload. UploadPanel shows a ✓
    /// banner until dismissed.
    #[serde(skip)]
    pub upload_done:     Option<String>,
    #[serde(skip)]
    pub upload_error:    Option<String>,

    // ── Player / share status (runtime-only) ─────────────────────────────────
    /// Media error for the asset being played. Banner in PlayerPanel, no retry.
    #[serde(skip)]
    pub playback_error: Option<String>,
    /// Transient confirmation line in SharePanel ("link copied", "report sent").
    #[serde(skip)]
    pub share_status:   Option<String>,
    #[serde(skip)]
    pub report_error:   Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            library:         Vec::new(),
            selected_asset:  None,
            view:            View::Library,
            current_time:    0.0,
            is_playing:      false,
            selection:       RangeSelection::default(),
            clip_job:        None,
            clip_error:      None,
            upload_job:      None,
            upload_progress: None,
            upload_done:     None,
            upload_error:    None,
            playback_error:  None,
            share_status:    None,
            report_error:    None,
        }
    }
}

impl SessionState {
    pub fn asset(&self, id: Uuid) -> Option<&RemoteAsset> {
        self.library.iter().find(|a| a.id == id)
    }

    pub fn asset_mut(&mut self, id: Uuid) -> Option<&mut RemoteAsset> {
        self.library.iter_mut().find(|a| a.id == id)
    }

    pub fn asset_by_vendor_id_mut(&mut self, asset_id: &str) -> Option<&mut RemoteAsset> {
        self.library.iter_mut().find(|a| a.asset_id == asset_id)
    }

    pub fn selected(&self) -> Option<&RemoteAsset> {
        self.selected_asset.and_then(|id| self.asset(id))
    }

    /// Register a freshly uploaded asset. Duration and playback ID arrive
    /// later via asset polling.
    pub fn add_uploaded(&mut self, asset_id: String, title: String) -> Uuid {
        if let Some(existing) = self.library.iter().find(|a| a.asset_id == asset_id) {
            return existing.id;
        }
        let id = Uuid::new_v4();
        self.library.push(RemoteAsset {
            id,
            asset_id,
            playback_id: None,
            title,
            duration:    0.0,
            status:      AssetStatus::Preparing,
            origin:      AssetOrigin::Uploaded,
            poster_size: None,
        });
        id
    }

    /// Register the clip the service just created and navigate to its
    /// player view. Returns the new asset's local ID.
    pub fn add_created_clip(
        &mut self,
        asset_id: String,
        playback_id: String,
        source: &RemoteAsset,
        start_time: f64,
        end_time: f64,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.library.push(RemoteAsset {
            id,
            asset_id,
            playback_id: Some(playback_id),
            title: format!("{} (clip)", source.title),
            duration: 0.0,
            status:   AssetStatus::Preparing,
            origin:   AssetOrigin::Clipped {
                source_asset_id: source.asset_id.clone(),
                start_time,
                end_time,
            },
            poster_size: None,
        });
        self.selected_asset = Some(id);
        self.view           = View::Player;
        self.current_time   = 0.0;
        self.is_playing     = false;
        id
    }

    /// Fold a vendor status report into the library.
    pub fn apply_asset_ready(&mut self, asset_id: &str, playback_id: String, duration: f64) {
        if let Some(asset) = self.asset_by_vendor_id_mut(asset_id) {
            asset.playback_id = Some(playback_id);
            asset.status      = AssetStatus::Ready;
            if duration > 0.0 {
                asset.duration = duration;
            }
        }
    }

    /// Fold a failed clip request into the banner state. Stale job IDs
    /// are ignored. Navigation is untouched — the user stays where they
    /// are and may resubmit.
    pub fn apply_clip_failed(&mut self, job: Uuid, msg: String) {
        if self.clip_job.map(|c| c.job) == Some(job) {
            self.clip_job   = None;
            self.clip_error = Some(msg);
        }
    }

    pub fn apply_asset_errored(&mut self, asset_id: &str, msg: String) {
        if let Some(asset) = self.asset_by_vendor_id_mut(asset_id) {
            asset.status = AssetStatus::Errored(msg);
        }
    }

    /// Stream metadata fallback: fills in duration only when the vendor API
    /// hasn't reported one yet.
    pub fn apply_stream_duration(&mut self, id: Uuid, duration: f64) {
        if let Some(asset) = self.asset_mut(id) {
            if asset.duration <= 0.0 && duration > 0.0 {
                asset.duration = duration;
            }
        }
    }

    pub fn delete_asset(&mut self, id: Uuid) {
        self.library.retain(|a| a.id != id);
        if self.selected_asset == Some(id) {
            self.selected_asset = None;
            self.view           = View::Library;
            self.is_playing     = false;
        }
    }

    /// Duration of the selected asset, or 0.0 — panels use this for
    /// slider/strip bounds before metadata has arrived.
    pub fn selected_duration(&self) -> f64 {
        self.selected().map(|a| a.duration).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_asset(state: &mut SessionState) -> Uuid {
        let id = state.add_uploaded("asset-abc".into(), "demo".into());
        state.apply_asset_ready("asset-abc", "pb-abc".into(), 30.0);
        id
    }

    #[test]
    fn upload_then_ready_fills_playback_fields() {
        let mut state = SessionState::default();
        let id = ready_asset(&mut state);
        let asset = state.asset(id).unwrap();
        assert!(asset.is_ready());
        assert_eq!(asset.playback_id.as_deref(), Some("pb-abc"));
        assert_eq!(asset.duration, 30.0);
    }

    #[test]
    fn duplicate_upload_is_collapsed() {
        let mut state = SessionState::default();
        let a = state.add_uploaded("asset-abc".into(), "demo".into());
        let b = state.add_uploaded("asset-abc".into(), "demo again".into());
        assert_eq!(a, b);
        assert_eq!(state.library.len(), 1);
    }

    #[test]
    fn created_clip_navigates_to_its_player_view() {
        let mut state = SessionState::default();
        let src_id = ready_asset(&mut state);
        let src = state.asset(src_id).unwrap().clone();

        let clip_id = state.add_created_clip("asset-xyz".into(), "pb-xyz".into(), &src, 5.0, 12.0);

        assert_eq!(state.selected_asset, Some(clip_id));
        assert_eq!(state.view, View::Player);
        let clip = state.asset(clip_id).unwrap();
        assert_eq!(
            clip.origin,
            AssetOrigin::Clipped {
                source_asset_id: "asset-abc".into(),
                start_time: 5.0,
                end_time: 12.0,
            }
        );
    }

    #[test]
    fn stream_duration_never_overwrites_vendor_duration() {
        let mut state = SessionState::default();
        let id = ready_asset(&mut state);
        state.apply_stream_duration(id, 99.0);
        assert_eq!(state.asset(id).unwrap().duration, 30.0);
    }

    #[test]
    fn failed_clip_shows_error_and_stays_put() {
        let mut state = SessionState::default();
        let id = ready_asset(&mut state);
        state.selected_asset = Some(id);
        state.view = View::Trimmer;

        let job = Uuid::new_v4();
        state.clip_job = Some(ClipJob { job, source: id, start_time: 5.0, end_time: 12.0 });

        state.apply_clip_failed(job, "HTTP 422".into());
        assert_eq!(state.clip_error.as_deref(), Some("HTTP 422"));
        assert!(state.clip_job.is_none());
        // No navigation on failure.
        assert_eq!(state.view, View::Trimmer);
        assert_eq!(state.selected_asset, Some(id));
        assert_eq!(state.library.len(), 1);
    }

    #[test]
    fn stale_clip_failure_is_ignored() {
        let mut state = SessionState::default();
        let id = ready_asset(&mut state);
        let live = Uuid::new_v4();
        state.clip_job = Some(ClipJob { job: live, source: id, start_time: 0.0, end_time: 1.0 });

        state.apply_clip_failed(Uuid::new_v4(), "late response".into());
        assert!(state.clip_error.is_none());
        assert_eq!(state.clip_job.map(|c| c.job), Some(live));
    }

    #[test]
    fn deleting_selected_asset_returns_to_library() {
        let mut state = SessionState::default();
        let id = ready_asset(&mut state);
        state.selected_asset = Some(id);
        state.view = View::Player;

        state.delete_asset(id);
        assert!(state.library.is_empty());
        assert_eq!(state.selected_asset, None);
        assert_eq!(state.view, View::Library);
    }
}
