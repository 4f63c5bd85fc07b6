// crates/streamcut-core/src/messages.rs
//
// Types that flow across the channels between the worker crates and
// streamcut-ui. No egui, no ffmpeg — just plain data.

use serde::Serialize;
use uuid::Uuid;

/// The body submitted to the clip-creation endpoint: exactly these three
/// fields, nothing else. Constructed at submission time, dropped once the
/// request resolves or fails.
#[derive(Clone, Debug, Serialize)]
pub struct ClipRequest {
    pub source_id:  String,
    pub start_time: f64,
    pub end_time:   f64,
}

/// Results sent from the ApiWorker background threads to the UI.
#[derive(Debug)]
pub enum ApiResult {
    // ── Upload pipeline ──────────────────────────────────────────────────────
    UploadProgress { job: Uuid, sent: u64, total: u64 },
    /// The service turned the upload into an asset. Readiness arrives
    /// separately as AssetReady once ingest finishes.
    UploadFinished { job: Uuid, asset_id: String, title: String },
    UploadFailed   { job: Uuid, msg: String },

    // ── Asset polling ────────────────────────────────────────────────────────
    AssetReady   { asset_id: String, playback_id: String, duration: f64 },
    AssetErrored { asset_id: String, msg: String },

    // ── Poster probe ─────────────────────────────────────────────────────────
    /// Raw PNG bytes plus decoded dimensions. The UI re-decodes the pixels
    /// for its thumbnail texture; the dimensions size the player layout.
    PosterLoaded { id: Uuid, width: u32, height: u32, bytes: Vec<u8> },

    // ── Clip creation ────────────────────────────────────────────────────────
    ClipCreated { job: Uuid, asset_id: String, playback_id: String },
    ClipFailed  { job: Uuid, msg: String },

    // ── Abuse report ─────────────────────────────────────────────────────────
    ReportFiled,
    ReportFailed { msg: String },
}

/// Lifecycle notifications from the playback backend.
#[derive(Debug)]
pub enum PlayerEvent {
    /// The attached stream opened and reported its shape.
    MetadataReady { asset: Uuid, duration: f64, width: u32, height: u32 },
    /// The asset is missing or unplayable. Surfaced as a banner; no retry.
    PlaybackError { asset: Uuid, msg: String },
    EndOfStream   { asset: Uuid },
}

/// A decoded frame from the playback backend. RGBA, already scaled for
/// display.
pub struct PlaybackFrame {
    pub asset:     Uuid,
    pub timestamp: f64,
    pub width:     u32,
    pub height:    u32,
    pub data:      Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_request_serializes_exactly_three_fields() {
        let req = ClipRequest {
            source_id:  "abc".into(),
            start_time: 5.0,
            end_time:   12.0,
        };
        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 3);
        assert_eq!(obj["source_id"], "abc");
        assert_eq!(obj["start_time"], 5.0);
        assert_eq!(obj["end_time"], 12.0);
    }
}
