// crates/streamcut-core/src/commands.rs
//
// Every user action in StreamCut is expressed as an AppCommand.
// Panels emit these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs.

use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum AppCommand {
    // ── Playback ─────────────────────────────────────────────────────────────
    Play,
    Pause,
    SetPlayhead(f64),
    ClearPlaybackError,

    // ── Navigation / library ─────────────────────────────────────────────────
    OpenLibrary,
    /// Select the asset and show it in the player.
    OpenPlayer(Uuid),
    /// Select the asset and show it with the trim strip.
    OpenTrimmer(Uuid),
    SelectAsset(Option<Uuid>),
    /// Remove the asset from this session's library. Local only — nothing
    /// is deleted on the service.
    ForgetAsset(Uuid),

    // ── Clip range selection ─────────────────────────────────────────────────
    /// Store the current playback position as the clip start, then seek to it.
    MarkStart,
    /// Store the current playback position as the clip end, then seek to it.
    MarkEnd,
    /// The trim strip's drag handles reported a new pair. Overwrites both
    /// markers exactly as received.
    RangeWidgetUpdate { start: f64, end: f64 },
    ClearRange,
    /// Submit (source, start, end) to the clip-creation endpoint.
    CreateClip,
    /// Dismiss the clip done/error banner.
    ClearClipStatus,

    // ── Upload ───────────────────────────────────────────────────────────────
    UploadFile(PathBuf),
    ClearUploadStatus,

    // ── Share / report ───────────────────────────────────────────────────────
    /// Show a transient confirmation in the share panel (set by the panel
    /// after a clipboard write — the clipboard itself is a UI-side effect).
    SetShareStatus(String),
    ClearShareStatus,
    SubmitReport { playback_id: String, reason: String, comment: String },
}
