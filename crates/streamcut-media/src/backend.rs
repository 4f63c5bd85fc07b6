// crates/streamcut-media/src/backend.rs
//
// The seam between the UI and whatever actually plays a remote asset.
// The app shell drives playback exclusively through this trait, so a
// platform with native HLS support (or a test double) can slot in without
// touching the player panel or the command loop.

use streamcut_core::messages::{PlaybackFrame, PlayerEvent};
use uuid::Uuid;

/// A playback backend: attach a source, report metadata and errors,
/// deliver frames.
///
/// All methods are non-blocking. Events and frames are produced
/// asynchronously and collected by polling once per UI pass; `poll_frame`
/// returns frames in decode order and the caller is responsible for
/// presenting them at their timestamps.
pub trait PlayerBackend {
    /// Start playing `url` for the given asset, positioned at `start_at`
    /// seconds, paused. Replaces any previously attached source.
    /// Success or failure is reported later via `poll_event`
    /// (MetadataReady / PlaybackError).
    fn attach(&mut self, asset: Uuid, url: String, start_at: f64);

    /// Jump to `t` seconds. Rapid repeated seeks may be coalesced —
    /// latest wins.
    fn seek(&mut self, t: f64);

    fn set_paused(&mut self, paused: bool);

    /// Drop the attached source and stop decoding.
    fn detach(&mut self);

    fn poll_event(&mut self) -> Option<PlayerEvent>;

    fn poll_frame(&mut self) -> Option<PlaybackFrame>;
}
