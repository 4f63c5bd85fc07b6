// crates/streamcut-media/src/lib.rs
//
// Playback backends. No egui dependency — frames and events reach
// streamcut-ui via channels and the PlayerBackend polling surface only.

pub mod backend;
pub mod hls;
pub mod worker;

pub use backend::PlayerBackend;
pub use worker::HlsBackend;
pub use streamcut_core::messages::{PlaybackFrame, PlayerEvent};

/// Global FFmpeg init. Call once from main() before constructing a backend.
pub fn init() -> anyhow::Result<()> {
    ffmpeg_the_third::init()?;
    Ok(())
}
