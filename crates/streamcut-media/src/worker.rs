// crates/streamcut-media/src/worker.rs
//
// HlsBackend: the PlayerBackend implementation backed by a dedicated
// decode thread. Commands travel over a channel; seeks go through a
// latest-wins slot so a fast scrub collapses to one decoder seek instead
// of queueing every intermediate position.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, SendTimeoutError, TryRecvError};
use parking_lot::Mutex;
use uuid::Uuid;

use streamcut_core::messages::{PlaybackFrame, PlayerEvent};

use crate::backend::PlayerBackend;
use crate::hls::StreamDecoder;

enum DecodeCmd {
    Attach { asset: Uuid, url: String, start_at: f64 },
    SetPaused(bool),
    Detach,
    Shutdown,
}

pub struct HlsBackend {
    cmd_tx:    Sender<DecodeCmd>,
    event_rx:  Receiver<PlayerEvent>,
    frame_rx:  Receiver<PlaybackFrame>,
    /// Latest-wins seek target, shared with the decode thread.
    seek_slot: Arc<Mutex<Option<f64>>>,
    shutdown:  Arc<AtomicBool>,
}

impl HlsBackend {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx)     = bounded::<DecodeCmd>(32);
        // Frame capacity 8: enough to decode ahead of the presentation
        // clock without letting a stalled UI pile up stale frames.
        let (frame_tx, frame_rx) = bounded::<PlaybackFrame>(8);
        let (event_tx, event_rx) = bounded::<PlayerEvent>(32);

        let seek_slot: Arc<Mutex<Option<f64>>> = Arc::new(Mutex::new(None));
        let shutdown = Arc::new(AtomicBool::new(false));

        let slot = Arc::clone(&seek_slot);
        let stop = Arc::clone(&shutdown);
        thread::spawn(move || decode_loop(cmd_rx, event_tx, frame_tx, slot, stop));

        Self { cmd_tx, event_rx, frame_rx, seek_slot, shutdown }
    }
}

impl Default for HlsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBackend for HlsBackend {
    fn attach(&mut self, asset: Uuid, url: String, start_at: f64) {
        *self.seek_slot.lock() = None;
        // Drain frames from the previous source so the first paint after a
        // switch is never a stale asset.
        while self.frame_rx.try_recv().is_ok() {}
        let _ = self.cmd_tx.send(DecodeCmd::Attach { asset, url, start_at });
    }

    fn seek(&mut self, t: f64) {
        // Latest wins; the decode thread's blocking waits are bounded at
        // 250 ms so the slot is observed promptly even while paused.
        *self.seek_slot.lock() = Some(t.max(0.0));
    }

    fn set_paused(&mut self, paused: bool) {
        let _ = self.cmd_tx.send(DecodeCmd::SetPaused(paused));
    }

    fn detach(&mut self) {
        *self.seek_slot.lock() = None;
        let _ = self.cmd_tx.send(DecodeCmd::Detach);
        while self.frame_rx.try_recv().is_ok() {}
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        self.event_rx.try_recv().ok()
    }

    fn poll_frame(&mut self) -> Option<PlaybackFrame> {
        self.frame_rx.try_recv().ok()
    }
}

impl Drop for HlsBackend {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.cmd_tx.send(DecodeCmd::Shutdown);
    }
}

// ── Decode thread ─────────────────────────────────────────────────────────────

fn decode_loop(
    cmd_rx:    Receiver<DecodeCmd>,
    event_tx:  Sender<PlayerEvent>,
    frame_tx:  Sender<PlaybackFrame>,
    seek_slot: Arc<Mutex<Option<f64>>>,
    shutdown:  Arc<AtomicBool>,
) {
    let mut session: Option<(Uuid, StreamDecoder)> = None;
    let mut paused = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            return;
        }

        // Idle or paused: block for the next command (a pending seek still
        // needs servicing, so block with a short timeout). Playing: drain
        // whatever arrived without blocking.
        let has_pending_seek = seek_slot.lock().is_some();
        let cmd = if session.is_none() || (paused && !has_pending_seek) {
            match cmd_rx.recv_timeout(Duration::from_millis(250)) {
                Ok(c) => Some(c),
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => None,
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => return,
            }
        } else {
            match cmd_rx.try_recv() {
                Ok(c) => Some(c),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => return,
            }
        };

        match cmd {
            Some(DecodeCmd::Attach { asset, url, start_at }) => {
                eprintln!("[player] attach {url}");
                match StreamDecoder::open(&url, start_at) {
                    Ok(dec) => {
                        let (w, h) = dec.size();
                        let _ = event_tx.send(PlayerEvent::MetadataReady {
                            asset,
                            duration: dec.duration(),
                            width: w,
                            height: h,
                        });
                        session = Some((asset, dec));
                        paused  = true;
                    }
                    Err(e) => {
                        eprintln!("[player] open failed: {e}");
                        let _ = event_tx.send(PlayerEvent::PlaybackError {
                            asset,
                            msg: e.to_string(),
                        });
                        session = None;
                    }
                }
                continue;
            }
            Some(DecodeCmd::SetPaused(p)) => {
                paused = p;
            }
            Some(DecodeCmd::Detach) => {
                session = None;
                paused  = true;
                continue;
            }
            Some(DecodeCmd::Shutdown) => return,
            None => {}
        }

        // ── Latest-wins seek ──────────────────────────────────────────────────
        // Applies while paused too: scrubbing a paused player still
        // refreshes the displayed frame.
        if let Some(t) = seek_slot.lock().take() {
            let mut seek_failed = false;
            if let Some((asset, dec)) = session.as_mut() {
                let asset = *asset;
                match dec.seek(t) {
                    Ok(()) => {
                        // One frame at the target for immediate visual
                        // feedback, even while paused.
                        if let Some((data, w, h, ts)) = dec.next_frame() {
                            deliver(&frame_tx, &cmd_rx, &shutdown, PlaybackFrame {
                                asset, timestamp: ts, width: w, height: h, data,
                            });
                        }
                    }
                    Err(e) => {
                        let _ = event_tx.send(PlayerEvent::PlaybackError {
                            asset,
                            msg: e.to_string(),
                        });
                        seek_failed = true;
                    }
                }
            }
            if seek_failed {
                session = None;
                continue;
            }
        }

        if paused || session.is_none() {
            continue;
        }

        // ── Decode ahead ─────────────────────────────────────────────────────
        let (asset, dec) = session.as_mut().unwrap();
        match dec.next_frame() {
            Some((data, w, h, ts)) => {
                let frame = PlaybackFrame {
                    asset: *asset, timestamp: ts, width: w, height: h, data,
                };
                if !deliver(&frame_tx, &cmd_rx, &shutdown, frame) {
                    return;
                }
            }
            None => {
                let _ = event_tx.send(PlayerEvent::EndOfStream { asset: *asset });
                paused = true;
            }
        }
    }
}

/// Push one frame into the bounded channel. Blocks in short slices so
/// shutdown and new commands stay responsive; a frame is dropped only when
/// a command is waiting (it would be stale by the time the command runs).
/// Returns false when the receiver is gone.
fn deliver(
    frame_tx: &Sender<PlaybackFrame>,
    cmd_rx:   &Receiver<DecodeCmd>,
    shutdown: &AtomicBool,
    frame:    PlaybackFrame,
) -> bool {
    let mut pending = Some(frame);
    while let Some(f) = pending.take() {
        match frame_tx.send_timeout(f, Duration::from_millis(50)) {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(f)) => {
                if shutdown.load(Ordering::Relaxed) {
                    return false;
                }
                if !cmd_rx.is_empty() {
                    break;
                }
                pending = Some(f);
            }
            Err(SendTimeoutError::Disconnected(_)) => return false,
        }
    }
    true
}
