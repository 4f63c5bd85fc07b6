// crates/streamcut-api/src/worker.rs
//
// ApiWorker: owns the service client and every background thread that
// talks to it. All public API that streamcut-ui calls lives here.
//
// Threads never touch UI state — results go through the bounded channel
// and are ingested on the UI thread. Sends after the UI has dropped the
// receiver are discarded, so a response landing after teardown neither
// panics nor mutates anything.

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use uuid::Uuid;

use streamcut_core::messages::{ApiResult, ClipRequest};

use crate::client::ServiceClient;
use crate::poster::fetch_poster;
use crate::upload::put_file;

/// Max concurrent poster fetch threads. A freshly restored library can
/// queue a dozen probes at once; four keeps the image edge happy.
const POSTER_CONCURRENCY: u32 = 4;

/// Asset/upload polling cadence and budget (2 minutes at 1 Hz). An asset
/// still preparing after the budget stays Preparing in the library; a
/// later refresh picks it up.
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const POLL_BUDGET:   u32      = 120;

pub struct ApiWorker {
    /// Shared result channel: uploads, asset polls, posters, clips, reports.
    pub rx:     Receiver<ApiResult>,
    tx:         Sender<ApiResult>,
    client:     Arc<ServiceClient>,
    shutdown:   Arc<AtomicBool>,
    /// Limits concurrent poster threads: (active_count, Condvar).
    poster_sem: Arc<(Mutex<u32>, Condvar)>,
}

impl ApiWorker {
    pub fn new(client: ServiceClient) -> Self {
        let (tx, rx) = bounded(256);
        Self {
            rx,
            tx,
            client:     Arc::new(client),
            shutdown:   Arc::new(AtomicBool::new(false)),
            poster_sem: Arc::new((Mutex::new(0), Condvar::new())),
        }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Request teardown: in-flight threads finish their current step, see
    /// the flag, and exit without reporting.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    // ── Clip creation ────────────────────────────────────────────────────────

    /// Submit a clip request on a background thread. Exactly one of
    /// ClipCreated / ClipFailed comes back for `job` (unless shutdown wins).
    pub fn create_clip(&self, job: Uuid, req: ClipRequest) {
        let client = Arc::clone(&self.client);
        let tx     = self.tx.clone();
        let stop   = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            eprintln!("[api] create clip {}..{} of {}", req.start_time, req.end_time, req.source_id);
            let result = client.create_clip(&req);
            if stop.load(Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(created) => {
                    let _ = tx.send(ApiResult::ClipCreated {
                        job,
                        asset_id:    created.id,
                        playback_id: created.playback_id,
                    });
                }
                Err(e) => {
                    eprintln!("[api] clip failed: {e}");
                    let _ = tx.send(ApiResult::ClipFailed { job, msg: e.to_string() });
                }
            }
        });
    }

    // ── Poster probe ─────────────────────────────────────────────────────────

    /// Fetch the poster for `playback_id`. Failure is logged and swallowed —
    /// the player falls back to the default layout.
    pub fn probe_poster(&self, id: Uuid, playback_id: String) {
        let client = Arc::clone(&self.client);
        let tx     = self.tx.clone();
        let stop   = Arc::clone(&self.shutdown);
        let sem    = Arc::clone(&self.poster_sem);
        thread::spawn(move || {
            {
                let (lock, cvar) = &*sem;
                let mut active = lock.lock().unwrap();
                while *active >= POSTER_CONCURRENCY {
                    active = cvar.wait(active).unwrap();
                }
                *active += 1;
            }

            let url = client.cfg.poster_url(&playback_id);
            match fetch_poster(client.agent(), &url) {
                Ok((bytes, width, height)) if !stop.load(Ordering::Relaxed) => {
                    eprintln!("[api] poster {width}x{height} ← {playback_id}");
                    let _ = tx.send(ApiResult::PosterLoaded { id, width, height, bytes });
                }
                Ok(_) => {}
                Err(e) => {
                    // Probe failure is non-fatal: log it, keep playing.
                    eprintln!("[api] poster probe failed for {playback_id}: {e}");
                }
            }

            let (lock, cvar) = &*sem;
            *lock.lock().unwrap() -= 1;
            cvar.notify_one();
        });
    }

    // ── Upload pipeline ──────────────────────────────────────────────────────

    /// Run the full upload pipeline on one thread: ticket → PUT bytes →
    /// poll the upload until an asset exists → poll the asset until ready.
    pub fn start_upload(&self, job: Uuid, path: PathBuf, title: String) {
        let client = Arc::clone(&self.client);
        let tx     = self.tx.clone();
        let stop   = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            eprintln!("[upload] {} → service", path.display());

            let ticket = match client.create_upload() {
                Ok(t)  => t,
                Err(e) => {
                    let _ = tx.send(ApiResult::UploadFailed { job, msg: e.to_string() });
                    return;
                }
            };

            if let Err(e) = put_file(client.agent(), &ticket.url, &path, job, &tx, &stop) {
                let _ = tx.send(ApiResult::UploadFailed { job, msg: e.to_string() });
                return;
            }

            // The service ingests asynchronously; wait for the asset to exist.
            let mut asset_id = None;
            for _ in 0..POLL_BUDGET {
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                match client.upload_status(&ticket.id) {
                    Ok(s) => {
                        if let Some(id) = s.asset_id {
                            asset_id = Some(id);
                            break;
                        }
                        if s.status == "errored" || s.status == "cancelled" {
                            let _ = tx.send(ApiResult::UploadFailed {
                                job,
                                msg: format!("upload {}", s.status),
                            });
                            return;
                        }
                    }
                    Err(e) => eprintln!("[upload] status poll: {e}"),
                }
                thread::sleep(POLL_INTERVAL);
            }

            let Some(asset_id) = asset_id else {
                let _ = tx.send(ApiResult::UploadFailed {
                    job,
                    msg: "service did not create an asset in time".into(),
                });
                return;
            };

            let _ = tx.send(ApiResult::UploadFinished {
                job,
                asset_id: asset_id.clone(),
                title,
            });

            poll_asset_until_ready(&client, &tx, &stop, &asset_id);
        });
    }

    // ── Asset refresh ────────────────────────────────────────────────────────

    /// Re-poll an asset that was still preparing (startup restore, or a
    /// clip whose cut is still materializing).
    pub fn refresh_asset(&self, asset_id: String) {
        let client = Arc::clone(&self.client);
        let tx     = self.tx.clone();
        let stop   = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            poll_asset_until_ready(&client, &tx, &stop, &asset_id);
        });
    }

    // ── Abuse report ─────────────────────────────────────────────────────────

    pub fn file_report(&self, playback_id: String, reason: String, comment: String) {
        let client = Arc::clone(&self.client);
        let tx     = self.tx.clone();
        let stop   = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            let result = client.file_report(&playback_id, &reason, &comment);
            if stop.load(Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(())  => { let _ = tx.send(ApiResult::ReportFiled); }
                Err(e)  => { let _ = tx.send(ApiResult::ReportFailed { msg: e.to_string() }); }
            }
        });
    }
}

/// Poll `asset_id` until the service reports ready or errored, then send
/// the matching result. Gives up silently after the budget — the asset
/// stays Preparing and a later refresh retries.
fn poll_asset_until_ready(
    client:   &ServiceClient,
    tx:       &Sender<ApiResult>,
    stop:     &AtomicBool,
    asset_id: &str,
) {
    for _ in 0..POLL_BUDGET {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        match client.get_asset(asset_id) {
            Ok(info) => match info.status.as_str() {
                "ready" => {
                    if let Some(playback_id) = info.playback_id {
                        let _ = tx.send(ApiResult::AssetReady {
                            asset_id:    asset_id.to_string(),
                            playback_id,
                            duration:    info.duration.unwrap_or(0.0),
                        });
                    } else {
                        let _ = tx.send(ApiResult::AssetErrored {
                            asset_id: asset_id.to_string(),
                            msg:      "ready without a playback ID".into(),
                        });
                    }
                    return;
                }
                "errored" => {
                    let _ = tx.send(ApiResult::AssetErrored {
                        asset_id: asset_id.to_string(),
                        msg:      info.error.unwrap_or_else(|| "asset errored".into()),
                    });
                    return;
                }
                _ => {}
            },
            Err(e) => eprintln!("[api] asset poll {asset_id}: {e}"),
        }
        thread::sleep(POLL_INTERVAL);
    }
    eprintln!("[api] asset {asset_id} still preparing after poll budget");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ServiceClient, ServiceConfig};

    /// Nothing listens on this port; requests fail fast with a transport
    /// error instead of touching the network.
    fn dead_client() -> ServiceClient {
        ServiceClient::new(ServiceConfig {
            api_base:    "http://127.0.0.1:1/v1".into(),
            stream_base: "http://127.0.0.1:1".into(),
            image_base:  "http://127.0.0.1:1".into(),
            token:       String::new(),
        })
    }

    #[test]
    fn failed_clip_reports_clip_failed_for_the_job() {
        let worker = ApiWorker::new(dead_client());
        let job = Uuid::new_v4();
        worker.create_clip(job, ClipRequest {
            source_id:  "abc".into(),
            start_time: 5.0,
            end_time:   12.0,
        });

        match worker.rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            ApiResult::ClipFailed { job: j, msg } => {
                assert_eq!(j, job);
                assert!(!msg.is_empty());
            }
            other => panic!("expected ClipFailed, got {other:?}"),
        }
    }

    #[test]
    fn teardown_with_request_in_flight_does_not_panic() {
        let worker = ApiWorker::new(dead_client());
        worker.create_clip(Uuid::new_v4(), ClipRequest {
            source_id:  "abc".into(),
            start_time: 0.0,
            end_time:   1.0,
        });
        worker.shutdown();
        drop(worker);
        // The spawned thread may still be failing its connection here;
        // its send lands in a closed channel and is discarded.
        thread::sleep(Duration::from_millis(200));
    }
}
