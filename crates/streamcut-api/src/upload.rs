// crates/streamcut-api/src/upload.rs
//
// Direct upload: PUT the file bytes to the service's presigned URL,
// reporting progress as the reader drains.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::Sender;
use uuid::Uuid;

use streamcut_core::messages::ApiResult;

use crate::error::ApiError;

/// Progress is reported at most once per this many bytes, so a large file
/// doesn't flood the channel with per-read messages.
const PROGRESS_STEP: u64 = 256 * 1024;

/// PUT `path` to the presigned `url`, emitting UploadProgress along the way.
/// Returns Err on transport failure or when `cancel` flips mid-transfer.
pub fn put_file(
    agent:  &ureq::Agent,
    url:    &str,
    path:   &Path,
    job:    Uuid,
    tx:     &Sender<ApiResult>,
    cancel: &Arc<AtomicBool>,
) -> Result<(), ApiError> {
    let file  = File::open(path)?;
    let total = file.metadata()?.len();

    let reader = ProgressReader {
        inner: file,
        job,
        total,
        sent: 0,
        last_reported: 0,
        tx: tx.clone(),
        cancel: Arc::clone(cancel),
    };

    agent.put(url)
        .header("content-type", "application/octet-stream")
        .header("content-length", &total.to_string())
        .send(ureq::SendBody::from_owned_reader(reader))?;

    // Final 100% tick — the last chunk usually lands between report steps.
    let _ = tx.send(ApiResult::UploadProgress { job, sent: total, total });
    Ok(())
}

/// Read adapter that counts bytes off the file and reports progress.
/// Cancellation surfaces as an io error so ureq aborts the request.
struct ProgressReader {
    inner:         File,
    job:           Uuid,
    total:         u64,
    sent:          u64,
    last_reported: u64,
    tx:            Sender<ApiResult>,
    cancel:        Arc<AtomicBool>,
}

impl Read for ProgressReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "upload cancelled"));
        }
        let n = self.inner.read(buf)?;
        self.sent += n as u64;
        if self.sent - self.last_reported >= PROGRESS_STEP {
            self.last_reported = self.sent;
            let _ = self.tx.send(ApiResult::UploadProgress {
                job:   self.job,
                sent:  self.sent,
                total: self.total,
            });
        }
        Ok(n)
    }
}
