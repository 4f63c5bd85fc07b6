// crates/streamcut-api/src/client.rs
//
// Blocking client for the hosting service's REST API. Call these only from
// worker threads — every method does network I/O.

use serde::Deserialize;
use serde_json::json;

use streamcut_core::messages::ClipRequest;

use crate::error::ApiError;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Service endpoints + credentials, resolved from the environment with
/// built-in defaults. Override for staging or self-hosted deployments.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// REST API root, no trailing slash.
    pub api_base:    String,
    /// Streaming edge; renditions live at `{stream_base}/{playback_id}.m3u8`.
    pub stream_base: String,
    /// Image edge; posters live at `{image_base}/{playback_id}/thumbnail.png`.
    pub image_base:  String,
    /// Bearer token. Empty string = anonymous (the demo deployment).
    pub token:       String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let var = |key: &str, default: &str| {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };
        Self {
            api_base:    var("STREAMCUT_API_BASE", "https://api.stream.example.com/v1"),
            stream_base: var("STREAMCUT_STREAM_BASE", "https://stream.example.com"),
            image_base:  var("STREAMCUT_IMAGE_BASE", "https://image.example.com"),
            token:       var("STREAMCUT_TOKEN", ""),
        }
    }

    pub fn playback_url(&self, playback_id: &str) -> String {
        format!("{}/{playback_id}.m3u8", self.stream_base)
    }

    pub fn poster_url(&self, playback_id: &str) -> String {
        format!("{}/{playback_id}/thumbnail.png", self.image_base)
    }
}

// ── Response bodies ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClipCreated {
    pub id:          String,
    pub playback_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadTicket {
    pub id:  String,
    /// Presigned target for the raw file bytes.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadStatus {
    pub status:   String,
    /// Present once the service has turned the upload into an asset.
    #[serde(default)]
    pub asset_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetInfo {
    pub id:          String,
    pub status:      String,
    #[serde(default)]
    pub playback_id: Option<String>,
    #[serde(default)]
    pub duration:    Option<f64>,
    #[serde(default)]
    pub error:       Option<String>,
}

// ── Client ────────────────────────────────────────────────────────────────────

pub struct ServiceClient {
    pub cfg: ServiceConfig,
    agent:   ureq::Agent,
}

impl ServiceClient {
    pub fn new(cfg: ServiceConfig) -> Self {
        Self { cfg, agent: ureq::Agent::new_with_defaults() }
    }

    pub fn agent(&self) -> &ureq::Agent {
        &self.agent
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.cfg.token)
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.cfg.api_base);
        let mut resp = self.agent.get(&url)
            .header("authorization", &self.auth())
            .call()?;
        let text = resp.body_mut().read_to_string().map_err(ApiError::from)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.cfg.api_base);
        let mut resp = self.agent.post(&url)
            .header("authorization", &self.auth())
            .send_json(body)?;
        let text = resp.body_mut().read_to_string().map_err(ApiError::from)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Submit a clip request. The body is the request's serde form —
    /// exactly `source_id`, `start_time`, `end_time`.
    pub fn create_clip(&self, req: &ClipRequest) -> Result<ClipCreated, ApiError> {
        self.post_json("/clips", serde_json::to_value(req)?)
    }

    /// Ask the service for a direct-upload ticket.
    pub fn create_upload(&self) -> Result<UploadTicket, ApiError> {
        self.post_json("/uploads", json!({}))
    }

    pub fn upload_status(&self, upload_id: &str) -> Result<UploadStatus, ApiError> {
        self.get_json(&format!("/uploads/{upload_id}"))
    }

    pub fn get_asset(&self, asset_id: &str) -> Result<AssetInfo, ApiError> {
        self.get_json(&format!("/assets/{asset_id}"))
    }

    /// File an abuse report against a playback ID. 2xx means filed.
    pub fn file_report(
        &self,
        playback_id: &str,
        reason: &str,
        comment: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/reports", self.cfg.api_base);
        self.agent.post(&url)
            .header("authorization", &self.auth())
            .send_json(json!({
                "playback_id": playback_id,
                "reason":      reason,
                "comment":     comment,
            }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cfg() -> ServiceConfig {
        ServiceConfig {
            api_base:    "https://api.test/v1".into(),
            stream_base: "https://stream.test".into(),
            image_base:  "https://image.test".into(),
            token:       "tok".into(),
        }
    }

    #[test]
    fn playback_and_poster_urls() {
        let cfg = test_cfg();
        assert_eq!(cfg.playback_url("pb1"), "https://stream.test/pb1.m3u8");
        assert_eq!(cfg.poster_url("pb1"), "https://image.test/pb1/thumbnail.png");
    }

    #[test]
    fn asset_info_tolerates_missing_optional_fields() {
        let info: AssetInfo =
            serde_json::from_str(r#"{"id":"a1","status":"preparing"}"#).unwrap();
        assert_eq!(info.playback_id, None);
        assert_eq!(info.duration, None);
        assert_eq!(info.error, None);
    }

    #[test]
    fn asset_info_parses_ready_shape() {
        let info: AssetInfo = serde_json::from_str(
            r#"{"id":"a1","status":"ready","playback_id":"pb1","duration":31.4}"#,
        )
        .unwrap();
        assert_eq!(info.playback_id.as_deref(), Some("pb1"));
        assert_eq!(info.duration, Some(31.4));
    }

    #[test]
    fn upload_status_with_and_without_asset() {
        let pending: UploadStatus =
            serde_json::from_str(r#"{"status":"waiting"}"#).unwrap();
        assert_eq!(pending.asset_id, None);

        let done: UploadStatus =
            serde_json::from_str(r#"{"status":"asset_created","asset_id":"a9"}"#).unwrap();
        assert_eq!(done.asset_id.as_deref(), Some("a9"));
    }
}
