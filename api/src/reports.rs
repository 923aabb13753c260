//! Report endpoints consumed by the dashboard core.
//!
//! Payloads are handed back as raw JSON: the backend is inconsistent about
//! shapes and the UI crate owns normalization.

use serde_json::Value;

use crate::error::ApiError;

pub const UPLOAD_PATH: &str = "/dash/upload-video";
pub const HISTORY_PATH: &str = "/dash/user-id";
pub const DELETE_PATH: &str = "/dash/delete-reports";

/// A video picked by the user, read fully into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl VideoUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_video_mime(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }
}

fn guess_video_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// Backend operations behind the upload / history flow.
///
/// Implementations are driven from the single UI thread, so the returned
/// futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait ReportsApi {
    /// Multipart upload with a single `video` field; returns the raw analysis payload.
    async fn upload_video(&self, video: VideoUpload) -> Result<Value, ApiError>;

    /// Raw history body: a bare array or an object wrapping one.
    async fn fetch_history(&self) -> Result<Value, ApiError>;

    /// Delete the given reports. An empty slice must not hit the network.
    async fn delete_reports(&self, ids: &[String]) -> Result<(), ApiError>;
}
