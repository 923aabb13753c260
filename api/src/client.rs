use reqwest::{header, multipart, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::reports::{ReportsApi, VideoUpload, DELETE_PATH, HISTORY_PATH, UPLOAD_PATH};
use crate::session::SessionStore;

/// Shared HTTP client. Every request carries the bearer token held by the
/// session store; a 401 from anything but the auth endpoints invalidates the
/// session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let http = builder
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        tracing::debug!(base_url = %config.base_url, "api client ready");

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.config.endpoint(path));
        match self.session.access_token() {
            Some(token) if !token.is_empty() => {
                request.header(header::AUTHORIZATION, format!("Bearer {token}"))
            }
            _ => request,
        }
    }

    pub(crate) async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if !is_auth_endpoint(path) {
                self.session.invalidate();
            }
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "request failed");
            return Err(ApiError::Status(status.as_u16(), body));
        }
        Ok(response)
    }
}

impl ReportsApi for ApiClient {
    async fn upload_video(&self, video: VideoUpload) -> Result<Value, ApiError> {
        tracing::info!(
            file = %video.file_name,
            size_mb = video.size_mb(),
            "uploading video"
        );

        let part = multipart::Part::bytes(video.bytes)
            .file_name(video.file_name)
            .mime_str(&video.mime_type)
            .map_err(|err| ApiError::Config(err.to_string()))?;
        let form = multipart::Form::new().part("video", part);

        let request = self.request(Method::POST, UPLOAD_PATH).multipart(form);
        let response = self.send(UPLOAD_PATH, request).await?;
        let body: Value = response.json().await?;
        Ok(body)
    }

    async fn fetch_history(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, HISTORY_PATH);
        let response = self.send(HISTORY_PATH, request).await?;
        let body: Value = response.json().await?;
        Ok(body)
    }

    async fn delete_reports(&self, ids: &[String]) -> Result<(), ApiError> {
        if ids.is_empty() {
            return Ok(());
        }
        tracing::info!(count = ids.len(), "deleting reports");
        let request = self.request(Method::POST, DELETE_PATH).json(ids);
        self.send(DELETE_PATH, request).await?;
        Ok(())
    }
}

/// Login/register/logout answer 401 for bad credentials; that must not wipe
/// the session or trigger a redirect.
fn is_auth_endpoint(path: &str) -> bool {
    ["auth/login", "auth/register", "auth/logout"]
        .iter()
        .any(|endpoint| path.contains(endpoint))
}
