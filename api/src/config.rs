//! Backend endpoint configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://sportsx-6.onrender.com";

/// Build-time override for the backend origin (e.g. a local dev server).
const BASE_URL_ENV: Option<&str> = option_env!("SPORTSX_API_BASE");

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Applied on native targets only; browsers own the fetch timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|err| ApiError::Config(format!("bad base url {trimmed:?}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{trimmed:?} cannot be a base url")));
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(120),
        })
    }

    /// Configuration baked in at build time, falling back to the hosted backend.
    pub fn from_build_env() -> Result<Self, ApiError> {
        Self::new(BASE_URL_ENV.unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve an absolute endpoint path (`/dash/user-id`) against the base url,
    /// keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ApiConfig::new("https://example.test/").unwrap();
        assert_eq!(config.endpoint("/dash/user-id"), "https://example.test/dash/user-id");
    }

    #[test]
    fn endpoint_keeps_base_prefix() {
        let config = ApiConfig::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            config.endpoint("/dash/upload-video"),
            "http://localhost:8000/api/dash/upload-video"
        );
    }

    #[test]
    fn rejects_garbage_urls() {
        assert!(matches!(ApiConfig::new("not a url"), Err(ApiError::Config(_))));
        assert!(matches!(ApiConfig::new("mailto:x@y.z"), Err(ApiError::Config(_))));
    }
}
