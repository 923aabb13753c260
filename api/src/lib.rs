//! HTTP transport for the SportsX dashboard: configuration, the shared
//! session store, and the client that talks to the analysis backend.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod reports;
pub mod session;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use reports::{ReportsApi, VideoUpload};
pub use session::{AuthUser, SessionStore};
