//! Sign-in, registration and sign-out.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::{AuthUser, SessionStore};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn new(username: String, email: String, password: String) -> Self {
        Self {
            username,
            email,
            password,
            role: "user".to_string(),
        }
    }
}

/// Login answers with tokens at the top level, registration nests them
/// under `user`; both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
struct TokenEnvelope {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<UserEnvelope>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UserEnvelope {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenEnvelope {
    /// Write tokens and user into the store. Fails when no access token is present.
    fn persist_into(self, session: &SessionStore) -> Result<AuthUser, ApiError> {
        let nested = self.user.unwrap_or_default();
        let access_token = self
            .access_token
            .or(nested.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Decode("response carried no access token".into()))?;
        let refresh_token = self.refresh_token.or(nested.refresh_token);

        let user = AuthUser {
            id: nested.id,
            name: nested.name,
            username: nested.username,
            email: nested.email,
            role: nested.role,
        };

        session.set_tokens(access_token, refresh_token);
        session.set_user(Some(user.clone()));
        Ok(user)
    }
}

impl ApiClient {
    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthUser, ApiError> {
        let request = self.request(Method::POST, LOGIN_PATH).json(payload);
        let response = self
            .send(LOGIN_PATH, request)
            .await
            .map_err(credentials_error)?;
        let envelope: TokenEnvelope = response.json().await?;
        let user = envelope.persist_into(self.session())?;
        tracing::info!(user = user.display_name(), "signed in");
        Ok(user)
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthUser, ApiError> {
        let request = self.request(Method::POST, REGISTER_PATH).json(payload);
        let response = self
            .send(REGISTER_PATH, request)
            .await
            .map_err(credentials_error)?;
        let envelope: TokenEnvelope = response.json().await?;
        let user = envelope.persist_into(self.session())?;
        tracing::info!(user = user.display_name(), "registered");
        Ok(user)
    }

    /// Local state is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = self.request(Method::POST, LOGOUT_PATH);
        let result = self.send(LOGOUT_PATH, request).await.map(|_| ());
        if let Err(err) = &result {
            tracing::warn!(error = %err, "logout request failed; clearing session anyway");
        }
        self.session().clear();
        result
    }
}

fn credentials_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Unauthorized => ApiError::Status(401, "Invalid email or password".into()),
        other => other,
    }
}
