//! Client-held session data (tokens and the signed-in user).
//!
//! One `SessionStore` is created at startup and shared by handle between the
//! transport and the UI. Every read and write goes through the accessors
//! below; on wasm the data is mirrored into `window.sessionStorage` so a page
//! reload keeps the user signed in for the lifetime of the tab.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "sportsx.session";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("Athlete")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionData {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Debug, Default)]
struct SessionInner {
    data: SessionData,
    /// Set when the backend invalidated the session; consumed by the UI
    /// to redirect to the login page.
    redirect_pending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Rc<RefCell<SessionInner>>,
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SessionStore {
    /// Empty, unauthenticated store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from browser storage when available.
    pub fn restore() -> Self {
        let store = Self::new();
        if let Some(data) = load_persisted() {
            tracing::debug!(has_token = data.access_token.is_some(), "restored session");
            store.inner.borrow_mut().data = data;
        }
        store
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.borrow().data.access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.borrow().data.refresh_token.clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.inner.borrow().data.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .borrow()
            .data
            .access_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    pub fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.data.access_token = Some(access_token);
            inner.data.refresh_token = refresh_token;
            inner.redirect_pending = false;
        }
        self.persist();
    }

    pub fn set_user(&self, user: Option<AuthUser>) {
        self.inner.borrow_mut().data.user = user;
        self.persist();
    }

    /// Drop everything held for the current user (logout).
    pub fn clear(&self) {
        self.inner.borrow_mut().data = SessionData::default();
        self.persist();
    }

    /// Backend rejected our credentials: clear and flag a redirect to login.
    pub fn invalidate(&self) {
        tracing::warn!("session invalidated by backend");
        {
            let mut inner = self.inner.borrow_mut();
            inner.data = SessionData::default();
            inner.redirect_pending = true;
        }
        self.persist();
    }

    /// Returns `true` once per invalidation.
    pub fn take_redirect(&self) -> bool {
        std::mem::take(&mut self.inner.borrow_mut().redirect_pending)
    }

    fn persist(&self) {
        let data = self.inner.borrow().data.clone();
        save_persisted(&data);
    }
}

#[cfg(target_arch = "wasm32")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn load_persisted() -> Option<SessionData> {
    let raw = session_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_persisted() -> Option<SessionData> {
    None
}

#[cfg(target_arch = "wasm32")]
fn save_persisted(data: &SessionData) {
    let Some(storage) = session_storage() else {
        return;
    };
    let result = if *data == SessionData::default() {
        storage.remove_item(STORAGE_KEY)
    } else {
        match serde_json::to_string(data) {
            Ok(json) => storage.set_item(STORAGE_KEY, &json),
            Err(_) => return,
        }
    };
    if result.is_err() {
        tracing::warn!("could not write session storage");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_persisted(_data: &SessionData) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.set_tokens("abc".into(), Some("def".into()));
        assert!(other.is_authenticated());
        assert_eq!(other.access_token().as_deref(), Some("abc"));
        assert_eq!(other.refresh_token().as_deref(), Some("def"));
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let store = SessionStore::new();
        store.set_tokens(String::new(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn invalidate_clears_and_flags_redirect_once() {
        let store = SessionStore::new();
        store.set_tokens("abc".into(), None);
        store.set_user(Some(AuthUser {
            username: Some("ali".into()),
            ..AuthUser::default()
        }));

        store.invalidate();

        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(store.take_redirect());
        assert!(!store.take_redirect());
    }

    #[test]
    fn clear_does_not_request_redirect() {
        let store = SessionStore::new();
        store.set_tokens("abc".into(), None);
        store.clear();
        assert!(!store.is_authenticated());
        assert!(!store.take_redirect());
    }

    #[test]
    fn display_name_prefers_name_then_username() {
        let user = AuthUser {
            username: Some("ali".into()),
            email: Some("ali@example.com".into()),
            ..AuthUser::default()
        };
        assert_eq!(user.display_name(), "ali");
        assert_eq!(AuthUser::default().display_name(), "Athlete");
    }
}
