//! Services shared by every view through the Dioxus context.
//!
//! The controller lives outside the signal graph (it is plain `Rc` state that
//! async tasks mutate), so views subscribe to `revision` and every mutation
//! bumps it once it settled.

use std::future::Future;
use std::rc::Rc;

use api::{ApiClient, ApiConfig, ApiError, SessionStore};
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::core::history::HistoryCache;
use crate::core::normalize::ResponseNormalizer;
use crate::core::notice::NoticeBoard;
use crate::core::session::SessionFlowController;
use crate::core::theme::Theme;

pub type Controller = SessionFlowController<ApiClient>;

#[derive(Clone)]
pub struct AppServices {
    pub controller: Rc<Controller>,
    pub client: ApiClient,
    pub session: SessionStore,
    pub revision: Signal<u64>,
    pub theme: Signal<Theme>,
}

impl AppServices {
    /// Build the client stack from the compile-time configuration. Must run
    /// inside a component scope (creates a signal).
    pub fn from_build_env() -> Result<Self, ApiError> {
        let config = ApiConfig::from_build_env()?;
        let session = SessionStore::restore();
        let client = ApiClient::new(config, session.clone())?;
        tracing::info!(base_url = %client.config().base_url, "api client ready");

        let history = Rc::new(HistoryCache::new(
            client.clone(),
            ResponseNormalizer,
            NoticeBoard::new(),
        ));
        let controller = Rc::new(SessionFlowController::new(ResponseNormalizer, history));

        Ok(Self {
            controller,
            client,
            session,
            revision: Signal::new(0),
            theme: Signal::new(Theme::restore()),
        })
    }

    pub fn notices(&self) -> &NoticeBoard {
        self.controller.notices()
    }

    /// Mark controller state as changed so subscribed views re-render.
    pub fn touch(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    pub fn toggle_theme(&self) {
        let mut theme = self.theme;
        let next = theme().toggled();
        next.persist();
        theme.set(next);
    }

    /// Drop everything held for the previous user and go back to the light
    /// scheme. The session store itself is cleared by the transport.
    pub fn sign_out(&self) {
        self.controller.sign_out();
        let mut theme = self.theme;
        Theme::Light.persist();
        theme.set(Theme::Light);
        self.touch();
    }

    /// Run `task` on the UI executor and re-render once it settled.
    pub fn run<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let services = self.clone();
        spawn(async move {
            task.await;
            services.touch();
        });
    }
}

/// Access the services installed by the platform crate.
pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

/// Routing hook installed by the platform crate, which owns the `Route` enum.
/// Receives one of the path constants in [`crate::core::route`].
static NAVIGATE: OnceCell<fn(&str)> = OnceCell::new();

pub fn register_navigate(navigate: fn(&str)) {
    let _ = NAVIGATE.set(navigate);
}

pub fn navigate(path: &str) {
    match NAVIGATE.get() {
        Some(go) => go(path),
        None => tracing::warn!(path, "no navigation handler registered"),
    }
}
