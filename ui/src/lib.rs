//! Shared UI crate for the SportsX dashboard: session workflow state,
//! report normalization, the history cache, and the views built on them.

pub mod app;
pub mod core;
pub mod i18n;
pub mod results;
pub mod views;
pub mod wizard;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    mod shell;
    pub use shell::AppShell;

    mod toasts;
    pub use toasts::Toasts;
}
