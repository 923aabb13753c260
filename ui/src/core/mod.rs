//! Platform-independent state and data handling behind the views.

pub mod format;
pub mod history;
pub mod lifetime;
pub mod normalize;
pub mod notice;
pub mod report;
pub mod route;
pub mod session;
pub mod sports;
pub mod theme;
pub mod timing;
