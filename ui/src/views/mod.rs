mod auth;
pub use auth::{Login, Register};

mod dashboard;
pub use dashboard::Dashboard;

mod history;
pub use history::History;
