//! Dashboard wizard steps: sport grid, metric list, upload panel.

mod metric;
pub use metric::MetricPicker;

mod sport;
pub use sport::SportPicker;

mod upload;
pub use upload::UploadPanel;
