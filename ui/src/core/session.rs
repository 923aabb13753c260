//! Session workflow controller: the sport → metric → upload → report wizard,
//! its reset rules, and the history viewing sub-flow.

use std::cell::RefCell;
use std::rc::Rc;

use api::{ReportsApi, VideoUpload};
use serde_json::Value;
use thiserror::Error;

use super::history::{HistoryCache, HistorySnapshot, Settled};
use super::lifetime::until_cancelled;
use super::normalize::ResponseNormalizer;
use super::notice::NoticeBoard;
use super::report::Report;
use super::route::{RouteObserver, RouteTransition, HISTORY_ROUTE};
use super::sports::Sport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    SelectSport,
    SelectMetric,
    Upload,
    ViewReport,
}

impl WizardStage {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStage::SelectSport => "select-sport",
            WizardStage::SelectMetric => "select-metric",
            WizardStage::Upload => "upload",
            WizardStage::ViewReport => "view-report",
        }
    }
}

/// Which heading the document title shows; views localize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTitle {
    SelectSport,
    SelectMetric,
    UploadVideo,
    VideoMetrics,
    History,
}

/// The video that produced the active report. Only kept for fresh uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHandle {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: String::new(),
        }
    }
}

impl From<&VideoUpload> for FileHandle {
    fn from(video: &VideoUpload) -> Self {
        Self {
            name: video.file_name.clone(),
            size_bytes: video.bytes.len() as u64,
            mime_type: video.mime_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub sport: Option<Sport>,
    pub metric: Option<String>,
    pub report: Option<Report>,
    pub file: Option<FileHandle>,
    pub uploading: bool,
    pub upload_error: Option<String>,
}

impl SessionState {
    /// Stage follows from what has been chosen so far; a present report
    /// pins the wizard on the report view until it is cleared.
    pub fn stage(&self) -> WizardStage {
        match (&self.sport, &self.metric, &self.report) {
            (None, _, _) => WizardStage::SelectSport,
            (Some(_), None, _) => WizardStage::SelectMetric,
            (Some(_), Some(_), None) => WizardStage::Upload,
            (Some(_), Some(_), Some(_)) => WizardStage::ViewReport,
        }
    }

    pub fn metric_label(&self) -> Option<&'static str> {
        let sport = self.sport?;
        let key = self.metric.as_deref()?;
        sport.metric(key).map(|def| def.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Select a sport before choosing a metric")]
    NoSport,
    #[error("{metric} is not a metric for {sport}")]
    UnknownMetric { sport: Sport, metric: String },
    #[error("Select a sport and metric before uploading")]
    NotReadyForUpload,
    #[error("An upload is already in progress")]
    UploadInProgress,
}

pub struct SessionFlowController<B> {
    normalizer: ResponseNormalizer,
    history: Rc<HistoryCache<B>>,
    state: RefCell<SessionState>,
    routes: RefCell<RouteObserver>,
    /// Bumped by every reset so an upload started in an earlier wizard pass
    /// cannot land in a later one.
    pass: RefCell<u64>,
}

impl<B: ReportsApi> SessionFlowController<B> {
    pub fn new(normalizer: ResponseNormalizer, history: Rc<HistoryCache<B>>) -> Self {
        Self {
            normalizer,
            history,
            state: RefCell::new(SessionState::default()),
            routes: RefCell::new(RouteObserver::new()),
            pass: RefCell::new(0),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn stage(&self) -> WizardStage {
        self.state.borrow().stage()
    }

    pub fn history(&self) -> &HistoryCache<B> {
        &self.history
    }

    pub fn history_snapshot(&self) -> HistorySnapshot {
        self.history.snapshot()
    }

    pub fn notices(&self) -> &NoticeBoard {
        self.history.notices()
    }

    pub fn current_route(&self) -> Option<String> {
        self.routes.borrow().current().map(str::to_string)
    }

    pub fn select_sport(&self, sport: Sport) {
        tracing::info!(sport = sport.key(), "sport selected");
        self.next_pass();
        let mut state = self.state.borrow_mut();
        *state = SessionState {
            sport: Some(sport),
            ..SessionState::default()
        };
    }

    pub fn select_metric(&self, key: &str) -> Result<(), FlowError> {
        let mut state = self.state.borrow_mut();
        let sport = state.sport.ok_or(FlowError::NoSport)?;
        let def = sport.metric(key).ok_or_else(|| FlowError::UnknownMetric {
            sport,
            metric: key.to_string(),
        })?;
        tracing::info!(sport = sport.key(), metric = def.key, "metric selected");
        state.metric = Some(def.key.to_string());
        state.report = None;
        state.file = None;
        state.upload_error = None;
        Ok(())
    }

    /// Go back from the metric list to the sport grid.
    pub fn back_to_sports(&self) {
        self.reset("back to sports");
    }

    /// Normalize a successful upload payload and make it the active report.
    /// Returns the stored report; the caller refreshes history (see
    /// [`Self::report_ready`] for the combined operation).
    pub fn accept_report(&self, raw: &Value, file: FileHandle) -> Report {
        let report = self
            .normalizer
            .normalize_upload_result(raw)
            .with_label(file.name.clone());

        tracing::info!(report_id = %report.id, file = %file.name, "report ready");

        {
            let mut state = self.state.borrow_mut();
            state.report = Some(report.clone());
            state.file = Some(file);
            state.uploading = false;
            state.upload_error = None;
        }
        self.history.push_report(report.clone());
        report
    }

    /// Upload collaborator reported success: store the report, land on the
    /// report view and refresh history.
    pub async fn report_ready(&self, raw: &Value, file: FileHandle) -> Report {
        let report = self.accept_report(raw, file);
        self.history.load().await;
        report
    }

    /// Send `video` for analysis. Failures keep the wizard on the upload
    /// stage with an error so the user can retry without re-selecting.
    pub async fn upload(&self, video: VideoUpload) -> Result<Settled, FlowError> {
        let pass = {
            let mut state = self.state.borrow_mut();
            if state.stage() != WizardStage::Upload {
                return Err(FlowError::NotReadyForUpload);
            }
            if state.uploading {
                return Err(FlowError::UploadInProgress);
            }
            state.uploading = true;
            state.upload_error = None;
            *self.pass.borrow()
        };

        let file = FileHandle::from(&video);
        let lifetime = self.history.lifetime().clone();
        let result = until_cancelled(&lifetime, self.history.backend().upload_video(video)).await;

        let Some(result) = result else {
            return Ok(Settled::Dropped);
        };
        if *self.pass.borrow() != pass {
            tracing::debug!(file = %file.name, "discarding upload from an earlier wizard pass");
            return Ok(Settled::Dropped);
        }

        match result {
            Ok(raw) => {
                self.report_ready(&raw, file).await;
                Ok(Settled::Applied)
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "upload failed");
                let message = format!("Upload failed: {}", err.user_message());
                {
                    let mut state = self.state.borrow_mut();
                    state.uploading = false;
                    state.upload_error = Some(message.clone());
                }
                self.notices().error(message);
                Ok(Settled::Failed)
            }
        }
    }

    /// Keep sport and metric, drop the report, back to the upload stage.
    pub fn upload_another(&self) {
        tracing::info!("upload another");
        self.next_pass();
        let mut state = self.state.borrow_mut();
        state.report = None;
        state.file = None;
        state.uploading = false;
        state.upload_error = None;
    }

    pub fn start_over(&self) {
        self.reset("start over");
    }

    /// Forget everything held for the signed-in user: wizard, cached history
    /// and the last observed route, so the next sign-in counts as a fresh
    /// mount and reloads history.
    pub fn sign_out(&self) {
        self.reset("signed out");
        self.history.clear();
        *self.routes.borrow_mut() = RouteObserver::new();
    }

    /// Route-driven reset when entering the home route from elsewhere.
    pub fn on_navigate_home(&self) {
        self.reset("navigated home");
    }

    /// Returning to history always starts at the list.
    pub fn on_navigate_away_from_history(&self) {
        if self.history.viewing().is_some() {
            tracing::debug!("left history; clearing viewing pointer");
            self.history.set_viewing(None);
        }
    }

    /// Show `report` full-screen in the history sub-flow. Returns the route
    /// to navigate to when the history page is not already showing.
    pub fn select_history_report(&self, report: Report) -> Option<&'static str> {
        tracing::debug!(report_id = %report.id, "viewing history report");
        self.history.set_viewing(Some(report));
        if self.routes.borrow().is_on(HISTORY_ROUTE) {
            None
        } else {
            Some(HISTORY_ROUTE)
        }
    }

    pub fn back_to_history_list(&self) {
        self.history.set_viewing(None);
    }

    /// Nav-bar "History" click: always land on the list.
    pub fn open_history(&self) -> &'static str {
        self.history.set_viewing(None);
        HISTORY_ROUTE
    }

    pub async fn delete_report(&self, report_id: &str) -> Settled {
        self.history.delete(report_id).await
    }

    /// Feed the route observer. Applies the home reset, clears the viewing
    /// pointer off the history route, and reloads history on mount and on
    /// entry into the history route.
    pub async fn on_route_change(&self, path: &str) -> RouteTransition {
        let transition = self.routes.borrow_mut().observe(path);

        if transition.entered_home {
            self.on_navigate_home();
        }
        if !transition.on_history {
            self.on_navigate_away_from_history();
        }
        if transition.initial || transition.entered_history {
            self.history.load().await;
        }
        transition
    }

    pub fn page_title(&self) -> PageTitle {
        if self.routes.borrow().is_on(HISTORY_ROUTE) {
            return PageTitle::History;
        }
        match self.stage() {
            WizardStage::SelectSport => PageTitle::SelectSport,
            WizardStage::SelectMetric => PageTitle::SelectMetric,
            WizardStage::ViewReport => PageTitle::VideoMetrics,
            WizardStage::Upload => PageTitle::UploadVideo,
        }
    }

    /// Drop in-flight results; called when the owning component unmounts.
    pub fn teardown(&self) {
        self.history.shutdown();
    }

    fn reset(&self, reason: &str) {
        tracing::info!(reason, "resetting wizard");
        self.next_pass();
        *self.state.borrow_mut() = SessionState::default();
    }

    fn next_pass(&self) {
        *self.pass.borrow_mut() += 1;
    }
}
