//! End-to-end wizard and history scenarios against an in-memory backend.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use api::{ApiError, ReportsApi, VideoUpload};
use futures::executor::block_on;
use serde_json::{json, Value};

use ui::core::history::{HistoryCache, Settled};
use ui::core::normalize::ResponseNormalizer;
use ui::core::notice::{NoticeBoard, NoticeKind};
use ui::core::report::StatValue;
use ui::core::route::{HISTORY_ROUTE, HOME_ROUTE};
use ui::core::session::{SessionFlowController, WizardStage};
use ui::core::sports::Sport;

/// Stores uploaded reports and serves them back wrapped under `result`.
#[derive(Default)]
struct MemoryBackend {
    stored: RefCell<Vec<Value>>,
    uploads: RefCell<Vec<String>>,
    fail_uploads: Cell<bool>,
}

impl ReportsApi for MemoryBackend {
    async fn upload_video(&self, video: VideoUpload) -> Result<Value, ApiError> {
        self.uploads.borrow_mut().push(video.file_name.clone());
        if self.fail_uploads.get() {
            return Err(ApiError::Status(413, "File too large".into()));
        }

        let id = format!("r{}", self.stored.borrow().len() + 1);
        let performance = json!([
            { "fighter_A": { "total_punches": 40, "accuracy": 55, "corner": { "corner_name": "Red corner", "trunk_color_detected": "red" } } },
            { "fighter_B": { "total_punches": 31, "accuracy": 48 } }
        ]);
        let record = json!({
            "_id": id,
            "user_id": "athlete-1",
            "sport": "boxing",
            "performance": performance,
            "created_at": "2024-03-05T14:30:00Z",
            "updated_at": "2024-03-05T14:30:00Z"
        });
        self.stored.borrow_mut().push(record.clone());

        Ok(json!({
            "message": "Video analyzed",
            "user_id": "athlete-1",
            "response": performance,
            "report": record
        }))
    }

    async fn fetch_history(&self) -> Result<Value, ApiError> {
        Ok(json!({ "result": self.stored.borrow().clone() }))
    }

    async fn delete_reports(&self, ids: &[String]) -> Result<(), ApiError> {
        self.stored
            .borrow_mut()
            .retain(|record| !ids.iter().any(|id| record["_id"] == json!(id)));
        Ok(())
    }
}

fn flow() -> SessionFlowController<MemoryBackend> {
    let history = Rc::new(HistoryCache::new(
        MemoryBackend::default(),
        ResponseNormalizer,
        NoticeBoard::new(),
    ));
    SessionFlowController::new(ResponseNormalizer, history)
}

#[test]
fn boxing_upload_lands_on_report_and_grows_history() {
    let flow = flow();
    block_on(flow.on_route_change(HOME_ROUTE));
    let before = flow.history().len();

    flow.select_sport(Sport::Boxing);
    flow.select_metric("punchAccuracy").unwrap();
    let outcome = block_on(flow.upload(VideoUpload::new("session.mp4", vec![0u8; 1024])));
    assert_eq!(outcome, Ok(Settled::Applied));

    let state = flow.state();
    assert_eq!(state.stage(), WizardStage::ViewReport);
    assert_eq!(state.file.as_ref().unwrap().name, "session.mp4");

    let report = state.report.unwrap();
    assert_eq!(report.label, "session.mp4");
    assert!(report.has_fighter_data());
    assert_eq!(report.response.primary.total_punches, Some(StatValue::Number(40.0)));
    assert_eq!(report.response.secondary.total_punches, Some(StatValue::Number(31.0)));
    assert_eq!(report.performance, report.response);
    assert_eq!(
        report.response.primary.corner.corner_name.as_deref(),
        Some("Red corner")
    );

    assert_eq!(flow.history().len(), before + 1);
    assert_eq!(flow.history_snapshot().reports[0].id, report.id);
}

#[test]
fn returning_home_from_history_resets_the_wizard() {
    let flow = flow();
    block_on(flow.on_route_change(HOME_ROUTE));
    flow.select_sport(Sport::Boxing);
    flow.select_metric("punchSpeed").unwrap();
    block_on(flow.upload(VideoUpload::new("bout.mp4", vec![1]))).unwrap();
    assert_eq!(flow.stage(), WizardStage::ViewReport);

    block_on(flow.on_route_change(HISTORY_ROUTE));
    block_on(flow.on_route_change(HOME_ROUTE));

    let state = flow.state();
    assert_eq!(state.stage(), WizardStage::SelectSport);
    assert!(state.sport.is_none() && state.metric.is_none() && state.report.is_none());
}

#[test]
fn rerendering_home_keeps_the_wizard() {
    let flow = flow();
    block_on(flow.on_route_change(HOME_ROUTE));
    flow.select_sport(Sport::Judo);
    flow.select_metric("gripTime").unwrap();

    let transition = block_on(flow.on_route_change(HOME_ROUTE));
    assert!(!transition.changed);
    assert_eq!(flow.stage(), WizardStage::Upload);
    assert_eq!(flow.state().metric.as_deref(), Some("gripTime"));
}

#[test]
fn failed_upload_can_be_retried_without_reselecting() {
    let flow = flow();
    flow.select_sport(Sport::Boxing);
    flow.select_metric("ringCoverage").unwrap();
    flow.history().backend().fail_uploads.set(true);

    let outcome = block_on(flow.upload(VideoUpload::new("huge.mp4", vec![1])));
    assert_eq!(outcome, Ok(Settled::Failed));
    assert_eq!(flow.stage(), WizardStage::Upload);
    let notice = flow.notices().last().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("File too large"));

    flow.history().backend().fail_uploads.set(false);
    let outcome = block_on(flow.upload(VideoUpload::new("small.mp4", vec![1])));
    assert_eq!(outcome, Ok(Settled::Applied));
    assert_eq!(flow.stage(), WizardStage::ViewReport);
    assert!(flow.state().upload_error.is_none());
    assert_eq!(
        *flow.history().backend().uploads.borrow(),
        vec!["huge.mp4".to_string(), "small.mp4".to_string()]
    );
}

#[test]
fn entering_history_refreshes_and_deleting_viewed_report_returns_to_list() {
    let flow = flow();
    block_on(flow.on_route_change(HOME_ROUTE));
    for name in ["one.mp4", "two.mp4"] {
        flow.select_sport(Sport::Boxing);
        flow.select_metric("punchSpeed").unwrap();
        block_on(flow.upload(VideoUpload::new(name, vec![1]))).unwrap();
    }

    block_on(flow.on_route_change(HISTORY_ROUTE));
    let reports = flow.history_snapshot().reports;
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.label.starts_with("Boxing – ")));

    let viewed = reports[1].clone();
    assert_eq!(flow.select_history_report(viewed.clone()), None);
    assert_eq!(block_on(flow.delete_report(&viewed.id)), Settled::Applied);

    let snapshot = flow.history_snapshot();
    assert_eq!(snapshot.reports.len(), 1);
    assert!(snapshot.viewing.is_none());
    assert!(snapshot.reports.iter().all(|r| r.id != viewed.id));
}

#[test]
fn signing_out_forgets_the_previous_users_history() {
    let flow = flow();
    block_on(flow.on_route_change(HOME_ROUTE));
    flow.select_sport(Sport::Boxing);
    flow.select_metric("punchAccuracy").unwrap();
    let outcome = block_on(flow.upload(VideoUpload::new("mine.mp4", vec![1])));
    assert_eq!(outcome, Ok(Settled::Applied));
    assert_eq!(flow.history().len(), 1);

    flow.sign_out();
    assert!(flow.history().is_empty());
    assert_eq!(flow.stage(), WizardStage::SelectSport);
    assert!(flow.current_route().is_none());

    // The next account has no reports of its own.
    flow.history().backend().stored.borrow_mut().clear();
    let transition = block_on(flow.on_route_change(HOME_ROUTE));
    assert!(transition.initial);
    assert!(flow.history().is_empty());
}
