//! Cache of previously analyzed reports plus the history viewing pointer.
//!
//! The list is replaced wholesale on every load; when loads overlap, the one
//! that settles last wins. Deletion is request-then-update: the list only
//! changes after the backend confirmed. Borrows of the inner state are never
//! held across an `.await`.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use api::ReportsApi;
use tokio_util::sync::CancellationToken;

use super::lifetime::until_cancelled;
use super::normalize::ResponseNormalizer;
use super::notice::NoticeBoard;
use super::report::Report;

/// How an asynchronous cache operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Failed,
    /// The owner was torn down while the request was in flight.
    Dropped,
    /// Rejected up front (e.g. a delete for the same id is still pending).
    Busy,
}

/// Read-only view handed to rendering code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub reports: Vec<Report>,
    pub viewing: Option<Report>,
    pub loading: bool,
    pub deleting: BTreeSet<String>,
}

impl HistorySnapshot {
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }
}

/// Proof that a delete was registered as pending; consumed by
/// [`HistoryCache::finish_delete`]. The pending flag is released when the
/// ticket drops, so a cancelled task cannot leave the id locked.
#[derive(Debug)]
pub struct DeleteTicket {
    report_id: String,
    state: Rc<RefCell<HistoryState>>,
}

impl Drop for DeleteTicket {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.deleting.remove(&self.report_id);
        } else {
            tracing::warn!(report_id = %self.report_id, "history state busy; delete flag kept");
        }
    }
}

/// Counts a load as in flight for as long as it lives.
struct LoadGuard {
    state: Rc<RefCell<HistoryState>>,
}

impl LoadGuard {
    fn enter(state: &Rc<RefCell<HistoryState>>) -> Self {
        state.borrow_mut().loads_in_flight += 1;
        Self {
            state: Rc::clone(state),
        }
    }
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        }
    }
}

#[derive(Debug, Default)]
struct HistoryState {
    reports: Vec<Report>,
    viewing: Option<Report>,
    loads_in_flight: usize,
    deleting: BTreeSet<String>,
    /// Bumped by [`HistoryCache::clear`]; loads started under an older
    /// generation are discarded.
    generation: u64,
}

pub struct HistoryCache<B> {
    backend: B,
    normalizer: ResponseNormalizer,
    notices: NoticeBoard,
    state: Rc<RefCell<HistoryState>>,
    lifetime: CancellationToken,
}

impl<B: ReportsApi> HistoryCache<B> {
    pub fn new(backend: B, normalizer: ResponseNormalizer, notices: NoticeBoard) -> Self {
        Self {
            backend,
            normalizer,
            notices,
            state: Rc::new(RefCell::new(HistoryState::default())),
            lifetime: CancellationToken::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn lifetime(&self) -> &CancellationToken {
        &self.lifetime
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        let state = self.state.borrow();
        HistorySnapshot {
            reports: state.reports.clone(),
            viewing: state.viewing.clone(),
            loading: state.loads_in_flight > 0,
            deleting: state.deleting.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn viewing(&self) -> Option<Report> {
        self.state.borrow().viewing.clone()
    }

    pub fn set_viewing(&self, report: Option<Report>) {
        self.state.borrow_mut().viewing = report;
    }

    /// Fetch the history list and replace the cached one.
    pub async fn load(&self) -> Settled {
        let guard = LoadGuard::enter(&self.state);
        let generation = self.state.borrow().generation;

        let result = until_cancelled(&self.lifetime, self.backend.fetch_history()).await;
        drop(guard);

        let mut state = self.state.borrow_mut();
        if state.generation != generation {
            tracing::debug!("discarding history load from before a clear");
            return Settled::Dropped;
        }

        match result {
            None => Settled::Dropped,
            Some(Ok(body)) => {
                state.reports = self.normalizer.history_reports(&body);
                tracing::debug!(count = state.reports.len(), "history loaded");
                Settled::Applied
            }
            Some(Err(err)) => {
                drop(state);
                tracing::warn!(error = %err, "history load failed");
                self.notices
                    .error(format!("Couldn't load history: {}", err.user_message()));
                Settled::Failed
            }
        }
    }

    /// Delete one report. The cache is only touched after the backend
    /// confirmed; failures leave list and viewing pointer as they were.
    pub async fn delete(&self, report_id: &str) -> Settled {
        match self.begin_delete(report_id) {
            Some(ticket) => self.finish_delete(ticket).await,
            None => Settled::Busy,
        }
    }

    /// Mark `report_id` as pending so views can disable its controls before
    /// the request goes out. `None` while a delete for that id is in flight.
    pub fn begin_delete(&self, report_id: &str) -> Option<DeleteTicket> {
        let inserted = self
            .state
            .borrow_mut()
            .deleting
            .insert(report_id.to_string());
        if !inserted {
            tracing::debug!(report_id, "delete already pending");
            return None;
        }
        Some(DeleteTicket {
            report_id: report_id.to_string(),
            state: Rc::clone(&self.state),
        })
    }

    pub async fn finish_delete(&self, ticket: DeleteTicket) -> Settled {
        let ids = [ticket.report_id.clone()];
        let result = until_cancelled(&self.lifetime, self.backend.delete_reports(&ids)).await;
        drop(ticket);

        let report_id = ids[0].as_str();
        let mut state = self.state.borrow_mut();

        match result {
            None => Settled::Dropped,
            Some(Ok(())) => {
                state.reports.retain(|report| report.id != report_id);
                if state
                    .viewing
                    .as_ref()
                    .is_some_and(|viewing| viewing.id == report_id)
                {
                    state.viewing = None;
                }
                drop(state);
                tracing::info!(report_id, "report deleted");
                self.notices.success("Report deleted");
                Settled::Applied
            }
            Some(Err(err)) => {
                drop(state);
                tracing::warn!(report_id, error = %err, "delete failed");
                self.notices.error("Failed to delete report");
                Settled::Failed
            }
        }
    }

    /// Put a freshly analyzed report at the top of the list until the next
    /// load replaces it. Reports already present (same id) are left alone.
    pub fn push_report(&self, report: Report) {
        let mut state = self.state.borrow_mut();
        if !report.id.is_empty() && state.reports.iter().any(|r| r.id == report.id) {
            return;
        }
        state.reports.insert(0, report);
    }

    /// Forget everything cached for the signed-in user. Loads still in
    /// flight will not repopulate the list.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.reports.clear();
        state.viewing = None;
        state.deleting.clear();
        tracing::debug!("history cache cleared");
    }

    /// Drop results of anything still in flight.
    pub fn shutdown(&self) {
        self.lifetime.cancel();
    }
}
