//! User-visible notices (toasts) raised by the controller and the history cache.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// How long a toast stays up before it dismisses itself.
pub const NOTICE_DURATION_MS: u64 = 4_000;

const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn css_modifier(self) -> &'static str {
        match self {
            NoticeKind::Success => "toast--success",
            NoticeKind::Error => "toast--error",
            NoticeKind::Info => "toast--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    items: Vec<Notice>,
}

/// Shared queue of notices. Clones are handles onto the same queue.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    inner: Rc<RefCell<Board>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let mut board = self.inner.borrow_mut();
        let id = board.next_id;
        board.next_id += 1;
        board.items.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        if board.items.len() > MAX_VISIBLE {
            let overflow = board.items.len() - MAX_VISIBLE;
            board.items.drain(..overflow);
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, message)
    }

    pub fn dismiss(&self, id: u64) {
        self.inner.borrow_mut().items.retain(|notice| notice.id != id);
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        self.inner.borrow().items.clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.inner.borrow().items.last().cloned()
    }
}

/// Remembers which visible notices already have a dismiss timer, so each
/// gets exactly one. Ids leave the set once their notice is gone.
#[derive(Debug, Default)]
pub struct DismissSchedule {
    timed: BTreeSet<u64>,
}

impl DismissSchedule {
    /// Ids among `visible` that still need a timer.
    pub fn due(&mut self, visible: &[Notice]) -> Vec<u64> {
        self.timed
            .retain(|id| visible.iter().any(|notice| notice.id == *id));
        visible
            .iter()
            .filter(|notice| self.timed.insert(notice.id))
            .map(|notice| notice.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_dismiss_removes_one() {
        let board = NoticeBoard::new();
        let a = board.success("saved");
        let b = board.error("failed");
        assert_ne!(a, b);

        board.dismiss(a);
        let left = board.snapshot();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].kind, NoticeKind::Error);
    }

    #[test]
    fn oldest_notices_fall_off() {
        let board = NoticeBoard::new();
        for i in 0..8 {
            board.info(format!("n{i}"));
        }
        let items = board.snapshot();
        assert_eq!(items.len(), MAX_VISIBLE);
        assert_eq!(items[0].message, "n3");
        assert_eq!(board.last().unwrap().message, "n7");
    }

    #[test]
    fn schedule_times_each_notice_once_and_forgets_dismissed() {
        let board = NoticeBoard::new();
        let mut schedule = DismissSchedule::default();
        let a = board.success("saved");
        let b = board.info("hello");

        assert_eq!(schedule.due(&board.snapshot()), vec![a, b]);
        assert!(schedule.due(&board.snapshot()).is_empty());

        board.dismiss(a);
        let c = board.error("failed");
        assert_eq!(schedule.due(&board.snapshot()), vec![c]);
        assert_eq!(schedule.len(), 2);

        board.dismiss(b);
        board.dismiss(c);
        assert!(schedule.due(&board.snapshot()).is_empty());
        assert!(schedule.is_empty());
    }
}
