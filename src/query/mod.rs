//! Reactive accessor primitives.
//!
//! Every accessor owns a `watch` channel holding its current snapshot. The
//! render loop reads snapshots with `state()`, tests await `settled()`.

mod detail;
mod list;
mod live;

pub use detail::{fixed_key, DetailFetcher, DetailQuery, DetailState};
pub use list::{ListFetcher, ListFilter, ListQuery, ListState, NoFilter, PageRequest, Refetch};
pub use live::LiveQuery;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;

use crate::graphql::GraphqlError;

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub struct TaskGuard(JoinHandle<()>);

impl TaskGuard {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Request numbering for one accessor instance.
///
/// Only the response to the most recently issued number may be applied.
#[derive(Debug, Default)]
pub(crate) struct Sequence(AtomicU64);

impl Sequence {
    pub(crate) fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_latest(&self, seq: u64) -> bool {
        self.0.load(Ordering::SeqCst) == seq
    }
}

/// The message shown for a failed fetch.
pub(crate) fn error_text(error: &GraphqlError, fallback: &str) -> String {
    error.message().unwrap_or_else(|| fallback.to_string())
}
