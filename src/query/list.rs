use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{error_text, Sequence};
use crate::graphql::{Connection, GraphqlError};

/// Optional list arguments beyond `limit` / `offset`.
pub trait ListFilter: Debug + Clone + Default + PartialEq + Serialize + Send + Sync + 'static {
    /// Overlays the fields set in `newer`; unset fields keep their value.
    fn merge(&mut self, newer: Self);
}

/// Lists that take no extra arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoFilter {}

impl ListFilter for NoFilter {
    fn merge(&mut self, _newer: Self) {}
}

/// Variables of one list query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRequest<F> {
    pub limit: u32,
    pub offset: u32,
    #[serde(flatten)]
    pub filter: F,
}

impl<F: Default> PageRequest<F> {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            filter: F::default(),
        }
    }
}

/// Overrides for [`ListQuery::refetch`]. `None` keeps the previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct Refetch<F> {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub filter: Option<F>,
}

impl<F> Default for Refetch<F> {
    fn default() -> Self {
        Self {
            limit: None,
            offset: None,
            filter: None,
        }
    }
}

impl<F> Refetch<F> {
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    fn pending() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            loading: true,
            error: None,
        }
    }
}

pub type ListFetcher<F, T> =
    Arc<dyn Fn(PageRequest<F>) -> BoxFuture<'static, Result<Connection<T>, GraphqlError>> + Send + Sync>;

struct Inner<F, T> {
    fetcher: ListFetcher<F, T>,
    request: Mutex<PageRequest<F>>,
    fallback: &'static str,
    seq: Sequence,
    state: watch::Sender<ListState<T>>,
}

/// A paginated list accessor.
///
/// Fetches on construction. Clones share one state; the last clone dropped
/// releases it.
pub struct ListQuery<F, T> {
    inner: Arc<Inner<F, T>>,
}

impl<F, T> Clone for ListQuery<F, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F, T> ListQuery<F, T>
where
    F: ListFilter,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(request: PageRequest<F>, fallback: &'static str, fetcher: ListFetcher<F, T>) -> Self {
        let (state, _) = watch::channel(ListState::pending());
        let query = Self {
            inner: Arc::new(Inner {
                fetcher,
                request: Mutex::new(request),
                fallback,
                seq: Sequence::default(),
                state,
            }),
        };
        tokio::spawn(query.start());
        query
    }

    /// Current snapshot.
    pub fn state(&self) -> ListState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.inner.state.subscribe()
    }

    /// The variables the latest fetch was issued with.
    pub fn request(&self) -> PageRequest<F> {
        self.lock_request().clone()
    }

    /// Re-issues the query and waits for it. Stale in-flight responses are
    /// discarded once this one is issued.
    pub async fn refetch(&self, refetch: Refetch<F>) {
        self.apply(refetch);
        self.start().await
    }

    /// Like [`refetch`](Self::refetch) without waiting.
    pub fn spawn_refetch(&self, refetch: Refetch<F>) {
        self.apply(refetch);
        tokio::spawn(self.start());
    }

    /// Waits until no fetch is pending and returns that snapshot.
    pub async fn settled(&self) -> ListState<T> {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|s| !s.loading).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.state())
    }

    fn lock_request(&self) -> std::sync::MutexGuard<'_, PageRequest<F>> {
        self.inner.request.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, refetch: Refetch<F>) {
        let mut request = self.lock_request();
        if let Some(limit) = refetch.limit {
            request.limit = limit;
        }
        if let Some(offset) = refetch.offset {
            request.offset = offset;
        }
        if let Some(filter) = refetch.filter {
            request.filter.merge(filter);
        }
    }

    /// Issues a sequence number now; the returned future performs the fetch.
    fn start(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let request = self.request();
        let seq = self.inner.seq.issue();
        self.inner.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let inner = Arc::clone(&self.inner);
        async move {
            let result = (inner.fetcher)(request).await;
            let next = match result {
                Ok(conn) => ListState {
                    items: conn.items,
                    total_count: conn.total_count,
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    warn!(error = %e, "{}", inner.fallback);
                    ListState {
                        items: Vec::new(),
                        total_count: 0,
                        loading: false,
                        error: Some(error_text(&e, inner.fallback)),
                    }
                }
            };

            let applied = inner.state.send_if_modified(|state| {
                if !inner.seq.is_latest(seq) {
                    return false;
                }
                *state = next;
                true
            });
            if !applied {
                debug!(seq, "discarding stale list response");
            }
        }
    }
}
