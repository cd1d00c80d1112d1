use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{error_text, Sequence, TaskGuard};
use crate::graphql::GraphqlError;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState<T> {
    /// `None` while loading, after an error, or when the server returned null.
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> DetailState<T> {
    fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// Loaded without error but the server had nothing for the key.
    pub fn is_not_found(&self) -> bool {
        !self.loading && self.error.is_none() && self.data.is_none()
    }
}

pub type DetailFetcher<K, T> =
    Arc<dyn Fn(K) -> BoxFuture<'static, Result<Option<T>, GraphqlError>> + Send + Sync>;

/// A key source that never changes.
pub fn fixed_key<K>(key: K) -> watch::Receiver<K> {
    let (_tx, rx) = watch::channel(key);
    rx
}

struct Inner<K, T> {
    fetcher: DetailFetcher<K, T>,
    key: watch::Receiver<K>,
    fallback: &'static str,
    seq: Sequence,
    state: watch::Sender<DetailState<T>>,
}

impl<K, T> Inner<K, T>
where
    K: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn start(self: &Arc<Self>, key: K) -> impl std::future::Future<Output = ()> + Send + 'static {
        let seq = self.seq.issue();
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let inner = Arc::clone(self);
        async move {
            let next = match (inner.fetcher)(key).await {
                Ok(data) => DetailState {
                    data,
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    warn!(error = %e, "{}", inner.fallback);
                    DetailState {
                        data: None,
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
                debug!(seq, "discarding stale detail response");
            }
        }
    }
}

/// Fetches one record and re-fetches whenever its key changes.
///
/// The key observer task lives as long as any clone of the accessor.
pub struct DetailQuery<K, T> {
    inner: Arc<Inner<K, T>>,
    _observer: Arc<TaskGuard>,
}

impl<K, T> Clone for DetailQuery<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _observer: Arc::clone(&self._observer),
        }
    }
}

impl<K, T> DetailQuery<K, T>
where
    K: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(key: watch::Receiver<K>, fallback: &'static str, fetcher: DetailFetcher<K, T>) -> Self {
        let mut keys = key.clone();
        let initial = keys.borrow_and_update().clone();

        let (state, _) = watch::channel(DetailState::pending());
        let inner = Arc::new(Inner {
            fetcher,
            key,
            fallback,
            seq: Sequence::default(),
            state,
        });
        tokio::spawn(inner.start(initial));

        let observed = Arc::clone(&inner);
        let observer = tokio::spawn(async move {
            while keys.changed().await.is_ok() {
                let key = keys.borrow_and_update().clone();
                tokio::spawn(observed.start(key));
            }
        });

        Self {
            inner,
            _observer: Arc::new(TaskGuard::new(observer)),
        }
    }

    pub fn state(&self) -> DetailState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState<T>> {
        self.inner.state.subscribe()
    }

    pub fn key(&self) -> K {
        self.inner.key.borrow().clone()
    }

    /// Re-issues the query for the current key and waits for it.
    pub async fn refetch(&self) {
        self.inner.start(self.key()).await
    }

    pub fn spawn_refetch(&self) {
        tokio::spawn(self.inner.start(self.key()));
    }

    pub async fn settled(&self) -> DetailState<T> {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|s| !s.loading).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| self.state())
    }
}
