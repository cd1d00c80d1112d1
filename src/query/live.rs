use std::sync::Arc;

use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::TaskGuard;
use crate::graphql::{decode_field, GraphqlRequest, Subscriber};

/// Latest value pushed by a subscription.
///
/// Only the newest value is kept. Dropping the last clone cancels the
/// subscription; without a subscriber the accessor stays empty.
#[derive(Clone)]
pub struct LiveQuery<T> {
    latest: watch::Receiver<Option<T>>,
    task: Option<Arc<TaskGuard>>,
}

impl<T> LiveQuery<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Subscribes with `request` and decodes `field` out of every payload.
    pub fn new(
        subscriber: Option<Arc<dyn Subscriber>>,
        request: GraphqlRequest,
        field: &'static str,
    ) -> Self {
        let (tx, latest) = watch::channel(None);
        let Some(subscriber) = subscriber else {
            return Self { latest, task: None };
        };

        let operation = request.operation_name;
        let task = tokio::spawn(async move {
            let mut stream = match subscriber.subscribe(request).await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(operation, error = %e, "subscription failed to start");
                    return;
                }
            };

            while let Some(item) = stream.next().await {
                match item.and_then(|data| decode_field::<T>(data, field)) {
                    Ok(Some(value)) => {
                        tx.send_replace(Some(value));
                    }
                    Ok(None) => debug!(operation, "subscription payload without {field}"),
                    Err(e) => warn!(operation, error = %e, "subscription error"),
                }
            }
            debug!(operation, "subscription ended");
        });

        Self {
            latest,
            task: Some(Arc::new(TaskGuard::new(task))),
        }
    }

    pub fn latest(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    /// A receiver that observes every pushed value.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.latest.clone()
    }

    /// Whether a subscription task is still running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}
