//! Resource accessors for the indexer's API.
//!
//! [`Explorer`] is a cheap handle over the shared transports. Pages ask it
//! for accessors; dropping an accessor tears down everything it started.

mod addresses;
mod blocks;
mod stats;
mod transactions;
mod user_growth;

pub use addresses::{ADDRESSES_FALLBACK, ADDRESS_DETAIL_FALLBACK};
pub use blocks::{BlockId, InvalidBlockId, BLOCKS_FALLBACK, BLOCK_DETAIL_FALLBACK};
pub use stats::STATS_FALLBACK;
pub use transactions::{TransactionFilter, TRANSACTIONS_FALLBACK, TRANSACTION_DETAIL_FALLBACK};
pub use user_growth::USER_GROWTH_FALLBACK;

use std::sync::Arc;

use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::graphql::{
    fetch_field, Connection, Executor, GraphqlError, GraphqlRequest, HttpTransport, Operation,
    Subscriber, WsTransport,
};
use crate::query::{ListFetcher, ListFilter, PageRequest};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct Explorer {
    executor: Arc<dyn Executor>,
    subscriber: Option<Arc<dyn Subscriber>>,
}

impl Explorer {
    pub fn new(executor: Arc<dyn Executor>, subscriber: Option<Arc<dyn Subscriber>>) -> Self {
        Self {
            executor,
            subscriber,
        }
    }

    /// HTTP queries against `endpoint`, subscriptions against `ws_endpoint`
    /// when one is given.
    pub fn connect(endpoint: &str, ws_endpoint: Option<&str>) -> Result<Self, GraphqlError> {
        let executor = Arc::new(HttpTransport::new(endpoint)?);
        let subscriber = ws_endpoint
            .filter(|url| !url.trim().is_empty())
            .map(|url| Arc::new(WsTransport::new(url)) as Arc<dyn Subscriber>);
        Ok(Self::new(executor, subscriber))
    }

    pub fn has_subscriptions(&self) -> bool {
        self.subscriber.is_some()
    }

    fn list_fetcher<F, T>(&self, operation: Operation, field: &'static str) -> ListFetcher<F, T>
    where
        F: ListFilter,
        T: DeserializeOwned + Send + 'static,
    {
        let executor = Arc::clone(&self.executor);
        Arc::new(move |request: PageRequest<F>| {
            let executor = Arc::clone(&executor);
            async move {
                let variables = serde_json::to_value(&request)?;
                let page: Option<Connection<T>> =
                    fetch_field(executor.as_ref(), GraphqlRequest::new(operation, variables), field)
                        .await?;
                Ok::<_, GraphqlError>(page.unwrap_or_default())
            }
            .boxed()
        })
    }

    /// One-shot lookup: every failure collapses to `None`.
    async fn lookup<T: DeserializeOwned>(
        &self,
        operation: Operation,
        variables: Value,
        field: &str,
    ) -> Option<T> {
        let request = GraphqlRequest::new(operation, variables);
        match fetch_field(self.executor.as_ref(), request, field).await {
            Ok(found) => found,
            Err(e) => {
                error!(operation = operation.name, error = %e, "lookup failed");
                None
            }
        }
    }
}
