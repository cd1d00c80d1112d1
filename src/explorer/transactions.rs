use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde_json::json;
use tokio::sync::watch;

use super::Explorer;
use crate::graphql::{fetch_field, queries, GraphqlRequest, Transaction, TransactionDetail};
use crate::query::{DetailQuery, ListFilter, ListQuery, LiveQuery, PageRequest};

pub const TRANSACTIONS_FALLBACK: &str = "Failed to fetch transactions";
pub const TRANSACTION_DETAIL_FALLBACK: &str = "Failed to fetch transaction details";

/// Narrows a transaction list to one block or one address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl TransactionFilter {
    pub fn block(number: u64) -> Self {
        Self {
            block_number: Some(number),
            address: None,
        }
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self {
            block_number: None,
            address: Some(address.into()),
        }
    }
}

impl ListFilter for TransactionFilter {
    fn merge(&mut self, newer: Self) {
        if newer.block_number.is_some() {
            self.block_number = newer.block_number;
        }
        if newer.address.is_some() {
            self.address = newer.address;
        }
    }
}

impl Explorer {
    pub fn transactions(
        &self,
        limit: u32,
        offset: u32,
        filter: TransactionFilter,
    ) -> ListQuery<TransactionFilter, Transaction> {
        ListQuery::new(
            PageRequest {
                limit,
                offset,
                filter,
            },
            TRANSACTIONS_FALLBACK,
            self.list_fetcher(queries::GET_TRANSACTIONS, "transactions"),
        )
    }

    pub fn live_transactions(&self) -> LiveQuery<Transaction> {
        LiveQuery::new(
            self.subscriber.clone(),
            GraphqlRequest::without_variables(queries::SUBSCRIBE_TRANSACTIONS),
            "transactions",
        )
    }

    pub async fn fetch_transaction_by_hash(&self, hash: &str) -> Option<Transaction> {
        self.lookup(queries::GET_TRANSACTION, json!({ "hash": hash }), "transaction")
            .await
    }

    pub fn transaction_detail(
        &self,
        hash: watch::Receiver<String>,
    ) -> DetailQuery<String, TransactionDetail> {
        let executor = Arc::clone(&self.executor);
        DetailQuery::new(
            hash,
            TRANSACTION_DETAIL_FALLBACK,
            Arc::new(move |hash: String| {
                let executor = Arc::clone(&executor);
                async move {
                    let request =
                        GraphqlRequest::new(queries::GET_TRANSACTION_DETAIL, json!({ "hash": hash }));
                    fetch_field(executor.as_ref(), request, "transactionDetail").await
                }
                .boxed()
            }),
        )
    }
}
