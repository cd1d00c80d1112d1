use std::sync::Arc;

use futures::FutureExt;
use serde_json::json;
use tokio::sync::watch;

use super::Explorer;
use crate::graphql::{fetch_field, queries, Address, AddressDetail, GraphqlRequest};
use crate::query::{DetailQuery, ListQuery, NoFilter, PageRequest};

pub const ADDRESSES_FALLBACK: &str = "Failed to fetch addresses";
pub const ADDRESS_DETAIL_FALLBACK: &str = "Failed to fetch address details";

impl Explorer {
    pub fn addresses(&self, limit: u32, offset: u32) -> ListQuery<NoFilter, Address> {
        ListQuery::new(
            PageRequest::new(limit, offset),
            ADDRESSES_FALLBACK,
            self.list_fetcher(queries::GET_ADDRESSES, "addresses"),
        )
    }

    pub fn address_detail(
        &self,
        address: watch::Receiver<String>,
    ) -> DetailQuery<String, AddressDetail> {
        let executor = Arc::clone(&self.executor);
        DetailQuery::new(
            address,
            ADDRESS_DETAIL_FALLBACK,
            Arc::new(move |address: String| {
                let executor = Arc::clone(&executor);
                async move {
                    let request =
                        GraphqlRequest::new(queries::GET_ADDRESS_DETAIL, json!({ "address": address }));
                    fetch_field(executor.as_ref(), request, "addressDetail").await
                }
                .boxed()
            }),
        )
    }

    /// One-shot existence check used by search.
    pub async fn fetch_address_detail(&self, address: &str) -> Option<AddressDetail> {
        self.lookup(
            queries::GET_ADDRESS_DETAIL,
            json!({ "address": address }),
            "addressDetail",
        )
        .await
    }
}
