use std::sync::Arc;

use futures::FutureExt;

use super::Explorer;
use crate::graphql::{fetch_field, queries, GraphqlRequest, UserGrowth};
use crate::query::{fixed_key, DetailQuery};

pub const USER_GROWTH_FALLBACK: &str = "Failed to fetch user growth data";

impl Explorer {
    /// Address-count history for the home chart.
    pub fn user_growth(&self) -> DetailQuery<(), UserGrowth> {
        let executor = Arc::clone(&self.executor);
        DetailQuery::new(
            fixed_key(()),
            USER_GROWTH_FALLBACK,
            Arc::new(move |()| {
                let executor = Arc::clone(&executor);
                async move {
                    let request = GraphqlRequest::without_variables(queries::GET_USER_GROWTH);
                    fetch_field(executor.as_ref(), request, "userGrowth").await
                }
                .boxed()
            }),
        )
    }
}
