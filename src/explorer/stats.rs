use std::sync::Arc;

use futures::FutureExt;

use super::Explorer;
use crate::graphql::{fetch_field, queries, GraphqlRequest, Stats};
use crate::query::{fixed_key, DetailQuery, LiveQuery};

pub const STATS_FALLBACK: &str = "Failed to fetch stats";

impl Explorer {
    pub fn stats(&self) -> DetailQuery<(), Stats> {
        let executor = Arc::clone(&self.executor);
        DetailQuery::new(
            fixed_key(()),
            STATS_FALLBACK,
            Arc::new(move |()| {
                let executor = Arc::clone(&executor);
                async move {
                    let request = GraphqlRequest::without_variables(queries::GET_STATS);
                    fetch_field(executor.as_ref(), request, "stats").await
                }
                .boxed()
            }),
        )
    }

    pub fn live_stats(&self) -> LiveQuery<Stats> {
        LiveQuery::new(
            self.subscriber.clone(),
            GraphqlRequest::without_variables(queries::SUBSCRIBE_STATS),
            "stats",
        )
    }
}
