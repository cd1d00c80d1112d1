use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::json;
use tokio::sync::watch;

use super::Explorer;
use crate::format::is_valid_transaction_hash;
use crate::graphql::{
    fetch_field, queries, Block, BlockDetail, Executor, GraphqlError, GraphqlRequest,
};
use crate::query::{DetailQuery, ListQuery, LiveQuery, NoFilter, PageRequest};

pub const BLOCKS_FALLBACK: &str = "Failed to fetch blocks";
pub const BLOCK_DETAIL_FALLBACK: &str = "Failed to fetch block details";

/// How a block page names its block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockId {
    Number(u64),
    Hash(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a block number or block hash: {0}")]
pub struct InvalidBlockId(pub String);

impl FromStr for BlockId {
    type Err = InvalidBlockId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().replace(',', "");
        if !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return cleaned
                .parse()
                .map(BlockId::Number)
                .map_err(|_| InvalidBlockId(s.to_string()));
        }
        if is_valid_transaction_hash(&cleaned) {
            return Ok(BlockId::Hash(cleaned.to_lowercase()));
        }
        Err(InvalidBlockId(s.to_string()))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{n}"),
            BlockId::Hash(h) => f.write_str(h),
        }
    }
}

impl From<u64> for BlockId {
    fn from(n: u64) -> Self {
        BlockId::Number(n)
    }
}

/// Hashes resolve to a number through `GetBlock` first.
async fn fetch_block_detail(
    executor: &dyn Executor,
    id: BlockId,
) -> Result<Option<BlockDetail>, GraphqlError> {
    let number = match id {
        BlockId::Number(n) => n,
        BlockId::Hash(hash) => {
            let request = GraphqlRequest::new(queries::GET_BLOCK, json!({ "identifier": hash }));
            match fetch_field::<Block>(executor, request, "block").await? {
                Some(block) => block.number,
                None => return Ok(None),
            }
        }
    };

    let request = GraphqlRequest::new(queries::GET_BLOCK_DETAIL, json!({ "number": number }));
    fetch_field(executor, request, "blockDetail").await
}

impl Explorer {
    pub fn blocks(&self, limit: u32, offset: u32) -> ListQuery<NoFilter, Block> {
        ListQuery::new(
            PageRequest::new(limit, offset),
            BLOCKS_FALLBACK,
            self.list_fetcher(queries::GET_BLOCKS, "blocks"),
        )
    }

    pub fn live_blocks(&self) -> LiveQuery<Block> {
        LiveQuery::new(
            self.subscriber.clone(),
            GraphqlRequest::without_variables(queries::SUBSCRIBE_BLOCKS),
            "blocks",
        )
    }

    /// Looks a block up by number or hash. Thousands separators are ignored.
    pub async fn fetch_block_by_identifier(&self, identifier: &str) -> Option<Block> {
        let identifier = identifier.replace(',', "");
        self.lookup(queries::GET_BLOCK, json!({ "identifier": identifier }), "block")
            .await
    }

    pub fn block_detail(&self, id: watch::Receiver<BlockId>) -> DetailQuery<BlockId, BlockDetail> {
        let executor = Arc::clone(&self.executor);
        DetailQuery::new(
            id,
            BLOCK_DETAIL_FALLBACK,
            Arc::new(move |id: BlockId| {
                let executor = Arc::clone(&executor);
                async move { fetch_block_detail(executor.as_ref(), id).await }.boxed()
            }),
        )
    }
}
