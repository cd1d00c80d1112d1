//! Search box classification and dispatch.

use crate::explorer::{BlockId, Explorer};
use crate::format::{is_valid_address, is_valid_block_number, is_valid_transaction_hash};
use crate::route::Route;

pub const EMPTY_QUERY: &str = "Please enter a search query";
pub const BLOCK_NOT_FOUND: &str = "Block not found";
pub const HASH_NOT_FOUND: &str = "Hash not found. Please verify the transaction or block hash.";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const INVALID_QUERY: &str =
    "Invalid search query. Please enter a block number, address, or a transaction/block hash.";

/// Represents the type of search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Blank input
    Empty,
    /// Decimal block number, thousands separators allowed
    BlockNumber(u64),
    /// 0x + 64 hex chars: a transaction or a block hash
    Hash(String),
    /// 0x + 40 hex chars
    Address(String),
    /// Anything else
    Invalid(String),
}

impl SearchQuery {
    /// Parse a search string into a typed query
    pub fn parse(input: &str) -> Self {
        let cleaned = input.trim().replace(',', "");
        if cleaned.is_empty() {
            return Self::Empty;
        }

        if is_valid_block_number(&cleaned) {
            return match cleaned.parse::<u64>() {
                Ok(n) => Self::BlockNumber(n),
                Err(_) => Self::Invalid(cleaned),
            };
        }

        // Accept an upper-case prefix, keep everything lower-case from here.
        let normalized = match cleaned.strip_prefix("0X") {
            Some(rest) => format!("0x{rest}"),
            None => cleaned.clone(),
        }
        .to_lowercase();

        if is_valid_transaction_hash(&normalized) {
            Self::Hash(normalized)
        } else if is_valid_address(&normalized) {
            Self::Address(normalized)
        } else {
            Self::Invalid(cleaned)
        }
    }
}

/// Where a search ends up: exactly one of a page or a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Navigate(Route),
    Failed(String),
}

impl SearchOutcome {
    fn failed(message: &str) -> Self {
        Self::Failed(message.to_string())
    }
}

/// Confirms the target exists before navigating.
///
/// Hashes are tried as transactions first, then as blocks.
pub async fn dispatch(explorer: &Explorer, query: &SearchQuery) -> SearchOutcome {
    match query {
        SearchQuery::Empty => SearchOutcome::failed(EMPTY_QUERY),
        SearchQuery::Invalid(_) => SearchOutcome::failed(INVALID_QUERY),
        SearchQuery::BlockNumber(n) => {
            match explorer.fetch_block_by_identifier(&n.to_string()).await {
                Some(_) => SearchOutcome::Navigate(Route::BlockDetail(BlockId::Number(*n))),
                None => SearchOutcome::failed(BLOCK_NOT_FOUND),
            }
        }
        SearchQuery::Hash(hash) => {
            if explorer.fetch_transaction_by_hash(hash).await.is_some() {
                return SearchOutcome::Navigate(Route::TransactionDetail(hash.clone()));
            }
            if explorer.fetch_block_by_identifier(hash).await.is_some() {
                return SearchOutcome::Navigate(Route::BlockDetail(BlockId::Hash(hash.clone())));
            }
            SearchOutcome::failed(HASH_NOT_FOUND)
        }
        SearchQuery::Address(address) => match explorer.fetch_address_detail(address).await {
            Some(_) => SearchOutcome::Navigate(Route::AddressDetail(address.clone())),
            None => SearchOutcome::failed(ADDRESS_NOT_FOUND),
        },
    }
}

pub async fn search(explorer: &Explorer, input: &str) -> SearchOutcome {
    dispatch(explorer, &SearchQuery::parse(input)).await
}
