//! Route table.

use std::fmt;

use crate::explorer::BlockId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Blocks,
    BlockDetail(BlockId),
    Transactions,
    TransactionDetail(String),
    Addresses,
    AddressDetail(String),
    NotFound(String),
}

impl Route {
    /// Unknown paths map to [`Route::NotFound`] carrying the original path.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["blocks"] => Route::Blocks,
            ["blocks", id] => match id.parse() {
                Ok(id) => Route::BlockDetail(id),
                Err(_) => Route::NotFound(trimmed.to_string()),
            },
            ["transactions"] => Route::Transactions,
            ["transactions", hash] => Route::TransactionDetail(hash.to_string()),
            ["addresses"] => Route::Addresses,
            ["addresses", address] => Route::AddressDetail(address.to_string()),
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blocks => "/blocks".to_string(),
            Route::BlockDetail(id) => format!("/blocks/{id}"),
            Route::Transactions => "/transactions".to_string(),
            Route::TransactionDetail(hash) => format!("/transactions/{hash}"),
            Route::Addresses => "/addresses".to_string(),
            Route::AddressDetail(address) => format!("/addresses/{address}"),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Blocks => "blocks",
            Route::BlockDetail(_) => "block-detail",
            Route::Transactions => "transactions",
            Route::TransactionDetail(_) => "transaction-detail",
            Route::Addresses => "addresses",
            Route::AddressDetail(_) => "address-detail",
            Route::NotFound(_) => "not-found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
