//! UI rendering tests for chainview
//!
//! These tests render whole screens into a `TestBackend` and search the
//! buffer for expected text. Pages are backed by canned GraphQL responses.
//! Run with: cargo test --test ui_tests

pub mod address_tests;
pub mod block_tests;
pub mod common_tests;
pub mod home_tests;
pub mod tx_tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chainview::app::App;
use chainview::config::Config;
use chainview::explorer::Explorer;
use chainview::graphql::{Executor, GraphqlError, GraphqlRequest};
use chainview::route::Route;
use chainview::theme::Theme;
use chainview::ui::draw;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use serde_json::{json, Value};

pub const BLOCK_NUMBER: u64 = 19_000_000;
pub const TX_HASH: &str = "0xaaaa111122223333444455556666777788889999aaaabbbbccccddddeeeeffff";
pub const FROM: &str = "0x1111111111111111111111111111111111111111";
pub const TO: &str = "0x2222222222222222222222222222222222222222";

// ==================== Canned Indexer ====================

/// Serves fixed `data` objects keyed by operation name.
#[derive(Default)]
pub struct CannedExecutor {
    responses: Mutex<HashMap<&'static str, Result<Value, GraphqlError>>>,
}

impl CannedExecutor {
    pub fn with(self, operation: &'static str, data: Value) -> Self {
        self.responses.lock().unwrap().insert(operation, Ok(data));
        self
    }

    pub fn failing(self, operation: &'static str, error: GraphqlError) -> Self {
        self.responses.lock().unwrap().insert(operation, Err(error));
        self
    }
}

#[async_trait]
impl Executor for CannedExecutor {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, GraphqlError> {
        self.responses
            .lock()
            .unwrap()
            .get(request.operation_name)
            .cloned()
            .unwrap_or_else(|| Err(GraphqlError::Server(vec![format!("unexpected {}", request.operation_name)])))
    }
}

// ==================== Test Data Builders ====================

pub fn mock_block(number: u64) -> Value {
    json!({
        "number": number,
        "timestamp": 1_700_000_000,
        "transactionCount": 150,
        "createdAt": "2023-11-14T22:13:20Z"
    })
}

pub fn mock_block_detail() -> Value {
    json!({
        "number": BLOCK_NUMBER,
        "timestamp": 1_700_000_000,
        "transactionCount": 2,
        "createdAt": "2023-11-14T22:13:20Z",
        "parentHash": "0xdef456789abc123def456789abc123def456789abc123def456789abc123def4",
        "gasUsed": 15_000_000,
        "gasLimit": 30_000_000,
        "miner": "0x95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5",
        "difficulty": "0",
        "size": 125_000,
        "baseFeePerGas": "30000000000"
    })
}

pub fn mock_transaction(hash: &str, status: u8) -> Value {
    json!({
        "hash": hash,
        "blockNumber": BLOCK_NUMBER,
        "position": 0,
        "createdAt": "2023-11-14T22:13:20Z",
        "fromAddress": FROM,
        "toAddress": TO,
        "value": "1500000000000000000",
        "status": status
    })
}

pub fn mock_transaction_detail() -> Value {
    json!({
        "hash": TX_HASH,
        "blockNumber": BLOCK_NUMBER,
        "position": 5,
        "createdAt": "2023-11-14T22:13:20Z",
        "fromAddress": FROM,
        "toAddress": TO,
        "value": "1500000000000000000",
        "gasUsed": 65_000,
        "effectiveGasPrice": "50000000000",
        "transactionFee": "3250000000000000",
        "nonce": 42,
        "inputData": "0xa9059cbb",
        "status": 1,
        "methodId": "0xa9059cbb",
        "transactionType": 2,
        "logsCount": 3
    })
}

pub fn mock_address_detail() -> Value {
    json!({
        "address": FROM,
        "firstSeenBlock": 100,
        "lastSeenBlock": BLOCK_NUMBER,
        "createdAt": "2023-01-01T00:00:00Z",
        "updatedAt": "2023-11-14T22:13:20Z",
        "transactionCountOut": 150,
        "transactionCountIn": 25,
        "totalSent": "10000000000000000000",
        "totalReceived": "15500000000000000000",
        "balance": "5500000000000000000",
        "isContract": false
    })
}

/// An indexer that knows one block, two transactions and one address.
pub fn mock_executor() -> CannedExecutor {
    CannedExecutor::default()
        .with(
            "GetStats",
            json!({ "stats": { "currentBlockHeight": BLOCK_NUMBER, "totalTransactions": 2_500_000, "totalAddresses": 48_000 } }),
        )
        .with(
            "GetBlocks",
            json!({ "blocks": { "items": [mock_block(BLOCK_NUMBER), mock_block(BLOCK_NUMBER - 1)], "totalCount": 200 } }),
        )
        .with(
            "GetTransactions",
            json!({ "transactions": {
                "items": [mock_transaction(TX_HASH, 1), mock_transaction("0xbbbb111122223333444455556666777788889999aaaabbbbccccddddeeeeffff", 0)],
                "totalCount": 2
            } }),
        )
        .with(
            "GetAddresses",
            json!({ "addresses": {
                "items": [{ "address": FROM, "transactionCount": 175, "balance": "5500000000000000000", "isContract": false }],
                "totalCount": 1
            } }),
        )
        .with(
            "GetUserGrowth",
            json!({ "userGrowth": { "dataPoints": [
                { "timestamp": "2023-11-01T00:00:00Z", "totalAddresses": 40_000, "blockNumber": 18_000_000 },
                { "timestamp": "2023-11-14T00:00:00Z", "totalAddresses": 48_000, "blockNumber": 19_000_000 }
            ] } }),
        )
        .with("GetBlock", json!({ "block": mock_block(BLOCK_NUMBER) }))
        .with("GetBlockDetail", json!({ "blockDetail": mock_block_detail() }))
        .with("GetTransactionDetail", json!({ "transactionDetail": mock_transaction_detail() }))
        .with("GetAddressDetail", json!({ "addressDetail": mock_address_detail() }))
}

pub fn mock_config() -> Config {
    let mut config = Config::default();
    config.theme = Some(Theme::Dark);
    config.recent_searches = vec![
        FROM.to_string(),
        BLOCK_NUMBER.to_string(),
    ];
    config
}

/// Opens `route` against `executor` and waits until its queries settle.
pub async fn create_test_app_with(executor: CannedExecutor, route: Route) -> App {
    let mut app = App::with_explorer(mock_config(), Explorer::new(Arc::new(executor), None));
    if route != Route::Home {
        app.navigate_to(route);
    }
    settle(&mut app).await;
    app
}

pub async fn create_test_app(route: Route) -> App {
    create_test_app_with(mock_executor(), route).await
}

/// Waits for the page twice: block details create their transaction list
/// on the first tick after the block loads.
pub async fn settle(app: &mut App) {
    for _ in 0..2 {
        if let Some(page) = &app.page {
            page.settled().await;
        }
        app.tick();
    }
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        content.push_str(&buffer_line(buffer, y));
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Print buffer for debugging
#[allow(dead_code)]
pub fn print_buffer(buffer: &Buffer) {
    for y in 0..buffer.area.height {
        println!("{}", buffer_line(buffer, y));
    }
}
