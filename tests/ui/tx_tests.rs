//! Transaction page UI tests

use super::*;
use chainview::explorer::BlockId;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn tx_route() -> Route {
    Route::TransactionDetail(TX_HASH.to_string())
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[tokio::test]
async fn test_tx_screen_shows_hash_and_status() {
    let app = create_test_app(tx_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, TX_HASH));
    assert!(buffer_contains(&buffer, "Transaction (✓ Success)"));
    assert!(buffer_contains(&buffer, "Type: EIP-1559 (Type 2)"));
}

#[tokio::test]
async fn test_tx_screen_shows_links() {
    let app = create_test_app(tx_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Block: #19,000,000"));
    assert!(buffer_contains(&buffer, &format!("From: {FROM}")));
    assert!(buffer_contains(&buffer, &format!("To: {TO}")));
}

#[tokio::test]
async fn test_tx_screen_shows_value_and_fees() {
    let app = create_test_app(tx_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Value: 1.5000 ETH"));
    assert!(buffer_contains(&buffer, "Fee: 0.0033 ETH"));
    assert!(buffer_contains(&buffer, "Gas Used: 65,000"));
    assert!(buffer_contains(&buffer, "Gas Price: 50.00 Gwei"));
    assert!(buffer_contains(&buffer, "Nonce: 42"));
    assert!(buffer_contains(&buffer, "Logs: 3"));
}

#[tokio::test]
async fn test_tx_contract_creation() {
    let mut detail = mock_transaction_detail();
    detail["toAddress"] = serde_json::Value::Null;
    detail["status"] = serde_json::json!(0);
    let executor = mock_executor().with("GetTransactionDetail", serde_json::json!({ "transactionDetail": detail }));
    let app = create_test_app_with(executor, tx_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "To: Contract Creation"));
    assert!(buffer_contains(&buffer, "Transaction (✗ Failed)"));
}

#[tokio::test]
async fn test_tx_links_navigate() {
    let mut app = create_test_app(tx_route()).await;

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route, Route::AddressDetail(FROM.to_string()));

    press(&mut app, KeyCode::Char('b'));
    settle(&mut app).await;
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route, Route::BlockDetail(BlockId::Number(BLOCK_NUMBER)));
}

#[tokio::test]
async fn test_tx_screen_not_found() {
    let executor = mock_executor().with("GetTransactionDetail", serde_json::json!({ "transactionDetail": null }));
    let app = create_test_app_with(executor, tx_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Transaction not found"));
    assert!(buffer_contains(&buffer, &format!("No transaction matches {TX_HASH}")));
}

#[tokio::test]
async fn test_transactions_list_shows_status() {
    let app = create_test_app(Route::Transactions).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "✓"));
    assert!(buffer_contains(&buffer, "✗"));
    assert!(buffer_contains(&buffer, "0x1111...1111 → 0x2222...2222"));
    assert!(buffer_contains(&buffer, "(2 total)"));
}
