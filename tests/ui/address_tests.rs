//! Address page UI tests

use super::*;

fn address_route() -> Route {
    Route::AddressDetail(FROM.to_string())
}

#[tokio::test]
async fn test_address_screen_shows_summary() {
    let app = create_test_app(address_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, &format!("Address: {FROM}")));
    assert!(buffer_contains(&buffer, "Balance: 5.5000 ETH"));
    assert!(buffer_contains(&buffer, "Total Sent: 10.0000 ETH"));
    assert!(buffer_contains(&buffer, "Total Received: 15.5000 ETH"));
}

#[tokio::test]
async fn test_address_screen_shows_activity() {
    let app = create_test_app(address_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Transactions: 175 (150 out, 25 in)"));
    assert!(buffer_contains(&buffer, "First Seen: Block #100"));
    assert!(buffer_contains(&buffer, "Last Seen: Block #19,000,000"));
}

#[tokio::test]
async fn test_address_screen_lists_transactions() {
    let app = create_test_app(address_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "0xaaaa1111...eeffff"));
    assert!(buffer_contains(&buffer, "(2 total)"));
}

#[tokio::test]
async fn test_contract_address_title() {
    let mut detail = mock_address_detail();
    detail["isContract"] = serde_json::json!(true);
    let executor = mock_executor().with("GetAddressDetail", serde_json::json!({ "addressDetail": detail }));
    let app = create_test_app_with(executor, address_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, " Contract "));
}

#[tokio::test]
async fn test_address_screen_not_found() {
    let executor = mock_executor().with("GetAddressDetail", serde_json::json!({ "addressDetail": null }));
    let app = create_test_app_with(executor, address_route()).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Address not found"));
    assert!(buffer_contains(&buffer, &format!("The indexer has no record of {FROM}")));
    // The transaction list loads independently.
    assert!(buffer_contains(&buffer, "0xaaaa1111...eeffff"));
}

#[tokio::test]
async fn test_addresses_list() {
    let app = create_test_app(Route::Addresses).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, FROM));
    assert!(buffer_contains(&buffer, "account"));
    assert!(buffer_contains(&buffer, "175"));
    assert!(buffer_contains(&buffer, "5.5000 ETH"));
    assert!(buffer_contains(&buffer, "(1 total)"));
}
