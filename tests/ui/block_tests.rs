//! Block page UI tests

use super::*;
use chainview::explorer::BlockId;
use chainview::graphql::GraphqlError;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn block_route() -> Route {
    Route::BlockDetail(BlockId::Number(BLOCK_NUMBER))
}

#[tokio::test]
async fn test_block_screen_shows_block_number() {
    let app = create_test_app(block_route()).await;
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "Block #19,000,000"));
    assert!(buffer_contains(&buffer, "/blocks/19000000"));
}

#[tokio::test]
async fn test_block_screen_shows_gas_info() {
    let app = create_test_app(block_route()).await;
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "Gas Used: 15,000,000 / 30,000,000"));
    assert!(buffer_contains(&buffer, "50.00%"));
    assert!(buffer_contains(&buffer, "Base Fee: 30.00 Gwei"));
    assert!(buffer_contains(&buffer, "Size: 125,000 bytes"));
}

#[tokio::test]
async fn test_block_screen_shows_miner_info() {
    let app = create_test_app(block_route()).await;
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "Miner: 0x95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5"));
    // Not part of the fixture.
    assert!(buffer_contains(&buffer, "Total Difficulty: N/A"));
}

#[tokio::test]
async fn test_block_screen_lists_transactions() {
    let app = create_test_app(block_route()).await;
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "Transactions (2)"));
    assert!(buffer_contains(&buffer, "0xaaaa1111...eeffff"));
    assert!(buffer_contains(&buffer, "0xbbbb1111...eeffff"));
    assert!(buffer_contains(&buffer, "(2 total)"));
    assert!(buffer_contains(&buffer, "prev block"));
}

#[tokio::test]
async fn test_block_screen_not_found() {
    let executor = mock_executor().with("GetBlockDetail", serde_json::json!({ "blockDetail": null }));
    let app = create_test_app_with(executor, block_route()).await;
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "Block not found"));
    assert!(buffer_contains(&buffer, "No block matches 19000000"));
}

#[tokio::test]
async fn test_block_screen_error() {
    let executor = mock_executor().failing("GetBlockDetail", GraphqlError::Transport("refused".into()));
    let app = create_test_app_with(executor, block_route()).await;
    let buffer = render_to_buffer(&app, 120, 45);

    assert!(buffer_contains(&buffer, "[Network] refused"));
}

#[tokio::test]
async fn test_blocks_list_paginates() {
    let mut app = create_test_app(Route::Blocks).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "#19,000,000"));
    assert!(buffer_contains(&buffer, "#18,999,999"));
    assert!(buffer_contains(&buffer, "[1]"));
    assert!(buffer_contains(&buffer, "10"));
    assert!(buffer_contains(&buffer, "(200 total)"));

    app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
    settle(&mut app).await;
    let buffer = render_to_buffer(&app, 120, 40);
    assert!(buffer_contains(&buffer, "[2]"));
}
