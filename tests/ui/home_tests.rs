//! Home screen UI tests

use super::*;
use chainview::graphql::GraphqlError;
use chainview::route::Route;

#[tokio::test]
async fn test_home_shows_stat_cards() {
    let app = create_test_app(Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Latest Block"));
    assert!(buffer_contains(&buffer, "#19,000,000"));
    assert!(buffer_contains(&buffer, "2,500,000"));
    assert!(buffer_contains(&buffer, "48,000"));
}

#[tokio::test]
async fn test_home_shows_user_growth() {
    let app = create_test_app(Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "User Growth: 48,000 addresses"));
}

#[tokio::test]
async fn test_home_shows_latest_tables() {
    let app = create_test_app(Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Latest Blocks"));
    assert!(buffer_contains(&buffer, "#18,999,999"));
    assert!(buffer_contains(&buffer, "Latest Transactions"));
    assert!(buffer_contains(&buffer, "0xaaaa1111...eeffff"));
    assert!(buffer_contains(&buffer, "1.5000 ETH"));
}

#[tokio::test]
async fn test_home_status_bar_mirrors_stats() {
    let app = create_test_app(Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);

    let status = buffer_line(&buffer, 38);
    assert!(status.contains("live off"));
    assert!(status.contains("Block: #19,000,000"));
    assert!(status.contains("Txns: 2,500,000"));
}

#[tokio::test]
async fn test_home_stats_error_is_shown() {
    let executor = mock_executor().failing("GetStats", GraphqlError::Transport("refused".into()));
    let app = create_test_app_with(executor, Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "[Network] refused"));
    // The tables do not depend on stats.
    assert!(buffer_contains(&buffer, "#18,999,999"));
}

#[tokio::test]
async fn test_home_empty_tables() {
    let executor = mock_executor()
        .with("GetBlocks", serde_json::json!({ "blocks": { "items": [], "totalCount": 0 } }))
        .with("GetTransactions", serde_json::json!({ "transactions": null }));
    let app = create_test_app_with(executor, Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "No blocks found"));
    assert!(buffer_contains(&buffer, "No transactions found"));
}

#[tokio::test]
async fn test_home_recent_searches_dropdown() {
    let mut app = create_test_app(Route::Home).await;
    app.focus_search();
    let buffer = render_to_buffer(&app, 120, 40);

    assert!(buffer_contains(&buffer, "Recent Searches"));
    assert!(buffer_contains(&buffer, FROM));
    assert!(buffer_contains(&buffer, "19000000"));
    assert!(buffer_contains(&buffer, "Enter search"));
}
