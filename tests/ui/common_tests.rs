//! Screens shared across routes: endpoint setup, 404, header and theme.

use super::*;
use chainview::explorer::BlockId;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[tokio::test]
async fn test_setup_screen_without_endpoint() {
    let app = App::new(mock_config(), None);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "GraphQL Endpoint Required"));
    assert!(buffer_contains(&buffer, "Press Enter to connect"));
}

#[tokio::test]
async fn test_setup_screen_shows_validation_error() {
    let mut app = App::new(mock_config(), None);
    for c in "localhost:8000".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    assert!(app.needs_endpoint_setup());

    let buffer = render_to_buffer(&app, 120, 30);
    let error: String = app.store.error.clone().unwrap().chars().take(20).collect();
    assert!(buffer_contains(&buffer, &error));
}

#[tokio::test]
async fn test_not_found_page() {
    let app = create_test_app(Route::parse("/nope/here")).await;
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "404"));
    assert!(buffer_contains(&buffer, "Nothing lives at /nope/here"));
}

#[tokio::test]
async fn test_header_marks_section_of_detail_route() {
    let app = create_test_app(Route::BlockDetail(BlockId::Number(BLOCK_NUMBER))).await;
    let buffer = render_to_buffer(&app, 120, 45);

    let header = buffer_line(&buffer, 0);
    assert!(header.contains("chainview"));
    assert!(header.contains("Blocks (B)"));
    assert!(header.contains("/blocks/19000000"));
}

#[tokio::test]
async fn test_help_bar_follows_focus() {
    let mut app = create_test_app(Route::Blocks).await;
    let buffer = render_to_buffer(&app, 120, 40);
    assert!(buffer_line(&buffer, 39).contains("/ search"));

    press(&mut app, KeyCode::Char('/'));
    let buffer = render_to_buffer(&app, 120, 40);
    assert!(buffer_line(&buffer, 39).contains("Esc cancel"));
}

#[tokio::test]
async fn test_theme_toggle_shows_in_status_bar() {
    let mut app = create_test_app(Route::Home).await;
    let buffer = render_to_buffer(&app, 120, 40);
    assert!(buffer_line(&buffer, 38).contains("[dark]"));

    press(&mut app, KeyCode::Char('t'));
    let buffer = render_to_buffer(&app, 120, 40);
    assert!(buffer_line(&buffer, 38).contains("[light]"));
}

#[tokio::test]
async fn test_small_terminal_does_not_panic() {
    let routes = [
        Route::Home,
        Route::Blocks,
        Route::BlockDetail(BlockId::Number(BLOCK_NUMBER)),
        Route::Transactions,
        Route::TransactionDetail(TX_HASH.to_string()),
        Route::Addresses,
        Route::AddressDetail(FROM.to_string()),
        Route::NotFound("/x".to_string()),
    ];
    for route in routes {
        let mut app = create_test_app(route).await;
        app.focus_search();
        render_to_buffer(&app, 30, 10);
        render_to_buffer(&app, 1, 1);
    }
}
