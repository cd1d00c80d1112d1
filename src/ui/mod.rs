mod address_page;
mod block_page;
mod helper;
mod home_page;
mod list_pages;
mod tx_page;

use address_page::draw_address_detail;
use block_page::draw_block_detail;
use helper::*;
use home_page::draw_home;
use list_pages::{draw_address_list, draw_block_list, draw_transaction_list};
use tx_page::draw_transaction_detail;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::format::format_number;
use crate::pages::Page;
use crate::route::Route;
use crate::theme::Palette;

const TITLE_ART: &str = r#"
 ┏━╸╻ ╻┏━┓╻┏┓╻╻ ╻╻┏━╸╻ ╻
 ┃  ┣━┫┣━┫┃┃┗┫┃┏┛┃┣╸ ┃╻┃
 ┗━╸╹ ╹╹ ╹╹╹ ╹┗┛ ╹┗━╸┗┻┛
"#;

const NAV_HELP: &str =
    "/ search • ↑↓ select • ←→ page • Enter open • b back • H B T A pages • t theme • r refresh • q quit";
const SEARCH_HELP: &str = "Enter search • ↑↓ history • Del remove • Esc cancel";
const MAX_HISTORY_ROWS: usize = 5;

pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    let area = frame.area();

    let Some(page) = &app.page else {
        draw_endpoint_setup(frame, app, area, &palette);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Search bar
        Constraint::Min(0),    // Page
        Constraint::Length(1), // Status
        Constraint::Length(1), // Help
    ])
    .split(area);

    draw_header(frame, app, chunks[0], &palette);
    draw_search_bar(frame, app, chunks[1], &palette);

    let body = chunks[2];
    match page {
        Page::Home(home) => draw_home(frame, home, body, &palette),
        Page::Blocks(list) => draw_block_list(frame, list, body, &palette),
        Page::Transactions(list) => draw_transaction_list(frame, list, body, &palette),
        Page::Addresses(list) => draw_address_list(frame, list, body, &palette),
        Page::BlockDetail(detail) => draw_block_detail(frame, detail, body, &palette),
        Page::TransactionDetail(detail) => draw_transaction_detail(frame, detail, body, &palette),
        Page::AddressDetail(detail) => draw_address_detail(frame, detail, body, &palette),
        Page::NotFound(path) => draw_not_found(frame, path, body, &palette),
    }

    draw_status_bar(frame, app, chunks[3], &palette);

    let help = Paragraph::new(if app.search_focused { SEARCH_HELP } else { NAV_HELP })
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    if app.search_focused && !app.get_recent_searches().is_empty() {
        draw_history_list(frame, app, chunks[1], &palette);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let tabs = [
        ("Home", Route::Home, 'H'),
        ("Blocks", Route::Blocks, 'B'),
        ("Transactions", Route::Transactions, 'T'),
        ("Addresses", Route::Addresses, 'A'),
    ];
    let active = match &app.route {
        Route::BlockDetail(_) => Route::Blocks,
        Route::TransactionDetail(_) => Route::Transactions,
        Route::AddressDetail(_) => Route::Addresses,
        other => other.clone(),
    };

    let mut spans = vec![Span::styled(
        " chainview ",
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    )];
    for (label, route, key) in tabs {
        let style = if route == active {
            selected_style(palette)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {label} ({key}) "), style));
    }
    spans.push(Span::styled(
        format!("   {}", app.route.path()),
        Style::default().fg(palette.dim),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let focused = app.search_focused && app.selected_history_index.is_none();
    let border_color = if app.search_focused { palette.accent } else { palette.dim };

    let title = if app.searching { " Searching... " } else { " Search " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search_input.visual_scroll(inner_width);

    let display_text = if app.search_input.value().is_empty() {
        Span::styled(
            "Search by block number, block hash, transaction hash or address (/ to focus)",
            Style::default().fg(palette.dim),
        )
    } else {
        Span::styled(app.search_input.value(), Style::default().fg(palette.text))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));
    frame.render_widget(input, area);

    if focused {
        let cursor_x = area.x + 1 + (app.search_input.visual_cursor().saturating_sub(scroll)) as u16;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

/// Recent searches drop down below the search bar.
fn draw_history_list(frame: &mut Frame, app: &App, search_area: Rect, palette: &Palette) {
    let recent = app.get_recent_searches();
    let rows = recent.len().min(MAX_HISTORY_ROWS) as u16;
    let area = Rect {
        x: search_area.x,
        y: search_area.y + search_area.height,
        width: search_area.width.min(70),
        height: rows + 2,
    }
    .intersection(frame.area());

    let items: Vec<ListItem> = recent
        .iter()
        .enumerate()
        .take(MAX_HISTORY_ROWS)
        .map(|(i, query)| {
            let style = if app.selected_history_index == Some(i) {
                selected_style(palette)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(format!(" {query}")).style(style)
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(titled_block("Recent Searches", palette)), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let store = &app.store;
    let mut spans = Vec::new();

    if let Some(endpoints) = &app.endpoints {
        spans.push(Span::styled("GraphQL: ", Style::default().fg(palette.dim)));
        spans.push(Span::styled(endpoints.http.clone(), Style::default().fg(palette.success)));
        spans.push(Span::raw("  "));
    }
    let live = app.explorer.as_ref().is_some_and(|e| e.has_subscriptions());
    spans.push(Span::styled(
        if live { "● live" } else { "○ live off" },
        Style::default().fg(if live { palette.success } else { palette.dim }),
    ));

    if store.latest_block_number > 0 {
        spans.push(Span::styled("  Block: ", Style::default().fg(palette.dim)));
        spans.push(Span::styled(
            format!("#{}", format_number(store.latest_block_number)),
            Style::default().fg(palette.text),
        ));
        spans.push(Span::styled("  Txns: ", Style::default().fg(palette.dim)));
        spans.push(Span::styled(
            format_number(store.total_transactions),
            Style::default().fg(palette.text),
        ));
    }

    if store.is_loading {
        spans.push(Span::styled("  ⟳ loading", Style::default().fg(palette.warning)));
    }
    if let Some(error) = &store.error {
        spans.push(Span::styled(format!("  ✗ {error}"), Style::default().fg(palette.error)));
    }
    spans.push(Span::styled(
        format!("  [{}]", app.theme.current().as_str()),
        Style::default().fg(palette.dim),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_not_found(frame: &mut Frame, path: &str, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::styled("404", Style::default().fg(palette.error).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::styled(format!("Nothing lives at {path}"), Style::default().fg(palette.text)),
        Line::styled("Press Enter to go home", Style::default().fg(palette.dim)),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(titled_block("Page Not Found", palette));
    frame.render_widget(paragraph, padded_rect(area, 1));
}

fn draw_endpoint_setup(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(2), // Spacing
        Constraint::Length(5), // Endpoint input box
        Constraint::Length(1), // Error
        Constraint::Length(1), // Help
        Constraint::Min(0),
    ])
    .split(area);

    let title = Paragraph::new(TITLE_ART)
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let subtitle = Paragraph::new("Terminal explorer for GraphQL-indexed chains")
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let input_area = centered_rect(70, chunks[3]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.warning))
        .title(" GraphQL Endpoint Required ")
        .title_style(Style::default().fg(palette.warning));
    let inner = block.inner(input_area);
    frame.render_widget(block, input_area);

    let input_chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);
    let label = Paragraph::new("Enter the indexer URL, optionally followed by its websocket URL:")
        .style(Style::default().fg(palette.text));
    frame.render_widget(label, input_chunks[0]);

    let width = input_chunks[1].width as usize;
    let scroll = app.endpoint_input.visual_scroll(width);
    let display_text = if app.endpoint_input.value().is_empty() {
        Span::styled("http://localhost:8000/graphql ws://localhost:8000/graphql", Style::default().fg(palette.dim))
    } else {
        Span::styled(app.endpoint_input.value(), Style::default().fg(palette.text))
    };
    frame.render_widget(Paragraph::new(display_text).scroll((0, scroll as u16)), input_chunks[1]);

    let cursor_x = input_chunks[1].x + (app.endpoint_input.visual_cursor().saturating_sub(scroll)) as u16;
    if cursor_x < input_chunks[1].x + input_chunks[1].width {
        frame.set_cursor_position((cursor_x, input_chunks[1].y));
    }

    if let Some(error) = &app.store.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(palette.error))
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[4]);
    }

    let help = Paragraph::new("Press Enter to connect • Esc to quit")
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}
