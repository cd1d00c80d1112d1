use super::helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Sparkline, Table, TableState},
    Frame,
};

use crate::format::{format_created_at, format_number, format_timestamp, format_wei_to_eth, shorten_address, truncate_hash};
use crate::graphql::{Block, Transaction};
use crate::pages::{HomePage, HomePanel};
use crate::theme::Palette;

pub fn draw_home(frame: &mut Frame, home: &HomePage, area: Rect, palette: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Stats cards
        Constraint::Length(6), // User growth
        Constraint::Min(5),    // Latest blocks / transactions
    ])
    .split(area);

    draw_stats(frame, home, chunks[0], palette);
    draw_user_growth(frame, home, chunks[1], palette);

    let tables = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(chunks[2]);
    draw_latest_blocks(frame, home, tables[0], palette);
    draw_latest_transactions(frame, home, tables[1], palette);
}

fn draw_stats(frame: &mut Frame, home: &HomePage, area: Rect, palette: &Palette) {
    let state = home.displayed_stats();
    let live = home.live_stats.latest().is_some();
    let cards = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    let values: [(&str, Option<String>); 3] = [
        ("Latest Block", state.data.map(|s| format!("#{}", format_number(s.current_block_height)))),
        ("Transactions", state.data.map(|s| format_number(s.total_transactions))),
        ("Addresses", state.data.map(|s| format_number(s.total_addresses))),
    ];

    for ((title, value), card) in values.into_iter().zip(cards.iter()) {
        let value = match (&value, &state.error) {
            (Some(v), _) => Span::styled(v.clone(), Style::default().fg(palette.value).add_modifier(Modifier::BOLD)),
            (None, Some(error)) => Span::styled(error.clone(), Style::default().fg(palette.error)),
            (None, None) => Span::styled("...", Style::default().fg(palette.dim)),
        };
        let mut lines = vec![Line::from(value)];
        if live {
            lines.push(Line::styled("● live", Style::default().fg(palette.success)));
        }
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block(title, palette));
        frame.render_widget(paragraph, *card);
    }
}

fn draw_user_growth(frame: &mut Frame, home: &HomePage, area: Rect, palette: &Palette) {
    let state = home.user_growth.state();
    let block = titled_block("User Growth", palette);

    let points = state.data.map(|g| g.data_points).unwrap_or_default();
    if points.is_empty() {
        let text = match (&state.error, state.loading) {
            (Some(error), _) => Span::styled(error.clone(), Style::default().fg(palette.error)),
            (None, true) => Span::styled("Loading user growth...", Style::default().fg(palette.dim)),
            (None, false) => Span::styled("No data yet", Style::default().fg(palette.dim)),
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(block), area);
        return;
    }

    let values: Vec<u64> = points.iter().map(|p| p.total_addresses).collect();
    let (first, last) = (&points[0], &points[points.len() - 1]);
    let title = format!(
        "User Growth: {} addresses (since {})",
        format_number(last.total_addresses),
        format_created_at(&first.timestamp)
    );
    let sparkline = Sparkline::default()
        .block(titled_block(title, palette))
        .data(&values)
        .style(Style::default().fg(palette.accent));
    frame.render_widget(sparkline, area);
}

fn block_row(block: &Block, palette: &Palette) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("#{}", format_number(block.number))).style(Style::default().fg(palette.link)),
        Cell::from(format!("{} txns", block.transaction_count)).style(Style::default().fg(palette.text)),
        Cell::from(format_timestamp(block.timestamp)).style(Style::default().fg(palette.dim)),
    ])
}

fn draw_latest_blocks(frame: &mut Frame, home: &HomePage, area: Rect, palette: &Palette) {
    let state = home.latest_blocks();
    let focused = home.panel == HomePanel::Blocks;
    let block = titled_block(if focused { "Latest Blocks ◂" } else { "Latest Blocks" }, palette);

    if state.items.is_empty() {
        draw_empty(frame, area, block, state.loading, state.error.as_deref(), "No blocks found", palette);
        return;
    }

    let rows: Vec<Row> = state.items.iter().map(|b| block_row(b, palette)).collect();
    let table = Table::new(rows, [Constraint::Length(14), Constraint::Length(10), Constraint::Min(10)])
        .header(Row::new(vec!["Block", "Txns", "Age"]).style(Style::default().fg(palette.dim)))
        .block(block)
        .row_highlight_style(selected_style(palette));

    let mut table_state = TableState::default().with_selected(focused.then_some(home.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

pub(super) fn transaction_row(tx: &Transaction, palette: &Palette) -> Row<'static> {
    let status = match tx.succeeded() {
        Some(true) => Span::styled("✓", Style::default().fg(palette.success)),
        Some(false) => Span::styled("✗", Style::default().fg(palette.error)),
        None => Span::styled("·", Style::default().fg(palette.dim)),
    };
    let from = tx.from_address.as_deref().map(shorten_address).unwrap_or_else(|| "—".into());
    let to = tx.to_address.as_deref().map(shorten_address).unwrap_or_else(|| "[create]".into());
    let value = tx.value.as_deref().map(format_wei_to_eth).unwrap_or_else(|| "0.0000".into());

    Row::new(vec![
        Cell::from(status),
        Cell::from(truncate_hash(&tx.hash, 10, 6)).style(Style::default().fg(palette.link)),
        Cell::from(format!("{from} → {to}")).style(Style::default().fg(palette.text)),
        Cell::from(format!("{value} ETH")).style(Style::default().fg(palette.value)),
    ])
}

pub(super) const TRANSACTION_WIDTHS: [Constraint; 4] = [
    Constraint::Length(1),
    Constraint::Length(19),
    Constraint::Length(29),
    Constraint::Min(12),
];

fn draw_latest_transactions(frame: &mut Frame, home: &HomePage, area: Rect, palette: &Palette) {
    let state = home.latest_transactions();
    let focused = home.panel == HomePanel::Transactions;
    let block = titled_block(if focused { "Latest Transactions ◂" } else { "Latest Transactions" }, palette);

    if state.items.is_empty() {
        draw_empty(frame, area, block, state.loading, state.error.as_deref(), "No transactions found", palette);
        return;
    }

    let rows: Vec<Row> = state.items.iter().map(|t| transaction_row(t, palette)).collect();
    let table = Table::new(rows, TRANSACTION_WIDTHS)
        .header(Row::new(vec!["", "Hash", "From → To", "Value"]).style(Style::default().fg(palette.dim)))
        .block(block)
        .row_highlight_style(selected_style(palette));

    let mut table_state = TableState::default().with_selected(focused.then_some(home.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Placeholder for a table with no rows: loading, the error, or `empty`.
pub(super) fn draw_empty(
    frame: &mut Frame,
    area: Rect,
    block: ratatui::widgets::Block<'static>,
    loading: bool,
    error: Option<&str>,
    empty: &str,
    palette: &Palette,
) {
    let text = match (error, loading) {
        (Some(error), _) => Span::styled(error.to_string(), Style::default().fg(palette.error)),
        (None, true) => Span::styled("Loading...", Style::default().fg(palette.warning)),
        (None, false) => Span::styled(empty.to_string(), Style::default().fg(palette.dim)),
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(block), area);
}
