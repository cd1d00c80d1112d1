use super::helper::*;
use super::home_page::{draw_empty, transaction_row, TRANSACTION_WIDTHS};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::format::{format_created_at, format_number, format_timestamp, format_wei_to_eth};
use crate::graphql::{Address, Block, Transaction};
use crate::pages::ListPage;
use crate::query::ListFilter;
use crate::theme::Palette;

/// Table plus pagination footer for any list page.
#[allow(clippy::too_many_arguments)]
fn draw_list<F, T>(
    frame: &mut Frame,
    list: &ListPage<F, T>,
    area: Rect,
    title: &str,
    empty: &str,
    header: Row<'static>,
    widths: &[Constraint],
    row: impl Fn(&T, &Palette) -> Row<'static>,
    palette: &Palette,
) where
    F: ListFilter,
    T: Clone + Send + Sync + 'static,
{
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    let state = list.state();
    let block = titled_block(title, palette);

    if state.items.is_empty() {
        draw_empty(frame, chunks[0], block, state.loading, state.error.as_deref(), empty, palette);
    } else {
        let rows: Vec<Row> = state.items.iter().map(|item| row(item, palette)).collect();
        let table = Table::new(rows, widths.to_vec())
            .header(header.style(Style::default().fg(palette.dim)))
            .block(block)
            .row_highlight_style(selected_style(palette));
        let mut table_state = TableState::default().with_selected(Some(list.selected));
        frame.render_stateful_widget(table, chunks[0], &mut table_state);
    }

    let footer = pagination_line(list.current_page(), list.total_pages(), state.total_count, palette);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[1]);
}

fn block_row(block: &Block, palette: &Palette) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("#{}", format_number(block.number))).style(Style::default().fg(palette.link)),
        Cell::from(block.transaction_count.to_string()).style(Style::default().fg(palette.text)),
        Cell::from(format_timestamp(block.timestamp)).style(Style::default().fg(palette.text)),
        Cell::from(format_created_at(&block.created_at)).style(Style::default().fg(palette.dim)),
    ])
}

pub fn draw_block_list(frame: &mut Frame, list: &ListPage<impl ListFilter, Block>, area: Rect, palette: &Palette) {
    draw_list(
        frame,
        list,
        area,
        "Blocks",
        "No blocks found",
        Row::new(vec!["Block", "Txns", "Age", "Indexed"]),
        &[
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Length(24),
            Constraint::Min(20),
        ],
        block_row,
        palette,
    );
}

pub fn draw_transaction_list(
    frame: &mut Frame,
    list: &ListPage<impl ListFilter, Transaction>,
    area: Rect,
    palette: &Palette,
) {
    draw_list(
        frame,
        list,
        area,
        "Transactions",
        "No transactions found",
        Row::new(vec!["", "Hash", "From → To", "Value"]),
        &TRANSACTION_WIDTHS,
        transaction_row,
        palette,
    );
}

fn address_row(address: &Address, palette: &Palette) -> Row<'static> {
    let kind = if address.is_contract == Some(true) { "contract" } else { "account" };
    Row::new(vec![
        Cell::from(address.address.clone()).style(Style::default().fg(palette.link)),
        Cell::from(kind).style(Style::default().fg(palette.dim)),
        Cell::from(address.transaction_count.map(format_number).unwrap_or_else(|| "—".into()))
            .style(Style::default().fg(palette.text)),
        Cell::from(
            address
                .balance
                .as_deref()
                .map(|b| format!("{} ETH", format_wei_to_eth(b)))
                .unwrap_or_else(|| "—".into()),
        )
        .style(Style::default().fg(palette.value)),
    ])
}

pub fn draw_address_list(frame: &mut Frame, list: &ListPage<impl ListFilter, Address>, area: Rect, palette: &Palette) {
    draw_list(
        frame,
        list,
        area,
        "Addresses",
        "No addresses found",
        Row::new(vec!["Address", "Kind", "Txns", "Balance"]),
        &[
            Constraint::Length(44),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Min(12),
        ],
        address_row,
        palette,
    );
}

/// Transactions table embedded in a detail page.
pub(super) fn draw_embedded_transactions(
    frame: &mut Frame,
    list: &ListPage<impl ListFilter, Transaction>,
    area: Rect,
    title: &str,
    palette: &Palette,
) {
    draw_list(
        frame,
        list,
        area,
        title,
        "No transactions found",
        Row::new(vec!["", "Hash", "From → To", "Value"]),
        &TRANSACTION_WIDTHS,
        transaction_row,
        palette,
    );
}
