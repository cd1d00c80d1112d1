use super::helper::*;
use super::list_pages::draw_embedded_transactions;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::format::{format_created_at, format_number, format_wei_to_eth};
use crate::pages::AddressDetailPage;
use crate::theme::Palette;

pub fn draw_address_detail(frame: &mut Frame, page: &AddressDetailPage, area: Rect, palette: &Palette) {
    let state = page.state();
    let address = page.address();

    let chunks = Layout::vertical([
        Constraint::Length(11), // Summary
        Constraint::Min(5),     // Transactions
    ])
    .split(area);

    match state.data {
        Some(info) => {
            let eth = |v: Option<&str>| format!("{} ETH", v.map(format_wei_to_eth).unwrap_or_else(|| "0.0000".into()));
            let kind = if info.is_contract == Some(true) { "Contract" } else { "Address" };
            let lines = vec![
                format_kv("Address", &info.address, palette),
                format_kv("Balance", &eth(info.balance.as_deref()), palette),
                format_kv("Total Sent", &eth(info.total_sent.as_deref()), palette),
                format_kv("Total Received", &eth(info.total_received.as_deref()), palette),
                format_kv(
                    "Transactions",
                    &format!(
                        "{} ({} out, {} in)",
                        format_number(info.transaction_count()),
                        format_number(info.transaction_count_out.unwrap_or(0)),
                        format_number(info.transaction_count_in.unwrap_or(0)),
                    ),
                    palette,
                ),
                format_kv("First Seen", &format!("Block #{}", format_number(info.first_seen_block)), palette),
                format_kv("Last Seen", &format!("Block #{}", format_number(info.last_seen_block)), palette),
                format_kv("Updated", &format_created_at(&info.updated_at), palette),
            ];
            let paragraph = Paragraph::new(lines).block(titled_block(kind, palette));
            frame.render_widget(paragraph, chunks[0]);
        }
        None => {
            if let Some(error) = &state.error {
                draw_message(frame, chunks[0], "Address", error, palette);
            } else if state.is_not_found() {
                draw_message(
                    frame,
                    chunks[0],
                    "Address not found",
                    &format!("The indexer has no record of {address}"),
                    palette,
                );
            } else {
                draw_loading(frame, chunks[0], "address", palette);
            }
        }
    }

    draw_embedded_transactions(frame, &page.transactions, chunks[1], "Transactions", palette);
}
