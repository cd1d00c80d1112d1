use super::helper::*;
use super::list_pages::draw_embedded_transactions;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::format::{
    format_created_at, format_full_date, format_gas, format_gwei, format_number, format_timestamp,
};
use crate::graphql::BlockDetail;
use crate::pages::BlockDetailPage;
use crate::theme::Palette;

const GAS_BAR_WIDTH: usize = 20;

pub fn draw_block_detail(frame: &mut Frame, page: &BlockDetailPage, area: Rect, palette: &Palette) {
    let state = page.state();
    let id = page.id();

    let Some(info) = state.data else {
        if let Some(error) = &state.error {
            draw_message(frame, padded_rect(area, 1), &format!("Block {id}"), error, palette);
        } else if state.is_not_found() {
            draw_message(frame, padded_rect(area, 1), "Block not found", &format!("No block matches {id}"), palette);
        } else {
            draw_loading(frame, area, &format!("block {id}"), palette);
        }
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(13), // Block info
        Constraint::Min(5),     // Transactions
        Constraint::Length(1),  // Nav help
    ])
    .split(area);

    let title = format!("Block #{}", format_number(info.number));
    let paragraph = Paragraph::new(block_lines(&info, palette)).block(titled_block(title, palette));
    frame.render_widget(paragraph, chunks[0]);

    match &page.transactions {
        Some(list) => draw_embedded_transactions(
            frame,
            list,
            chunks[1],
            &format!("Transactions ({})", info.transaction_count),
            palette,
        ),
        None => draw_loading(frame, chunks[1], "transactions", palette),
    }

    let hint = Paragraph::new("← prev block • → next block • ↑↓ select • Enter open")
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}

fn block_lines(info: &BlockDetail, palette: &Palette) -> Vec<Line<'static>> {
    let or_na = |v: Option<String>| v.unwrap_or_else(|| "N/A".to_string());

    let gas = match (info.gas_used, info.gas_limit) {
        (Some(used), Some(limit)) => Line::from(vec![
            Span::styled("Gas Used: ", Style::default().fg(palette.dim)),
            Span::styled(
                format!("{} / {} ", format_gas(used), format_gas(limit)),
                Style::default().fg(palette.text),
            ),
            usage_bar(used, limit, GAS_BAR_WIDTH, palette),
        ]),
        (used, limit) => format_kv(
            "Gas Used",
            &format!(
                "{} / {}",
                or_na(used.map(format_gas)),
                or_na(limit.map(format_gas))
            ),
            palette,
        ),
    };

    vec![
        format_kv(
            "Timestamp",
            &format!("{} ({})", format_full_date(info.timestamp), format_timestamp(info.timestamp)),
            palette,
        ),
        format_kv("Transactions", &info.transaction_count.to_string(), palette),
        format_kv("Parent Hash", &or_na(info.parent_hash.clone()), palette),
        format_kv("Miner", &or_na(info.miner.clone()), palette),
        gas,
        format_kv(
            "Base Fee",
            &or_na(info.base_fee_per_gas.as_deref().map(|fee| format!("{} Gwei", format_gwei(fee)))),
            palette,
        ),
        format_kv("Size", &or_na(info.size.map(|s| format!("{} bytes", format_number(s)))), palette),
        format_kv("Difficulty", &or_na(info.difficulty.clone()), palette),
        format_kv("Total Difficulty", &or_na(info.total_difficulty.clone()), palette),
        format_kv("Nonce", &or_na(info.nonce.clone()), palette),
        format_kv("Indexed", &format_created_at(&info.created_at), palette),
    ]
}
