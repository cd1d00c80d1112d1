use super::helper::*;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::format::{format_created_at, format_gas, format_gwei, format_number, format_wei_to_eth, truncate_hash};
use crate::graphql::TransactionDetail;
use crate::pages::{TransactionDetailPage, TransactionLink};
use crate::theme::Palette;

/// Input data longer than this is cut for display.
const MAX_INPUT_CHARS: usize = 200;

pub fn draw_transaction_detail(frame: &mut Frame, page: &TransactionDetailPage, area: Rect, palette: &Palette) {
    let state = page.state();
    let hash = page.detail.key();

    let Some(info) = state.data else {
        if let Some(error) = &state.error {
            draw_message(frame, padded_rect(area, 1), "Transaction", error, palette);
        } else if state.is_not_found() {
            draw_message(
                frame,
                padded_rect(area, 1),
                "Transaction not found",
                &format!("No transaction matches {hash}"),
                palette,
            );
        } else {
            draw_loading(frame, area, &format!("transaction {}", truncate_hash(&hash, 10, 6)), palette);
        }
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Tx info
        Constraint::Length(1), // Nav help
    ])
    .split(area);

    let (status, status_color) = match info.succeeded() {
        Some(true) => ("✓ Success", palette.success),
        Some(false) => ("✗ Failed", palette.error),
        None => ("Pending", palette.warning),
    };

    let selected = page.selected_link();
    let mut lines = vec![
        format_kv("Hash", &info.hash, palette),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(palette.dim)),
            Span::styled(status, Style::default().fg(status_color).add_modifier(Modifier::BOLD)),
        ]),
        format_kv_link(
            "Block",
            &format!("#{}", format_number(info.block_number)),
            selected == Some(TransactionLink::Block),
            palette,
        ),
        format_kv("Position", &info.position.to_string(), palette),
        format_kv("Type", info.type_label(), palette),
    ];

    match &info.from_address {
        Some(from) => lines.push(format_kv_link("From", from, selected == Some(TransactionLink::From), palette)),
        None => lines.push(format_kv("From", "N/A", palette)),
    }
    match &info.to_address {
        Some(to) => lines.push(format_kv_link("To", to, selected == Some(TransactionLink::To), palette)),
        None => lines.push(format_kv("To", "Contract Creation", palette)),
    }
    if let Some(contract) = &info.contract_address {
        lines.push(format_kv_link(
            "Contract",
            contract,
            selected == Some(TransactionLink::Contract),
            palette,
        ));
    }

    lines.push(Line::from(""));
    lines.extend(fee_lines(&info, palette));
    lines.push(Line::from(""));

    if let Some(method) = &info.method_id {
        lines.push(format_kv("Method", method, palette));
    }
    if let Some(input) = &info.input_data {
        let shown = if input.chars().count() > MAX_INPUT_CHARS {
            format!("{}...", input.chars().take(MAX_INPUT_CHARS).collect::<String>())
        } else {
            input.clone()
        };
        lines.push(format_kv("Input", &shown, palette));
    }
    if let Some(logs) = info.logs_count {
        lines.push(format_kv("Logs", &logs.to_string(), palette));
    }
    if info.is_bridge_transaction == Some(true) {
        let direction = info.bridge_direction.as_deref().unwrap_or("unknown");
        lines.push(format_kv("Bridge", direction, palette));
    }
    lines.push(format_kv("Indexed", &format_created_at(&info.created_at), palette));

    let paragraph = Paragraph::new(lines)
        .block(titled_block(format!("Transaction ({status})"), palette))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[0]);

    let hint = Paragraph::new("↑↓ select link • Enter open • b back")
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[1]);
}

fn fee_lines(info: &TransactionDetail, palette: &Palette) -> Vec<Line<'static>> {
    let eth = |v: &str| format!("{} ETH", format_wei_to_eth(v));
    let gwei = |v: &str| format!("{} Gwei", format_gwei(v));

    let value = info.value.as_deref().map(eth).unwrap_or_else(|| "0.0000 ETH".into());
    let mut lines = vec![format_kv("Value", &value, palette)];
    if let Some(fee) = info.transaction_fee.as_deref() {
        lines.push(format_kv("Fee", &eth(fee), palette));
    }
    if let Some(used) = info.gas_used {
        lines.push(format_kv("Gas Used", &format_gas(used), palette));
    }
    if let Some(price) = info.effective_gas_price.as_deref().or(info.gas_price.as_deref()) {
        lines.push(format_kv("Gas Price", &gwei(price), palette));
    }
    if let Some(max_fee) = info.max_fee_per_gas.as_deref() {
        lines.push(format_kv("Max Fee", &gwei(max_fee), palette));
    }
    if let Some(priority) = info.max_priority_fee_per_gas.as_deref() {
        lines.push(format_kv("Max Priority Fee", &gwei(priority), palette));
    }
    if let Some(nonce) = info.nonce {
        lines.push(format_kv("Nonce", &nonce.to_string(), palette));
    }
    lines
}
