use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::format::{format_percentage, pagination_range, PageItem};
use crate::theme::Palette;

// ============================================================================
// Styled lines
// ============================================================================

pub fn format_kv(key: &str, value: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(palette.dim)),
        Span::styled(value.to_string(), Style::default().fg(palette.text)),
    ])
}

pub fn format_kv_link(key: &str, value: &str, selected: bool, palette: &Palette) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(palette.highlight_fg)
            .bg(palette.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(palette.link)
            .add_modifier(Modifier::UNDERLINED)
    };

    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(palette.dim)),
        Span::styled(value.to_string(), style),
    ])
}

pub fn titled_block(title: impl Into<String>, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(format!(" {} ", title.into()))
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
}

pub fn selected_style(palette: &Palette) -> Style {
    Style::default().fg(palette.highlight_fg).bg(palette.highlight_bg)
}

/// `[████░░░░] 42.00%`, colored by how full it is.
/// A `[████░░] 40.00%` gauge of `used` out of `total`.
pub fn usage_bar(used: u64, total: u64, width: usize, palette: &Palette) -> Span<'static> {
    let percent = if total == 0 { 0.0 } else { used as f64 / total as f64 * 100.0 };
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64) as usize;
    let color = if clamped > 90.0 {
        palette.error
    } else if clamped > 70.0 {
        palette.warning
    } else {
        palette.success
    };
    Span::styled(
        format!(
            "[{}{}] {}",
            "█".repeat(filled),
            "░".repeat(width - filled),
            format_percentage(used as f64, total as f64)
        ),
        Style::default().fg(color),
    )
}

/// `‹ 1 … 4 [5] 6 … 20 ›  (983 total)`
pub fn pagination_line(current: u32, total_pages: u32, total_items: u64, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled("‹ ", Style::default().fg(palette.dim))];
    for item in pagination_range(current, total_pages, 1) {
        match item {
            PageItem::Page(n) if n == current => spans.push(Span::styled(
                format!("[{n}] "),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            )),
            PageItem::Page(n) => {
                spans.push(Span::styled(format!("{n} "), Style::default().fg(palette.text)))
            }
            PageItem::Ellipsis => spans.push(Span::styled("… ", Style::default().fg(palette.dim))),
        }
    }
    spans.push(Span::styled("›", Style::default().fg(palette.dim)));
    spans.push(Span::styled(
        format!("  ({} total)", crate::format::format_number(total_items)),
        Style::default().fg(palette.dim),
    ));
    Line::from(spans)
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the current wall-clock tenth of a second.
fn spinner() -> &'static str {
    let tenths = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() / 100)
        .unwrap_or_default();
    SPINNER[tenths as usize % SPINNER.len()]
}

pub fn draw_loading(frame: &mut Frame, area: Rect, what: &str, palette: &Palette) {
    let text = Paragraph::new(format!("{} Loading {what}...", spinner()))
        .style(Style::default().fg(palette.warning))
        .alignment(Alignment::Center);
    frame.render_widget(text, centered_rect_fixed(area.width.min(50), 1, area));
}

/// Bordered error box; each line of `message` stays on its own row.
pub fn draw_message(frame: &mut Frame, area: Rect, title: &str, message: &str, palette: &Palette) {
    let error = Style::default().fg(palette.error);
    let lines: Vec<Line> = message.lines().map(|l| Line::styled(l.to_string(), error)).collect();
    let boxed = Block::bordered()
        .border_style(error)
        .title(format!(" {title} "));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(boxed), area);
}

/// A horizontal slice `percent_x` wide, centered in `area`.
pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let [middle] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    middle
}

pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Shrinks `area` by `padding` on every side, down to nothing.
pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    area.inner(Margin::new(padding, padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_kv() {
        let palette = Theme::Dark.palette();
        assert_eq!(text(&format_kv("Hash", "0xabc", &palette)), "Hash: 0xabc");
    }

    #[test]
    fn test_link_selection_changes_style() {
        let palette = Theme::Dark.palette();
        let plain = format_kv_link("From", "0x1", false, &palette);
        let selected = format_kv_link("From", "0x1", true, &palette);
        assert_ne!(plain.spans[1].style, selected.spans[1].style);
        assert_eq!(selected.spans[1].style.bg, Some(palette.highlight_bg));
    }

    #[test]
    fn test_usage_bar() {
        let palette = Theme::Dark.palette();
        let bar = usage_bar(15_000_000, 30_000_000, 10, &palette);
        assert_eq!(bar.content, "[█████░░░░░] 50.00%");
        assert_eq!(bar.style.fg, Some(palette.success));
        assert_eq!(usage_bar(95, 100, 10, &palette).style.fg, Some(palette.error));
        assert_eq!(usage_bar(1, 0, 4, &palette).content, "[░░░░] 0%");
    }

    #[test]
    fn test_pagination_line() {
        let palette = Theme::Dark.palette();
        let line = text(&pagination_line(5, 20, 400, &palette));
        assert!(line.contains("[5]"));
        assert!(line.contains("1 "));
        assert!(line.contains("20 "));
        assert!(line.contains('…'));
        assert!(line.contains("(400 total)"));
    }

    #[test]
    fn test_padding_and_centering() {
        assert_eq!(padded_rect(Rect::new(0, 0, 100, 50), 5), Rect::new(5, 5, 90, 40));
        let squashed = padded_rect(Rect::new(0, 0, 10, 10), 20);
        assert_eq!((squashed.width, squashed.height), (0, 0));

        assert_eq!(centered_rect_fixed(10, 2, Rect::new(0, 0, 30, 10)), Rect::new(10, 4, 10, 2));
        assert_eq!(centered_rect(50, Rect::new(0, 0, 100, 5)).width, 50);
    }
}
