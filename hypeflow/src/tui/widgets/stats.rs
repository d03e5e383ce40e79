// Headline market stats strip: active users, market cap, 24h volume.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::market::MarketView;

/// Whole-number count with thousands separators, e.g. `125,000`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar amount abbreviated to K/M/B, e.g. `$50.0B`.
pub fn format_compact_usd(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    let (value, suffix) = if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format!("{sign}${abs:.0}");
    };
    format!("{sign}${value:.1}{suffix}")
}

pub fn render(frame: &mut Frame, area: Rect, market: &MarketView) {
    let cells = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    let source = if market.from_fixture {
        ("live fixture", Color::Green)
    } else {
        ("fallback data", Color::Yellow)
    };

    let items = [
        ("Active Users", format_count(market.active_users), Color::Cyan),
        ("Market Cap", format_compact_usd(market.market_cap), Color::Magenta),
        ("24h Volume", format_compact_usd(market.volume_24h), Color::Green),
        ("Data", source.0.to_string(), source.1),
    ];

    for ((label, value, color), cell) in items.into_iter().zip(cells.iter()) {
        let text = Line::from(vec![Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )]);
        let paragraph = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(label),
        );
        frame.render_widget(paragraph, *cell);
    }
}
