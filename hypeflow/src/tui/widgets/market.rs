// Market tab: analysis summary, top movers, scan progress, and the listings
// table (scan results once a scan has finished, fixture listings before).

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table};
use ratatui::Frame;

use super::spinner;
use crate::cards::{format_usd, Listing};
use crate::market::analysis::{MarketAnalysis, Mover};
use crate::session::ScanStatus;
use crate::tui::layout::{columns, header_body};
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (summary_area, body) = header_body(area, 4);
    render_summary(frame, summary_area, &state.market.analysis);

    let (movers_area, listings_area) = columns(body, 35);
    render_movers(frame, movers_area, &state.market.analysis);

    let listings_area = if state.session.is_scanning() {
        let [gauge_area, rest] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(listings_area);
        render_scan_gauge(frame, gauge_area, state);
        rest
    } else {
        listings_area
    };

    let (title, listings) = shown_listings(state);
    render_listings(frame, listings_area, &title, listings, state.scroll("market"));
}

/// Which listings the table shows, with a title saying where they came from.
pub fn shown_listings(state: &ViewState) -> (String, &[Listing]) {
    let scan = &state.session.scan;
    match scan.status {
        ScanStatus::Complete => (
            format!(" 🎯 Scan results ({}) ", scan.results.len()),
            scan.results.as_slice(),
        ),
        _ => (
            format!(" 📋 Market listings ({}) ", state.market.listings.len()),
            state.market.listings.as_slice(),
        ),
    }
}

fn render_summary(frame: &mut Frame, area: Rect, analysis: &MarketAnalysis) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(" Listings ", label),
        Span::styled(analysis.total_listings.to_string(), value),
        Span::styled("   Underpriced ", label),
        Span::styled(
            analysis.underpriced_opportunities.to_string(),
            value.fg(Color::Green),
        ),
        Span::styled("   Avg price ", label),
        Span::styled(format_usd(analysis.average_price), value),
        Span::styled("   Total value ", label),
        Span::styled(format_usd(analysis.total_value), value),
    ]);
    let paragraph = Paragraph::new(vec![Line::raw(""), line]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 📊 Market Analyzer "),
    );
    frame.render_widget(paragraph, area);
}

fn mover_lines<'a>(heading: &'a str, movers: &'a [Mover], color: Color) -> Vec<Line<'a>> {
    let mut lines = vec![Line::styled(
        heading,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if movers.is_empty() {
        lines.push(Line::styled("  none", Style::default().fg(Color::DarkGray)));
    }
    for m in movers {
        lines.push(Line::raw(format!(" {}", m.name)));
        lines.push(Line::from(vec![
            Span::styled(format!("   {}", m.change), Style::default().fg(color)),
            Span::raw(format!("  {}", m.price)),
        ]));
    }
    lines
}

fn render_movers(frame: &mut Frame, area: Rect, analysis: &MarketAnalysis) {
    let mut lines = mover_lines("▲ Top gainers", &analysis.top_gainers, Color::Green);
    lines.push(Line::raw(""));
    lines.extend(mover_lines("▼ Top decliners", &analysis.top_decliners, Color::Red));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Movers "));
    frame.render_widget(paragraph, area);
}

fn render_scan_gauge(frame: &mut Frame, area: Rect, state: &ViewState) {
    let progress = state.session.scan.progress.min(100);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} Scanning marketplace ",
            spinner(state.tick)
        )))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(progress));
    frame.render_widget(gauge, area);
}

fn render_listings(frame: &mut Frame, area: Rect, title: &str, listings: &[Listing], skip: usize) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());

    if listings.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::raw(""),
            Line::raw("  No listings loaded. Press s to scan the market."),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["Card", "Price", "Value", "Profit", "Condition"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = listings
        .iter()
        .skip(skip.min(listings.len().saturating_sub(1)))
        .map(|l| {
            let profit_style = if l.is_underpriced {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let marker = if l.is_underpriced { "🔥 " } else { "   " };
            Row::new(vec![
                Cell::from(format!("{marker}{}", l.title)),
                Cell::from(format_usd(l.price)),
                Cell::from(format_usd(l.market_value)),
                Cell::from(format!("+{:.1}%", l.profit_potential)).style(profit_style),
                Cell::from(condition_label(l)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Listed condition, falling back to the grade for records that lack one.
fn condition_label(listing: &Listing) -> String {
    if !listing.condition.is_empty() {
        listing.condition.clone()
    } else if listing.grade.is_empty() {
        "Raw".to_string()
    } else {
        listing.grade.clone()
    }
}
