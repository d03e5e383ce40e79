// Portfolio tab: collection summary and the card table. Favorites are
// session-local and marked with a star.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::cards::{format_usd, Card, Portfolio};
use crate::tui::layout::header_body;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (summary_area, table_area) = header_body(area, 4);
    render_summary(frame, summary_area, &state.portfolio, state.session.favorites.len());
    render_cards(frame, table_area, state);
}

fn render_summary(frame: &mut Frame, area: Rect, portfolio: &Portfolio, starred: usize) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(" Total value ", label),
        Span::styled(format_usd(portfolio.total_value), value.fg(Color::Green)),
        Span::styled("   Cards ", label),
        Span::styled(portfolio.total_cards.to_string(), value),
        Span::styled("   Avg grade ", label),
        Span::styled(format!("{:.1}", portfolio.average_grade), value),
        Span::styled("   Favorites ", label),
        Span::styled(portfolio.favorites.to_string(), value),
        Span::styled(format!("   ★ {starred} starred"), Style::default().fg(Color::Yellow)),
    ]);
    let paragraph = Paragraph::new(vec![Line::raw(""), line]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 💼 My Collection "),
    );
    frame.render_widget(paragraph, area);
}

fn card_row<'a>(card: &'a Card, favorite: bool) -> Row<'a> {
    let star = if favorite { "★" } else { " " };
    let potential_style = if card.is_underpriced {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Row::new(vec![
        Cell::from(star).style(Style::default().fg(Color::Yellow)),
        Cell::from(card.name.as_str()),
        Cell::from(card.sport.label()),
        Cell::from(format!("{:.1}", card.grade)),
        Cell::from(format_usd(card.price)),
        Cell::from(format!("+{:.0}%", card.profit_potential)).style(potential_style),
        Cell::from(card.rarity.as_str()),
    ])
}

fn render_cards(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title(" Cards ");
    let cards = &state.portfolio.cards;
    if cards.is_empty() {
        frame.render_widget(
            Paragraph::new("  No cards in this portfolio.").block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec!["", "Card", "Sport", "Grade", "Value", "Upside", "Rarity"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = cards
        .iter()
        .map(|c| card_row(c, state.session.is_favorite(&c.id)));
    let widths = [
        Constraint::Length(1),
        Constraint::Min(30),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(Some(state.selected_card));
    frame.render_stateful_widget(table, area, &mut table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Action;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 16)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn summary_shows_collection_totals() {
        let text = draw(&ViewState::default());
        assert!(text.contains("$125,000"));
        assert!(text.contains("Cards 45"));
        assert!(text.contains("Avg grade 8.7"));
        assert!(text.contains("0 starred"));
    }

    #[test]
    fn every_card_is_listed() {
        let text = draw(&ViewState::default());
        assert!(text.contains("Michael Jordan 1986 Fleer Rookie"));
        assert!(text.contains("Patrick Mahomes 2017 Prizm Rookie"));
        assert!(text.contains("LeBron James 2003 Topps Chrome"));
        assert!(text.contains("$15,000"));
    }

    #[test]
    fn favorites_get_a_star() {
        let mut state = ViewState::default();
        state.session.reduce(Action::ToggleFavorite("2".into()));
        let text = draw(&state);
        assert!(text.contains("1 starred"));
        let card = &state.portfolio.cards[1];
        assert_ne!(card_row(card, true), card_row(card, false));
    }

    #[test]
    fn empty_portfolio_has_placeholder() {
        let mut state = ViewState::default();
        state.portfolio.cards.clear();
        assert!(draw(&state).contains("No cards in this portfolio"));
    }
}
