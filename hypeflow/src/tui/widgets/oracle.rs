// Oracle tab: chat transcript, typing indicator, and the input line.
//
// The transcript is bottom-anchored: scroll offset 0 shows the newest
// message and scrolling up moves back through history.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::spinner;
use crate::cards::{ChatMessage, Sender};
use crate::tui::ViewState;

/// Offered on the welcome screen and cycled into the draft with Tab.
pub const EXAMPLE_QUESTIONS: [&str; 6] = [
    "Michael Jordan rookie card values",
    "Patrick Mahomes investment potential",
    "PSA vs BGS grading differences",
    "Best time to buy cards",
    "Portfolio diversification tips",
    "Joe Burrow rookie card outlook",
];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [chat_area, input_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " 🔮 Card Oracle ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(chat_area);

    let mut lines = if state.session.chat.is_empty() {
        welcome_lines()
    } else {
        transcript_lines(&state.session.chat)
    };
    if state.session.oracle_typing {
        lines.push(Line::styled(
            format!("{} Oracle is analyzing the market...", spinner(state.tick)),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        ));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width);
    let scroll = bottom_anchored_scroll(total, inner.height as usize, state.scroll("oracle"));

    frame.render_widget(block, chat_area);
    frame.render_widget(paragraph.scroll((scroll, 0)), inner);

    render_input(frame, input_area, state);
}

/// Top row to show so that `back` lines of history sit below the viewport.
pub fn bottom_anchored_scroll(total_lines: usize, viewport: usize, back: usize) -> u16 {
    let max_top = total_lines.saturating_sub(viewport);
    let top = max_top.saturating_sub(back);
    top.min(u16::MAX as usize) as u16
}

fn welcome_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            "Welcome to Card Oracle!",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::raw("I'm here to help with all your trading card questions. Try asking about:"),
        Line::raw(""),
    ];
    lines.extend(
        EXAMPLE_QUESTIONS
            .iter()
            .map(|q| Line::styled(format!("  • {q}"), Style::default().fg(Color::Gray))),
    );
    lines
}

fn transcript_lines(chat: &[ChatMessage]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for msg in chat {
        let (who, color) = match msg.sender {
            Sender::User => ("You", Color::Blue),
            Sender::Oracle => ("Oracle", Color::Magenta),
        };
        lines.push(Line::from(vec![
            Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", msg.timestamp.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.extend(msg.text.lines().map(|l| Line::raw(l.to_string())));
        lines.push(Line::raw(""));
    }
    lines
}

fn render_input(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (text, style) = if state.input_mode {
        (
            format!("{}▏", state.input_text),
            Style::default().fg(Color::White),
        )
    } else {
        (
            "Press i to ask me anything about trading cards...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };
    let border = if state.input_mode {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(Line::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Ask "),
    );
    frame.render_widget(paragraph, area);
}
