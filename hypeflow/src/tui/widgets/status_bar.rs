// Status bar (brand, tab bar, busy indicators) and the help bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::spinner;
use crate::protocol::TabId;
use crate::tui::ViewState;

pub const BRAND: &str = " ⚡ HypeFlow AI Pro ";

/// Layout: [brand] [tab bar] [busy indicators]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        BRAND,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab()));

    for label in busy_labels(state) {
        spans.push(Span::styled(
            format!(" {} {label}", spinner(state.tick)),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Background work worth flagging from any tab.
fn busy_labels(state: &ViewState) -> Vec<&'static str> {
    let s = &state.session;
    [
        (s.is_grading(), "grading"),
        (s.is_scanning(), "scanning"),
        (s.oracle_typing, "oracle thinking"),
    ]
    .into_iter()
    .filter_map(|(busy, label)| busy.then_some(label))
    .collect()
}

/// Tab indicator spans with the active tab highlighted.
/// E.g. "[1:AI Grader] [2:Market] [3:Oracle] [4:Portfolio]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Key hints for the current mode and tab.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        return " y:Quit | n/Esc:Cancel";
    }
    if state.input_mode {
        return " Enter:Send | Tab:Example question | Esc:Cancel | Ctrl+C:Quit";
    }
    match state.active_tab() {
        TabId::Grader => " g:Grade card | 1-4/Tab:Switch | j/k:Scroll | q:Quit",
        TabId::Market => " s:Scan market | 1-4/Tab:Switch | j/k:Scroll | q:Quit",
        TabId::Oracle => " i/Enter:Ask the Oracle | 1-4/Tab:Switch | j/k:Scroll | q:Quit",
        TabId::Portfolio => " f:Favorite | j/k:Select | 1-4/Tab:Switch | q:Quit",
    }
}

pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
