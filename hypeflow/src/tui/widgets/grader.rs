// AI Grader tab: idle prompt, analysis-in-progress notice, and the grade
// report with per-attribute gauges.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use super::spinner;
use crate::cards::format_usd;
use crate::session::GradingStatus;
use crate::simulate::GradeResult;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " 🔬 AI Card Grader ",
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let grading = &state.session.grading;
    match (grading.status, grading.result.as_ref()) {
        (GradingStatus::Complete, Some(result)) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            render_report(frame, inner, result, state.scroll("grader"));
        }
        (GradingStatus::Analyzing, _) => {
            let text = vec![
                Line::raw(""),
                Line::styled(
                    format!("  {} Analyzing card with quantum AI...", spinner(state.tick)),
                    Style::default().fg(Color::Yellow),
                ),
                Line::raw(""),
                Line::styled(
                    "  Checking centering, corners, edges and surface",
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            frame.render_widget(Paragraph::new(text).block(block), area);
        }
        _ => {
            let text = vec![
                Line::raw(""),
                Line::raw("  Upload-free grading: press g to analyze a card."),
                Line::raw(""),
                Line::styled(
                    "  Results include a predicted grade, confidence, attribute scores,",
                    Style::default().fg(Color::DarkGray),
                ),
                Line::styled(
                    "  an estimated value and a submission recommendation.",
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            frame.render_widget(Paragraph::new(text).block(block), area);
        }
    }
}

fn render_report(frame: &mut Frame, area: Rect, result: &GradeResult, scroll: usize) {
    let [summary, gauges, notes] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(summary_lines(result)), summary);

    let gauge_rows = Layout::vertical([Constraint::Length(1); 4]).split(gauges);
    for ((name, value), row) in result.details.as_array().into_iter().zip(gauge_rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(score_color(value)))
            .ratio(value.clamp(0.0, 1.0))
            .label(format!("{:<10} {:>3.0}%", capitalize(name), value * 100.0));
        frame.render_widget(gauge, *row);
    }

    let paragraph = Paragraph::new(note_lines(result))
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, notes);
}

fn summary_lines(result: &GradeResult) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw("  Predicted grade: "),
            Span::styled(
                result.grade.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", result.category),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Confidence:      "),
            Span::styled(
                format!("{:.0}%", result.confidence * 100.0),
                Style::default().fg(score_color(result.confidence)),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Est. value:      "),
            Span::styled(format_usd(result.estimated_value), Style::default().fg(Color::Green)),
            Span::styled(
                format!("  {}", result.market_trend),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::raw(""),
    ]
}

fn note_lines(result: &GradeResult) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  💡 ", Style::default()),
            Span::styled(
                result.recommendation.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if result.defects.is_empty() {
        lines.push(Line::styled(
            "  No defects detected",
            Style::default().fg(Color::Green),
        ));
    } else {
        lines.push(Line::styled("  Defects:", Style::default().fg(Color::Yellow)));
        for d in &result.defects {
            lines.push(Line::raw(format!(
                "   • {} ({}, {})",
                d.kind.replace('_', " "),
                d.severity,
                d.location
            )));
        }
    }
    lines
}

/// Green for strong scores, yellow for middling, red below.
pub fn score_color(score: f64) -> Color {
    if score >= 0.9 {
        Color::Green
    } else if score >= 0.8 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
