// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// loop, or into local ViewState mutations (chat input, selection, scroll).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{widgets, ViewState};
use crate::protocol::{TabId, UserCommand};

/// Lines moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app loop. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.input_mode {
        return handle_input_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char(c @ '1'..='4') => TabId::from_digit(c).map(|tab| switch_tab(view_state, tab)),
        KeyCode::Tab => {
            let next = view_state.active_tab().next();
            Some(switch_tab(view_state, next))
        }

        KeyCode::Char('g') if view_state.active_tab() == TabId::Grader => {
            (!view_state.session.is_grading()).then_some(UserCommand::StartGrading)
        }
        KeyCode::Char('s') if view_state.active_tab() == TabId::Market => {
            (!view_state.session.is_scanning()).then_some(UserCommand::StartScan)
        }
        KeyCode::Char('i') | KeyCode::Enter if view_state.active_tab() == TabId::Oracle => {
            view_state.input_mode = true;
            None
        }
        KeyCode::Char('f') if view_state.active_tab() == TabId::Portfolio => view_state
            .selected_card_id()
            .map(|id| UserCommand::ToggleFavorite(id.to_string())),

        KeyCode::Up | KeyCode::Char('k') => {
            move_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            move_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            move_down(view_state, PAGE_SIZE);
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Switches locally for immediate feedback and tells the app loop.
fn switch_tab(view_state: &mut ViewState, tab: TabId) -> UserCommand {
    view_state.session.active_tab = tab;
    UserCommand::SwitchTab(tab)
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Chat input line. Enter sends, Esc abandons the draft, Tab fills in the
/// next example question.
///
/// While the oracle is still answering, Enter keeps the draft so nothing
/// typed is lost.
fn handle_input_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = false;
            view_state.input_text.clear();
            None
        }
        KeyCode::Enter => {
            if view_state.session.oracle_typing {
                return None;
            }
            let text = std::mem::take(&mut view_state.input_text);
            if text.trim().is_empty() {
                return None;
            }
            Some(UserCommand::SendMessage(text.trim().to_string()))
        }
        KeyCode::Tab => {
            let examples = widgets::oracle::EXAMPLE_QUESTIONS;
            view_state.input_text = examples[view_state.example_cursor % examples.len()].to_string();
            view_state.example_cursor = (view_state.example_cursor + 1) % examples.len();
            None
        }
        KeyCode::Backspace => {
            view_state.input_text.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.input_text.push(c);
            None
        }
        _ => None,
    }
}

/// Scroll key for the active tab's main widget.
fn active_widget_key(view_state: &ViewState) -> &'static str {
    match view_state.active_tab() {
        TabId::Grader => "grader",
        TabId::Market => "market",
        TabId::Oracle => "oracle",
        TabId::Portfolio => "portfolio",
    }
}

fn move_up(view_state: &mut ViewState, lines: usize) {
    if view_state.active_tab() == TabId::Portfolio {
        view_state.selected_card = view_state.selected_card.saturating_sub(lines);
        return;
    }
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    // The oracle scrolls back from the newest message.
    *offset = if key == "oracle" {
        offset.saturating_add(lines)
    } else {
        offset.saturating_sub(lines)
    };
}

fn move_down(view_state: &mut ViewState, lines: usize) {
    if view_state.active_tab() == TabId::Portfolio {
        let last = view_state.portfolio.cards.len().saturating_sub(1);
        view_state.selected_card = (view_state.selected_card + lines).min(last);
        return;
    }
    let key = active_widget_key(view_state);
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = if key == "oracle" {
        offset.saturating_sub(lines)
    } else {
        offset.saturating_add(lines)
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Action;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn on_tab(tab: TabId) -> ViewState {
        let mut state = ViewState::default();
        state.session.active_tab = tab;
        state
    }

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert!(handle_key(key(KeyCode::Char(c)), state).is_none());
        }
    }

    // -- Tabs --

    #[test]
    fn digits_switch_tabs() {
        let mut state = ViewState::default();
        let cmd = handle_key(key(KeyCode::Char('3')), &mut state);
        assert_eq!(cmd, Some(UserCommand::SwitchTab(TabId::Oracle)));
        assert_eq!(state.active_tab(), TabId::Oracle);

        assert!(handle_key(key(KeyCode::Char('5')), &mut state).is_none());
        assert_eq!(state.active_tab(), TabId::Oracle);
    }

    #[test]
    fn tab_key_cycles() {
        let mut state = on_tab(TabId::Portfolio);
        let cmd = handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(cmd, Some(UserCommand::SwitchTab(TabId::Grader)));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut ev = key(KeyCode::Char('2'));
        ev.kind = KeyEventKind::Release;
        assert!(handle_key(ev, &mut state).is_none());
        assert_eq!(state.active_tab(), TabId::Grader);
    }

    // -- Tab actions --

    #[test]
    fn g_grades_only_on_grader_tab() {
        let mut state = on_tab(TabId::Grader);
        assert_eq!(
            handle_key(key(KeyCode::Char('g')), &mut state),
            Some(UserCommand::StartGrading)
        );
        state.session.reduce(Action::GradingStarted);
        assert!(handle_key(key(KeyCode::Char('g')), &mut state).is_none());

        let mut state = on_tab(TabId::Market);
        assert!(handle_key(key(KeyCode::Char('g')), &mut state).is_none());
    }

    #[test]
    fn s_scans_only_when_idle() {
        let mut state = on_tab(TabId::Market);
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::StartScan)
        );
        state.session.reduce(Action::ScanStarted);
        assert!(handle_key(key(KeyCode::Char('s')), &mut state).is_none());
    }

    #[test]
    fn f_toggles_selected_card() {
        let mut state = on_tab(TabId::Portfolio);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(
            handle_key(key(KeyCode::Char('f')), &mut state),
            Some(UserCommand::ToggleFavorite("2".into()))
        );
    }

    #[test]
    fn portfolio_selection_is_clamped() {
        let mut state = on_tab(TabId::Portfolio);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.selected_card, 0);
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.selected_card, state.portfolio.cards.len() - 1);
    }

    // -- Chat input --

    #[test]
    fn chat_message_round_trip() {
        let mut state = on_tab(TabId::Oracle);
        assert!(handle_key(key(KeyCode::Char('i')), &mut state).is_none());
        assert!(state.input_mode);

        type_text(&mut state, "  jordan?x");
        handle_key(key(KeyCode::Backspace), &mut state);
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(cmd, Some(UserCommand::SendMessage("jordan?".into())));
        assert!(state.input_text.is_empty());
        assert!(state.input_mode, "input stays open for follow-ups");
    }

    #[test]
    fn typing_q_in_input_mode_does_not_quit() {
        let mut state = on_tab(TabId::Oracle);
        state.input_mode = true;
        type_text(&mut state, "q");
        assert!(!state.confirm_quit);
        assert_eq!(state.input_text, "q");
    }

    #[test]
    fn blank_message_is_not_sent() {
        let mut state = on_tab(TabId::Oracle);
        state.input_mode = true;
        type_text(&mut state, "   ");
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
    }

    #[test]
    fn draft_kept_while_oracle_typing() {
        let mut state = on_tab(TabId::Oracle);
        state.input_mode = true;
        state.session.oracle_typing = true;
        type_text(&mut state, "next question");
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert_eq!(state.input_text, "next question");
    }

    #[test]
    fn tab_cycles_example_questions() {
        let mut state = on_tab(TabId::Oracle);
        state.input_mode = true;
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.input_text, widgets::oracle::EXAMPLE_QUESTIONS[0]);
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.input_text, widgets::oracle::EXAMPLE_QUESTIONS[1]);
        assert_eq!(state.active_tab(), TabId::Oracle, "Tab does not switch tabs while typing");
    }

    #[test]
    fn esc_abandons_draft() {
        let mut state = on_tab(TabId::Oracle);
        state.input_mode = true;
        type_text(&mut state, "hello");
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(!state.input_mode);
        assert!(state.input_text.is_empty());
    }

    // -- Scroll --

    #[test]
    fn oracle_scroll_counts_back_from_bottom() {
        let mut state = on_tab(TabId::Oracle);
        handle_key(key(KeyCode::Up), &mut state);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll("oracle"), 2);
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.scroll("oracle"), 1);
    }

    #[test]
    fn market_scroll_saturates_at_top() {
        let mut state = on_tab(TabId::Market);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.scroll("market"), 0);
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll("market"), PAGE_SIZE);
    }

    // -- Quit --

    #[test]
    fn q_asks_for_confirmation() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert!(state.confirm_quit);
        // Other keys are blocked while confirming.
        assert!(handle_key(key(KeyCode::Char('2')), &mut state).is_none());
        assert_eq!(state.active_tab(), TabId::Grader);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn n_cancels_quit() {
        let mut state = ViewState::default();
        state.confirm_quit = true;
        assert!(handle_key(key(KeyCode::Char('n')), &mut state).is_none());
        assert!(!state.confirm_quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = on_tab(TabId::Oracle);
        state.input_mode = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }
}
