// Terminal front end: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the session, market, and portfolio
// pushed by the app loop as `UiUpdate` messages, plus purely local state
// (chat input buffer, selection, scroll). It re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cards::Portfolio;
use crate::market::MarketView;
use crate::protocol::{TabId, UiUpdate, UserCommand};
use crate::session::SessionState;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    pub session: SessionState,
    pub market: MarketView,
    pub portfolio: Portfolio,
    /// Whether keystrokes go to the chat input line.
    pub input_mode: bool,
    pub input_text: String,
    /// Next example question Tab puts in the draft.
    pub example_cursor: usize,
    /// Highlighted row in the portfolio table.
    pub selected_card: usize,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
    /// Render ticks since start, drives the busy spinners.
    pub tick: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            session: SessionState::default(),
            market: MarketView::fallback(),
            portfolio: Portfolio::sample(),
            input_mode: false,
            input_text: String::new(),
            example_cursor: 0,
            selected_card: 0,
            scroll_offset: HashMap::new(),
            confirm_quit: false,
            tick: 0,
        }
    }
}

impl ViewState {
    pub fn active_tab(&self) -> TabId {
        self.session.active_tab
    }

    /// Id of the highlighted portfolio card, if the portfolio has any.
    pub fn selected_card_id(&self) -> Option<&str> {
        self.portfolio
            .cards
            .get(self.selected_card)
            .map(|c| c.id.as_str())
    }

    pub fn scroll(&self, key: &str) -> usize {
        self.scroll_offset.get(key).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Session(session) => {
            // A new chat message snaps the oracle view back to the bottom.
            if session.chat.len() != state.session.chat.len() {
                state.scroll_offset.remove("oracle");
            }
            state.session = *session;
        }
        UiUpdate::Market(market) => {
            state.market = *market;
        }
        UiUpdate::Portfolio(portfolio) => {
            state.portfolio = *portfolio;
            let last = state.portfolio.cards.len().saturating_sub(1);
            state.selected_card = state.selected_card.min(last);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: chrome plus the active tab.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::stats::render(frame, layout.stats, &state.market);

    match state.active_tab() {
        TabId::Grader => widgets::grader::render(frame, layout.main_panel, state),
        TabId::Market => widgets::market::render(frame, layout.main_panel, state),
        TabId::Oracle => widgets::oracle::render(frame, layout.main_panel, state),
        TabId::Portfolio => widgets::portfolio::render(frame, layout.main_panel, state),
    }

    widgets::status_bar::render_help(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input, and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(update) => apply_ui_update(&mut view_state, update),
                    // App loop is gone.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            debug!("Dispatching {:?}", cmd);
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse, resize, focus: redrawn on the next tick.
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {e}");
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.tick = view_state.tick.wrapping_add(1);
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
