// Application state and orchestration logic.
//
// The event loop owns the session state. User commands from the TUI and
// results from simulator tasks are folded into it through
// `SessionState::reduce`, and every change is pushed back to the TUI as a
// snapshot.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cards::{Listing, Portfolio};
use crate::config::Config;
use crate::market::MarketView;
use crate::oracle::{self, Reply};
use crate::protocol::{UiUpdate, UserCommand};
use crate::session::{Action, SessionState};
use crate::simulate::rng::with_rng;
use crate::simulate::{self, grader, scanner, GradeResult, ScanEvent, SharedRng};

// ---------------------------------------------------------------------------
// Simulator events
// ---------------------------------------------------------------------------

/// Results coming back from spawned simulator tasks.
#[derive(Debug, Clone)]
pub enum SimEvent {
    Scan(ScanEvent),
    Graded(GradeResult),
    Reply(Reply),
}

impl From<ScanEvent> for SimEvent {
    fn from(event: ScanEvent) -> Self {
        SimEvent::Scan(event)
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub session: SessionState,
    pub market: MarketView,
    pub portfolio: Portfolio,
    /// What a scan turns up.
    pub scan_listings: Vec<Listing>,
    pub rng: SharedRng,
    sim_tx: mpsc::Sender<SimEvent>,
    scan_task: Option<JoinHandle<()>>,
    grade_task: Option<JoinHandle<()>>,
    reply_task: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        config: Config,
        market: MarketView,
        portfolio: Portfolio,
        scan_listings: Vec<Listing>,
        rng: SharedRng,
        sim_tx: mpsc::Sender<SimEvent>,
    ) -> Self {
        AppState {
            config,
            session: SessionState::default(),
            market,
            portfolio,
            scan_listings,
            rng,
            sim_tx,
            scan_task: None,
            grade_task: None,
            reply_task: None,
        }
    }

    /// Listings the oracle draws opportunities from: the latest scan when
    /// there is one, otherwise the fixture.
    pub fn opportunity_pool(&self) -> &[Listing] {
        if self.session.scan.results.is_empty() {
            &self.market.listings
        } else {
            &self.session.scan.results
        }
    }

    /// Applies a user command. Returns whether the session changed.
    pub fn handle_command(&mut self, cmd: UserCommand) -> bool {
        match cmd {
            UserCommand::SwitchTab(tab) => {
                debug!("Switched to tab: {:?}", tab);
                self.session.reduce(Action::SwitchTab(tab))
            }
            UserCommand::SendMessage(text) => self.send_message(text),
            UserCommand::StartScan => self.start_scan(),
            UserCommand::StartGrading => self.start_grading(),
            UserCommand::ToggleFavorite(id) => {
                if self.portfolio.card(&id).is_none() {
                    warn!("ignoring favorite toggle for unknown card {id}");
                    return false;
                }
                self.session.reduce(Action::ToggleFavorite(id))
            }
            // Handled in the main loop
            UserCommand::Quit => false,
        }
    }

    /// Folds a simulator result into the session.
    pub fn handle_sim_event(&mut self, event: SimEvent) -> bool {
        match event {
            SimEvent::Scan(ScanEvent::Progress(p)) => self.session.reduce(Action::ScanProgress(p)),
            SimEvent::Scan(ScanEvent::Complete(listings)) => {
                self.scan_task = None;
                info!("Scan complete: {} listings", listings.len());
                self.session.reduce(Action::ScanCompleted(listings))
            }
            SimEvent::Graded(result) => {
                self.grade_task = None;
                info!("Grading complete: {} ({:.2})", result.grade, result.confidence);
                self.session.reduce(Action::GradingCompleted(result))
            }
            SimEvent::Reply(reply) => {
                self.reply_task = None;
                debug!("Oracle replied on topic {:?}", reply.topic);
                self.session.reduce(Action::OracleReply {
                    text: reply.text,
                    at: Utc::now(),
                })
            }
        }
    }

    fn send_message(&mut self, text: String) -> bool {
        let text = text.trim().to_string();
        if text.is_empty() {
            debug!("ignoring blank oracle query");
            return false;
        }
        if self.session.oracle_typing {
            warn!("oracle is still answering, dropping query");
            return false;
        }

        let pool = self.opportunity_pool().to_vec();
        let (reply, delay) = with_rng(&self.rng, |rng| {
            (
                oracle::respond(&text, &pool, rng),
                simulate::typing_delay(&self.config.oracle, rng),
            )
        });

        self.session.reduce(Action::UserMessage {
            text,
            at: Utc::now(),
        });

        let tx = self.sim_tx.clone();
        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SimEvent::Reply(reply)).await;
        }));
        true
    }

    fn start_scan(&mut self) -> bool {
        if !self.session.reduce(Action::ScanStarted) {
            warn!("scan already running");
            return false;
        }
        info!("Starting market scan");
        let config = self.config.scan.clone();
        let listings = self.scan_listings.clone();
        let tx = self.sim_tx.clone();
        self.scan_task = Some(tokio::spawn(scanner::run_scan(config, listings, tx)));
        true
    }

    fn start_grading(&mut self) -> bool {
        if !self.session.reduce(Action::GradingStarted) {
            warn!("grading already running");
            return false;
        }
        info!("Starting card grading");
        let config = self.config.grading.clone();
        let rng = self.rng.clone();
        let tx = self.sim_tx.clone();
        self.grade_task = Some(tokio::spawn(async move {
            let result = grader::run_grading(config, rng).await;
            let _ = tx.send(SimEvent::Graded(result)).await;
        }));
        true
    }

    /// Aborts every in-flight simulator task.
    pub fn cancel_tasks(&mut self) {
        for (name, task) in [
            ("scan", self.scan_task.take()),
            ("grading", self.grade_task.take()),
            ("oracle reply", self.reply_task.take()),
        ] {
            if let Some(handle) = task {
                handle.abort();
                info!("Cancelled in-flight {name} task");
            }
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.cancel_tasks();
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// How long shutdown waits for the TUI to drain its last update.
pub const UI_SEND_TIMEOUT: Duration = Duration::from_millis(250);

/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Simulator results
///
/// Pushes a session snapshot through `ui_tx` after every change.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut sim_rx: mpsc::Receiver<SimEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx.send(UiUpdate::Market(Box::new(state.market.clone()))).await;
    let _ = ui_tx
        .send(UiUpdate::Portfolio(Box::new(state.portfolio.clone())))
        .await;
    push_session(&state, &ui_tx).await;

    loop {
        let changed = tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => state.handle_command(cmd),
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            event = sim_rx.recv() => {
                match event {
                    Some(event) => state.handle_sim_event(event),
                    // AppState holds a sender, so this only happens if the
                    // state was torn down underneath us.
                    None => break,
                }
            }
        };

        if changed {
            push_session(&state, &ui_tx).await;
        }
    }

    // Cleanup
    state.cancel_tasks();
    info!("Application event loop exiting");
    Ok(())
}

async fn push_session(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let update = UiUpdate::Session(Box::new(state.session.clone()));
    if tokio::time::timeout(UI_SEND_TIMEOUT, ui_tx.send(update))
        .await
        .is_err()
    {
        warn!("TUI not draining updates; dropped a session snapshot");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
