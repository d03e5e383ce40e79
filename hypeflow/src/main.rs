// HypeFlow entry point.
//
// Startup sequence (terminal mode):
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the market fixture (fallback data on failure)
// 4. Seed the random source
// 5. Load the catalog and pre-compute what a scan turns up (forked rng)
// 6. Spawn the HTTP server and market feed
// 7. Spawn app logic task
// 8. Run the TUI until the user quits
// 9. Cleanup on exit

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use hypeflow::app;
use hypeflow::cards::{Listing, Portfolio};
use hypeflow::config::{self, Config};
use hypeflow::http_server::{self, ApiState};
use hypeflow::market::{self, catalog, fixture, MarketView};
use hypeflow::simulate::rng::{SharedRng, SimRng};
use hypeflow::tui;
use hypeflow::ws_server;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "hypeflow", version, about = "Sports card market simulator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server and market feed without the terminal UI.
    Serve,
    /// Scan the catalog and write a fresh market fixture.
    Scan {
        /// Destination file (defaults to the configured fixture path).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Seed for a reproducible scan.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;

    match cli.command {
        None => run_terminal(&base_dir).await,
        Some(Command::Serve) => {
            init_stderr_tracing()?;
            run_headless(&base_dir).await
        }
        Some(Command::Scan { output, seed }) => {
            init_stderr_tracing()?;
            run_scan(&base_dir, output, seed)
        }
    }
}

async fn run_terminal(base_dir: &Path) -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_file_tracing(base_dir)?;
    info!("HypeFlow starting up");

    // 2. Load config
    let config = load_config(base_dir)?;

    // 3-5. Market data and random sources. The scan draws from its own
    // fork so a fixed seed does not replay the same stream twice.
    let market = load_market(&config, base_dir).await;
    let mut root_rng = SimRng::new(config.seed);
    let scan_listings = scan_results(&config, base_dir, root_rng.fork());
    let rng = root_rng.shared();

    // 6. Servers
    let servers = spawn_servers(&config, base_dir, &market, &rng);

    // 7. App logic
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (sim_tx, sim_rx) = mpsc::channel(256);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(
        config,
        market,
        Portfolio::sample(),
        scan_listings,
        rng,
        sim_tx,
    );
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, sim_rx, ui_tx, app_state).await {
            error!("Application loop error: {e:#}");
        }
    });

    // 8. TUI (blocks until the user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {e:#}");
    }

    // 9. Cleanup: the app loop exits once the command channel closes and
    // aborts its simulator tasks on drop.
    if tokio::time::timeout(SHUTDOWN_TIMEOUT, app_handle).await.is_err() {
        error!("application loop did not stop within {SHUTDOWN_TIMEOUT:?}");
    }
    for handle in servers {
        handle.abort();
    }

    info!("HypeFlow shut down cleanly");
    Ok(())
}

async fn run_headless(base_dir: &Path) -> anyhow::Result<()> {
    let config = load_config(base_dir)?;
    let market = load_market(&config, base_dir).await;
    let rng = SimRng::new(config.seed).shared();

    let servers = spawn_servers(&config, base_dir, &market, &rng);
    info!("Serving; press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;

    for handle in servers {
        handle.abort();
    }
    info!("HypeFlow server stopped");
    Ok(())
}

fn run_scan(base_dir: &Path, output: Option<PathBuf>, seed: Option<u64>) -> anyhow::Result<()> {
    let config = load_config(base_dir)?;
    let rng = SimRng::new(seed.or(config.seed));
    let listings = scan_results(&config, base_dir, rng);

    let path = output.unwrap_or_else(|| base_dir.join(&config.market.fixture));
    let doc = fixture::FixtureDocument::from_listings(listings);
    fixture::write_fixture(&path, &doc)?;

    info!(
        "wrote {} listings ({} underpriced) to {}",
        doc.listings.len(),
        doc.analysis.underpriced_opportunities,
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared startup steps
// ---------------------------------------------------------------------------

fn load_config(base_dir: &Path) -> anyhow::Result<Config> {
    let copied = config::ensure_config_files(base_dir).context("failed to prepare config/")?;
    for path in &copied {
        info!("Copied default config to {}", path.display());
    }
    let config = config::load_config_from(base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: http port {}, feed port {}, grading {:?}",
        config.http.port, config.feed.port, config.grading.mode
    );
    Ok(config)
}

async fn load_market(config: &Config, base_dir: &Path) -> MarketView {
    let source = fixture::source_for(&config.market.fixture, base_dir);
    fixture::load_market_view(source.as_ref()).await
}

/// Runs the catalog scan once. An empty scan falls back to the built-in
/// listings so the scan view always has something to show.
fn scan_results(config: &Config, base_dir: &Path, mut rng: SimRng) -> Vec<Listing> {
    let catalog = catalog::load_or_builtin(&base_dir.join(&config.market.catalog_path));
    let found = market::scan_catalog(&catalog, &config.market.search_terms, &mut rng);
    info!("scan matched {} of {} catalog listings", found.len(), catalog.len());
    if found.is_empty() {
        catalog::builtin_listings()
    } else {
        found
    }
}

fn spawn_servers(
    config: &Config,
    base_dir: &Path,
    market: &MarketView,
    rng: &SharedRng,
) -> Vec<JoinHandle<()>> {
    let market = Arc::new(market.clone());

    let api_state = Arc::new(ApiState::new(
        Arc::clone(&market),
        Portfolio::sample(),
        config.grading.clone(),
        Arc::clone(rng),
    ));
    let http_config = config.http.clone();
    let http_base = base_dir.to_path_buf();
    let http_handle = tokio::spawn(async move {
        if let Err(e) = http_server::run(http_config, &http_base, api_state).await {
            error!("HTTP server error: {e:#}");
        }
    });

    let feed_config = config.feed.clone();
    let feed_handle = tokio::spawn(async move {
        if let Err(e) = ws_server::run(feed_config, market).await {
            error!("Market feed error: {e:#}");
        }
    });

    vec![http_handle, feed_handle]
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hypeflow=info,warn"))
}

/// Logs to `logs/hypeflow.log`; the terminal belongs to the TUI.
fn init_file_tracing(base_dir: &Path) -> anyhow::Result<()> {
    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("hypeflow.log"))?;

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

fn init_stderr_tracing() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}
