// Integration tests for HypeFlow.
//
// These drive the public API end to end: the HTTP router, the app event
// loop with its simulators, fixture loading and writing, and config
// bootstrapping from the shipped defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tokio::sync::mpsc;
use tower::ServiceExt;

use hypeflow::app::{self, AppState};
use hypeflow::cards::{Portfolio, Sender};
use hypeflow::config::{self, Config};
use hypeflow::http_server::{self, ApiState};
use hypeflow::market::fixture::{self, FileSource, FixtureDocument};
use hypeflow::market::{self, catalog, MarketView};
use hypeflow::protocol::{UiUpdate, UserCommand};
use hypeflow::session::SessionState;
use hypeflow::simulate::grader::GRADE_LABELS;
use hypeflow::simulate::SimRng;

// ===========================================================================
// Helpers
// ===========================================================================

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hypeflow-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn api_router() -> axum::Router {
    let config = Config::default();
    let state = Arc::new(ApiState::new(
        Arc::new(MarketView::fallback()),
        Portfolio::sample(),
        config.grading,
        SimRng::seeded(11).shared(),
    ));
    http_server::router(state, &manifest_dir().join("public"))
}

async fn call(req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = api_router().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Waits for the next session snapshot matching `done`.
async fn session_where(
    ui_rx: &mut mpsc::Receiver<UiUpdate>,
    done: impl Fn(&SessionState) -> bool,
) -> SessionState {
    loop {
        match ui_rx.recv().await {
            Some(UiUpdate::Session(session)) if done(session.as_ref()) => return *session,
            Some(_) => continue,
            None => panic!("app loop closed the UI channel"),
        }
    }
}

// ===========================================================================
// HTTP API
// ===========================================================================

#[tokio::test]
async fn grade_endpoint_accepts_card_data() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/ai/grade")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"cardData":{"name":"test"}}"#))
        .unwrap();
    let (status, json) = call(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let grade = json["grade"].as_str().unwrap();
    assert!(GRADE_LABELS.contains(&grade), "unexpected grade {grade}");
    let confidence = json["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    for key in ["centering", "corners", "edges", "surface"] {
        assert!(json["details"][key].is_number(), "missing details.{key}");
    }
    assert!(json["recommendation"].is_string());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn search_without_query_is_rejected() {
    let req = Request::builder()
        .uri("/api/ebay/search")
        .body(Body::empty())
        .unwrap();
    let (status, json) = call(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Query parameter is required");
}

#[tokio::test]
async fn search_caps_results_at_twenty() {
    let req = Request::builder()
        .uri("/api/ebay/search?query=rookie&limit=500")
        .body(Body::empty())
        .unwrap();
    let (status, json) = call(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "rookie");
    assert_eq!(json["results"].as_array().unwrap().len(), 20);
    assert_eq!(json["total"], 20);
}

// ===========================================================================
// App loop
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn oracle_answers_mahomes_question_through_app_loop() {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (sim_tx, sim_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::channel(64);

    let state = AppState::new(
        Config::default(),
        MarketView::fallback(),
        Portfolio::sample(),
        catalog::builtin_listings(),
        SimRng::seeded(3).shared(),
        sim_tx,
    );
    let handle = tokio::spawn(app::run(cmd_rx, sim_rx, ui_tx, state));

    cmd_tx
        .send(UserCommand::SendMessage(
            "Should I buy Patrick Mahomes cards?".into(),
        ))
        .await
        .unwrap();

    let typing = session_where(&mut ui_rx, |s| s.oracle_typing).await;
    assert_eq!(typing.chat.len(), 1);
    assert_eq!(typing.chat[0].sender, Sender::User);

    let answered = session_where(&mut ui_rx, |s| s.chat.len() == 2).await;
    assert!(!answered.oracle_typing);
    let reply = &answered.chat[1];
    assert_eq!(reply.sender, Sender::Oracle);
    assert!(reply.text.contains("MAHOMES"));
    assert!(reply.text.contains('$'));
    assert!(reply.text.contains('%'));

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn app_loop_stops_when_commands_close() {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (sim_tx, sim_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::channel(64);

    let state = AppState::new(
        Config::default(),
        MarketView::fallback(),
        Portfolio::sample(),
        catalog::builtin_listings(),
        SimRng::seeded(5).shared(),
        sim_tx,
    );
    let handle = tokio::spawn(app::run(cmd_rx, sim_rx, ui_tx, state));

    cmd_tx.send(UserCommand::StartScan).await.unwrap();
    session_where(&mut ui_rx, |s| s.is_scanning()).await;
    drop(cmd_tx);

    handle.await.unwrap().unwrap();
}

// ===========================================================================
// Fixture
// ===========================================================================

#[tokio::test]
async fn malformed_fixture_falls_back() {
    let dir = scratch_dir("malformed-fixture");
    let path = dir.join("hypeflow_ebay_results.json");
    std::fs::write(&path, "{ not json").unwrap();

    let view = fixture::load_market_view(&FileSource::new(&path)).await;
    assert!(!view.from_fixture);
    assert_eq!(view.analysis.total_listings, 8);
    assert!((view.analysis.average_price - 6124.38).abs() < 1e-9);
}

#[tokio::test]
async fn missing_fixture_falls_back() {
    let dir = scratch_dir("missing-fixture");
    let view = fixture::load_market_view(&FileSource::new(dir.join("nope.json"))).await;
    assert_eq!(view.analysis.total_listings, 8);
    assert_eq!(view.active_users, 125_000);
}

#[tokio::test]
async fn scanned_fixture_loads_back() {
    let dir = scratch_dir("scan-roundtrip");
    let path = dir.join("out/fixture.json");

    let listings = catalog::load_or_builtin(&manifest_dir().join("data/catalog.csv"));
    let terms = vec!["Mahomes rookie".to_string(), "Jordan".to_string()];
    let found = market::scan_catalog(&listings, &terms, &mut SimRng::seeded(42));
    let doc = FixtureDocument::from_listings(found);
    fixture::write_fixture(&path, &doc).unwrap();

    let view = fixture::load_market_view(&FileSource::new(&path)).await;
    assert!(view.from_fixture);
    assert_eq!(view.listings.len(), doc.listings.len());
    assert_eq!(view.analysis.total_listings, doc.analysis.total_listings);
    assert_eq!(
        view.analysis.underpriced_opportunities,
        doc.analysis.underpriced_opportunities
    );
    for (loaded, written) in view.listings.iter().zip(&doc.listings) {
        assert!(!written.condition.is_empty());
        assert_eq!(loaded.condition, written.condition);
    }
}

// ===========================================================================
// Config
// ===========================================================================

fn copy_defaults(into: &Path) {
    let defaults = into.join("defaults");
    std::fs::create_dir_all(&defaults).unwrap();
    for name in ["server.toml", "simulation.toml"] {
        std::fs::copy(manifest_dir().join("defaults").join(name), defaults.join(name)).unwrap();
    }
}

#[test]
fn shipped_defaults_bootstrap_config() {
    let dir = scratch_dir("config-bootstrap");
    copy_defaults(&dir);

    let copied = config::ensure_config_files(&dir).unwrap();
    assert_eq!(copied.len(), 2);
    let config = config::load_config_from(&dir).unwrap();
    assert_eq!(config.http.port, 3000);
    assert_eq!(config.feed.port, 8000);
    assert_eq!(config.scan.step, 10);
    assert_eq!(config.market.search_terms.len(), 8);
    assert!(config.seed.is_none());

    // Second run leaves existing files alone.
    assert!(config::ensure_config_files(&dir).unwrap().is_empty());
}
