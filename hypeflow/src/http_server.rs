// HTTP server: static assets plus the mock REST endpoints.
//
// Handlers are stateless apart from the shared random source; every
// response is synthesized on the spot.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path as UrlPath, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::cards::{Listing, Portfolio};
use crate::config::{GradingConfig, HttpConfig};
use crate::market::analysis::Mover;
use crate::market::{search, MarketView};
use crate::simulate::grader::{self, GradeResult};
use crate::simulate::rng::with_rng;
use crate::simulate::SharedRng;

pub const VOLUME_TREND: &str = "+8.7% this week";
pub const DEFAULT_LISTINGS_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// State and errors
// ---------------------------------------------------------------------------

/// Shared by every handler. Market data and portfolio are read-only.
pub struct ApiState {
    pub market: Arc<MarketView>,
    pub portfolio: Portfolio,
    pub grading: GradingConfig,
    pub rng: SharedRng,
    pub started: Instant,
}

impl ApiState {
    pub fn new(
        market: Arc<MarketView>,
        portfolio: Portfolio,
        grading: GradingConfig,
        rng: SharedRng,
    ) -> Self {
        ApiState {
            market,
            portfolio,
            grading,
            rng,
            started: Instant::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {detail}");
    ApiError::Internal.into_response()
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Full application router: API routes, static fallback, middleware.
pub fn router(state: Arc<ApiState>, static_dir: &Path) -> Router {
    let index = static_dir.join("index.html");
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/ebay/search", get(ebay_search))
        .route("/api/ai/grade", post(ai_grade))
        .route("/api/market-data", get(market_data))
        .route("/api/listings", get(listings))
        .route("/api/portfolio/:user_id", get(portfolio))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir).not_found_service(ServeFile::new(index)));
    with_middleware(api)
}

/// Applies CORS, request tracing, and panic-to-500 conversion.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves until the task is aborted or the listener fails.
pub async fn run(config: HttpConfig, base_dir: &Path, state: Arc<ApiState>) -> anyhow::Result<()> {
    let static_dir = base_dir.join(&config.static_dir);
    let app = router(state, &static_dir);

    let listener = TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    info!("HTTP server listening on http://{}", listener.local_addr()?);
    info!("Serving static files from {}", static_dir.display());
    axum::serve(listener, app).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health(State(state): State<Arc<ApiState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime": state.started.elapsed().as_secs_f64(),
    }))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
    /// Kept as text: anything unparseable falls back to the default.
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    query: String,
    results: Vec<search::SearchResult>,
    total: usize,
    timestamp: String,
}

/// Reads a limit the way a lenient form parser would: surrounding space is
/// ignored, negatives clamp to zero, garbage means the default.
fn parse_limit(raw: Option<&str>) -> usize {
    match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(n)) => usize::try_from(n.max(0)).unwrap_or(0),
        _ => search::DEFAULT_LIMIT,
    }
}

async fn ebay_search(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query parameter is required".into()))?;
    let limit = parse_limit(params.limit.as_deref());

    let results = with_rng(&state.rng, |rng| search::search(limit, rng));
    debug!(query = %query, limit, returned = results.len(), "search");
    Ok(Json(SearchResponse {
        success: true,
        query,
        total: results.len(),
        results,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Serialize)]
struct GradeResponse {
    success: bool,
    #[serde(flatten)]
    result: GradeResult,
    timestamp: String,
}

/// Grades whatever was posted. The body is never required to parse.
async fn ai_grade(State(state): State<Arc<ApiState>>, body: Bytes) -> Json<GradeResponse> {
    let has_card = serde_json::from_slice::<serde_json::Value>(&body)
        .map(|v| v.get("cardData").is_some())
        .unwrap_or(false);
    debug!(bytes = body.len(), has_card, "grade request");

    let result = with_rng(&state.rng, |rng| grader::grade_card(&state.grading, rng));
    Json(GradeResponse {
        success: true,
        result,
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
struct MarketDataResponse {
    total_listings: u32,
    average_price: f64,
    total_value: f64,
    price_trend: String,
    volume_trend: String,
    top_gainers: Vec<Mover>,
    top_decliners: Vec<Mover>,
    market_opportunities: u32,
    active_users: u64,
    market_cap: f64,
    volume_24h: f64,
    analysis_timestamp: String,
}

async fn market_data(State(state): State<Arc<ApiState>>) -> Json<MarketDataResponse> {
    let view = &state.market;
    let analysis = &view.analysis;
    let has_data = analysis.total_listings > 0;
    Json(MarketDataResponse {
        total_listings: analysis.total_listings,
        average_price: analysis.average_price,
        total_value: analysis.total_value,
        price_trend: if has_data { crate::ws_server::PRICE_TREND } else { "N/A" }.into(),
        volume_trend: if has_data { VOLUME_TREND } else { "N/A" }.into(),
        top_gainers: analysis.top_gainers.clone(),
        top_decliners: analysis.top_decliners.clone(),
        market_opportunities: analysis.underpriced_opportunities,
        active_users: view.active_users,
        market_cap: view.market_cap,
        volume_24h: view.volume_24h,
        analysis_timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ListingsParams {
    limit: usize,
    offset: usize,
    underpriced_only: bool,
    min_profit_potential: f64,
}

impl Default for ListingsParams {
    fn default() -> Self {
        ListingsParams {
            limit: DEFAULT_LISTINGS_LIMIT,
            offset: 0,
            underpriced_only: false,
            min_profit_potential: 0.0,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListingsResponse {
    listings: Vec<Listing>,
    total: usize,
    limit: usize,
    offset: usize,
}

fn filter_listings<'a>(listings: &'a [Listing], params: &ListingsParams) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|l| !params.underpriced_only || l.is_underpriced)
        .filter(|l| params.min_profit_potential <= 0.0 || l.profit_potential >= params.min_profit_potential)
        .skip(params.offset)
        .take(params.limit)
        .collect()
}

async fn listings(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<ListingsParams>, QueryRejection>,
) -> Result<Json<ListingsResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let page: Vec<Listing> = filter_listings(&state.market.listings, &params)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ListingsResponse {
        total: page.len(),
        listings: page,
        limit: params.limit,
        offset: params.offset,
    }))
}

#[derive(Debug, Serialize)]
struct PortfolioResponse<'a> {
    user_id: String,
    #[serde(flatten)]
    portfolio: &'a Portfolio,
}

async fn portfolio(
    State(state): State<Arc<ApiState>>,
    UrlPath(user_id): UrlPath<String>,
) -> Response {
    Json(PortfolioResponse {
        user_id,
        portfolio: &state.portfolio,
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
