// Fixture file handling: the static JSON that stands in for a live market
// feed. Loading never fails from the caller's point of view; anything that
// goes wrong yields the fallback view and a warning in the log.

use crate::cards::Listing;
use crate::market::analysis::{self, MarketAnalysis, Mover};
use crate::market::MarketView;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const PLATFORM: &str = "HypeFlow AI Pro";
pub const FIXTURE_VERSION: &str = "2.0.0";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch fixture {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where fixture JSON comes from.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn fetch(&self) -> Result<String, FixtureError>;

    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl FixtureSource for FileSource {
    async fn fetch(&self) -> Result<String, FixtureError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FixtureError::Io {
                path: self.path.clone(),
                source: e,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        HttpSource {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl FixtureSource for HttpSource {
    async fn fetch(&self) -> Result<String, FixtureError> {
        let http_err = |source| FixtureError::Http {
            url: self.url.clone(),
            source,
        };
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;
        response.text().await.map_err(http_err)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source
/// (relative to `base_dir`) for everything else.
pub fn source_for(location: &str, base_dir: &Path) -> Box<dyn FixtureSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(base_dir.join(location)))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Lenient view of the fixture: every analysis field is optional and both
/// snake_case and camelCase keys are accepted.
#[derive(Debug, Default, Deserialize)]
struct RawFixture {
    #[serde(default)]
    listings: Vec<Listing>,
    #[serde(default)]
    analysis: Option<RawAnalysis>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    #[serde(alias = "totalListings")]
    total_listings: Option<u32>,
    #[serde(alias = "underpricedOpportunities")]
    underpriced_opportunities: Option<u32>,
    #[serde(alias = "averagePrice")]
    average_price: Option<f64>,
    #[serde(alias = "totalValue")]
    total_value: Option<f64>,
    #[serde(alias = "topGainers")]
    top_gainers: Option<Vec<Mover>>,
    #[serde(alias = "topDecliners")]
    top_decliners: Option<Vec<Mover>>,
    #[serde(alias = "activeUsers")]
    active_users: Option<u64>,
    #[serde(alias = "marketCap")]
    market_cap: Option<f64>,
    #[serde(alias = "volume24h")]
    volume_24h: Option<f64>,
}

/// Parses fixture JSON. Fields absent from the analysis block take their
/// fallback values one by one.
pub fn parse_fixture(text: &str) -> Result<MarketView, FixtureError> {
    let raw: RawFixture = serde_json::from_str(text)?;
    let a = raw.analysis.unwrap_or_default();
    let fb = MarketView::fallback();

    let analysis = MarketAnalysis {
        total_listings: a.total_listings.unwrap_or(fb.analysis.total_listings),
        underpriced_opportunities: a
            .underpriced_opportunities
            .unwrap_or(fb.analysis.underpriced_opportunities),
        average_price: a.average_price.unwrap_or(fb.analysis.average_price),
        total_value: a.total_value.unwrap_or(fb.analysis.total_value),
        top_gainers: a.top_gainers.unwrap_or(fb.analysis.top_gainers),
        top_decliners: a.top_decliners.unwrap_or(fb.analysis.top_decliners),
    };

    Ok(MarketView {
        analysis,
        active_users: a.active_users.unwrap_or(fb.active_users),
        market_cap: a.market_cap.unwrap_or(fb.market_cap),
        volume_24h: a.volume_24h.unwrap_or(fb.volume_24h),
        listings: raw.listings,
        from_fixture: true,
    })
}

/// Fetches and parses the fixture, substituting the fallback view on any
/// failure.
pub async fn load_market_view(source: &dyn FixtureSource) -> MarketView {
    let parsed = match source.fetch().await {
        Ok(text) => parse_fixture(&text),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(view) => {
            info!(
                "loaded fixture from {}: {} listings",
                source.describe(),
                view.listings.len()
            );
            view
        }
        Err(e) => {
            warn!("{e}; falling back to built-in market data");
            MarketView::fallback()
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// On-disk fixture document as produced by a scan.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureDocument {
    pub listings: Vec<Listing>,
    pub analysis: MarketAnalysis,
    pub scraped_at: String,
    pub platform: &'static str,
    pub version: &'static str,
}

impl FixtureDocument {
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        FixtureDocument {
            analysis: analysis::analyze(&listings),
            listings,
            scraped_at: Utc::now().to_rfc3339(),
            platform: PLATFORM,
            version: FIXTURE_VERSION,
        }
    }
}

pub fn write_fixture(path: &Path, doc: &FixtureDocument) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(doc).context("failed to serialize fixture")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
