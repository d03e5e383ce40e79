// Configuration loading and parsing (server.toml, simulation.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub http: HttpConfig,
    pub feed: FeedConfig,
    pub grading: GradingConfig,
    pub scan: ScanConfig,
    pub oracle: OracleConfig,
    pub market: MarketConfig,
    /// Seed for the shared random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// server.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct ServerFile {
    http: HttpConfig,
    market_feed: FeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            port: 3000,
            static_dir: "public".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub port: u16,
    pub broadcast_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            port: 8000,
            broadcast_interval_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// simulation.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire simulation.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SimulationFile {
    #[serde(default)]
    random: RandomSection,
    grading: GradingConfig,
    scan: ScanConfig,
    oracle: OracleConfig,
    market: MarketConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RandomSection {
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingMode {
    Random,
    Fixed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradingConfig {
    pub mode: GradingMode,
    pub delay_ms: u64,
    pub confidence_min: f64,
    pub confidence_max: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        GradingConfig {
            mode: GradingMode::Random,
            delay_ms: 3000,
            confidence_min: 0.70,
            confidence_max: 1.00,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub step: u8,
    pub interval_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            step: 10,
            interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Fixture location: a file path or an `http(s)://` URL.
    pub fixture: String,
    pub catalog_path: String,
    #[serde(default)]
    pub search_terms: Vec<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            fixture: "public/hypeflow_ebay_results.json".into(),
            catalog_path: "data/catalog.csv".into(),
            search_terms: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/server.toml` and
/// `config/simulation.toml`, both relative to the given `base_dir`.
///
/// Does not copy defaults; call `ensure_config_files` first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let server_path = config_dir.join("server.toml");
    let server_text = read_file(&server_path)?;
    let server_file: ServerFile =
        toml::from_str(&server_text).map_err(|e| ConfigError::ParseError {
            path: server_path.clone(),
            source: e,
        })?;

    let simulation_path = config_dir.join("simulation.toml");
    let simulation_text = read_file(&simulation_path)?;
    let simulation_file: SimulationFile =
        toml::from_str(&simulation_text).map_err(|e| ConfigError::ParseError {
            path: simulation_path.clone(),
            source: e,
        })?;

    let config = Config {
        http: server_file.http,
        feed: server_file.market_feed,
        grading: simulation_file.grading,
        scan: simulation_file.scan,
        oracle: simulation_file.oracle,
        market: simulation_file.market,
        seed: simulation_file.random.seed,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the hypeflow directory or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        std::fs::copy(&path, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", path.display(), target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.http.port == 0 {
        return Err(invalid("http.port", "must be greater than 0"));
    }
    if config.feed.port == 0 {
        return Err(invalid("market_feed.port", "must be greater than 0"));
    }
    if config.http.port == config.feed.port {
        return Err(invalid(
            "market_feed.port",
            format!("must differ from http.port ({})", config.http.port),
        ));
    }
    if config.feed.broadcast_interval_secs == 0 {
        return Err(invalid("market_feed.broadcast_interval_secs", "must be > 0"));
    }

    let g = &config.grading;
    for (name, val) in [
        ("grading.confidence_min", g.confidence_min),
        ("grading.confidence_max", g.confidence_max),
    ] {
        if !(0.0..=1.0).contains(&val) {
            return Err(invalid(
                name,
                format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            ));
        }
    }
    if g.confidence_min > g.confidence_max {
        return Err(invalid(
            "grading.confidence_min",
            format!(
                "must not exceed grading.confidence_max ({} > {})",
                g.confidence_min, g.confidence_max
            ),
        ));
    }

    if config.scan.step == 0 || config.scan.step > 100 {
        return Err(invalid(
            "scan.step",
            format!("must be between 1 and 100, got {}", config.scan.step),
        ));
    }

    if config.oracle.min_delay_ms > config.oracle.max_delay_ms {
        return Err(invalid(
            "oracle.min_delay_ms",
            "must not exceed oracle.max_delay_ms",
        ));
    }

    if config.market.fixture.trim().is_empty() {
        return Err(invalid("market.fixture", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
