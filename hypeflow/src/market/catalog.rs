// Mock marketplace catalog loading.
//
// The catalog is a CSV of raw listings (title, price, player, ...). Rows
// arrive unvalued; `market::valuation` fills in market value and profit.

use crate::cards::Listing;
use crate::market::valuation;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    title: String,
    price: f64,
    #[serde(default)]
    player: String,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    set_name: String,
    #[serde(default)]
    seller: String,
    #[serde(default)]
    seller_rating: Option<f64>,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    listing_url: String,
    #[serde(default)]
    condition: String,
}

impl RawCatalogRow {
    fn into_listing(self) -> Listing {
        let mut listing = Listing {
            title: self.title.trim().to_string(),
            price: self.price,
            market_value: self.price,
            profit_potential: 0.0,
            is_underpriced: false,
            image_url: self.image_url.trim().to_string(),
            player: self.player.trim().to_string(),
            year: self.year,
            grade: self.grade.trim().to_string(),
            set_name: self.set_name.trim().to_string(),
            condition: condition_or_grade(self.condition.trim(), self.grade.trim()),
            seller: self.seller.trim().to_string(),
            seller_rating: self.seller_rating,
            listing_url: self.listing_url.trim().to_string(),
            confidence_score: 0.0,
        };
        listing.confidence_score = valuation::confidence_score(&listing);
        listing
    }
}

/// Rows without a condition take it from the grade; raw cards read as
/// "Raw/Mint".
fn condition_or_grade(condition: &str, grade: &str) -> String {
    if !condition.is_empty() {
        condition.to_string()
    } else if grade.is_empty() || grade.eq_ignore_ascii_case("raw") {
        "Raw/Mint".to_string()
    } else {
        grade.to_string()
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_catalog_from_reader<R: Read>(rdr: R) -> Result<Vec<Listing>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut listings = Vec::new();
    for result in reader.deserialize::<RawCatalogRow>() {
        match result {
            Ok(raw) => {
                if raw.title.trim().is_empty() {
                    warn!("skipping catalog row with empty title");
                    continue;
                }
                if !raw.price.is_finite() || raw.price <= 0.0 {
                    warn!("skipping '{}': invalid price {}", raw.title.trim(), raw.price);
                    continue;
                }
                listings.push(raw.into_listing());
            }
            Err(e) => {
                warn!("skipping malformed catalog row: {}", e);
            }
        }
    }
    Ok(listings)
}

/// Loads the CSV catalog at `path`. Malformed rows are skipped with a warning.
pub fn load_catalog(path: &Path) -> Result<Vec<Listing>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_catalog_from_reader(file).map_err(|e| CatalogError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Loads the catalog, falling back to `builtin_listings()` when the file is
/// unreadable or yields nothing.
pub fn load_or_builtin(path: &Path) -> Vec<Listing> {
    match load_catalog(path) {
        Ok(listings) if !listings.is_empty() => listings,
        Ok(_) => {
            warn!("catalog {} is empty, using built-in listings", path.display());
            builtin_listings()
        }
        Err(e) => {
            warn!("{e}; using built-in listings");
            builtin_listings()
        }
    }
}

/// The two listings a scan always turns up when no catalog is available.
pub fn builtin_listings() -> Vec<Listing> {
    let rows = [
        (
            "Michael Jordan 1986 Fleer Rookie PSA 9",
            12_000.0,
            15_000.0,
            "Michael Jordan",
            1986,
            "PSA 9",
            "Fleer",
            "CardCollector123",
            99.8,
        ),
        (
            "Patrick Mahomes 2017 Prizm Rookie PSA 10",
            1_800.0,
            2_500.0,
            "Patrick Mahomes",
            2017,
            "PSA 10",
            "Prizm",
            "SportsCardsPro",
            100.0,
        ),
    ];

    rows.into_iter()
        .map(
            |(title, price, market_value, player, year, grade, set_name, seller, rating)| {
                let profit = valuation::profit_potential(price, market_value);
                let mut listing = Listing {
                    title: title.into(),
                    price,
                    market_value,
                    profit_potential: profit,
                    is_underpriced: valuation::is_underpriced(profit),
                    image_url: String::new(),
                    player: player.into(),
                    year: Some(year),
                    grade: grade.into(),
                    set_name: set_name.into(),
                    condition: grade.into(),
                    seller: seller.into(),
                    seller_rating: Some(rating),
                    listing_url: String::new(),
                    confidence_score: 0.0,
                };
                listing.confidence_score = valuation::confidence_score(&listing);
                listing
            },
        )
        .collect()
}
