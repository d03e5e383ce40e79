// Mock market data: catalog, valuation, analysis, fixture, and search.

pub mod analysis;
pub mod catalog;
pub mod fixture;
pub mod search;
pub mod valuation;

use crate::cards::Listing;
use crate::simulate::SimRng;
use analysis::MarketAnalysis;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Everything the Market view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketView {
    pub analysis: MarketAnalysis,
    pub active_users: u64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub listings: Vec<Listing>,
    /// False when the built-in fallback numbers are in use.
    pub from_fixture: bool,
}

impl MarketView {
    pub fn fallback() -> Self {
        MarketView {
            analysis: MarketAnalysis::fallback(),
            active_users: 125_000,
            market_cap: 50_000_000_000.0,
            volume_24h: 1_000_000_000.0,
            listings: Vec::new(),
            from_fixture: false,
        }
    }
}

const INCLUDE_PROBABILITY: f64 = 0.7;

/// Simulated marketplace scan over the catalog.
///
/// A listing matches a term when any word of the term occurs in its title.
/// Each match is kept with 70% probability; duplicates (by title) are
/// dropped and survivors are valued.
pub fn scan_catalog(catalog: &[Listing], terms: &[String], rng: &mut SimRng) -> Vec<Listing> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for term in terms {
        let words: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
        let mut hits = 0usize;
        for listing in catalog {
            let title = listing.title.to_lowercase();
            if !words.iter().any(|w| title.contains(w.as_str())) {
                continue;
            }
            if !rng.chance(INCLUDE_PROBABILITY) {
                continue;
            }
            hits += 1;
            if seen.insert(listing.title.clone()) {
                let mut listing = listing.clone();
                valuation::value_listing(&mut listing, rng);
                found.push(listing);
            }
        }
        debug!("scan term '{term}': {hits} hits");
    }
    found
}
