// Domain records shared by every view: portfolio cards, marketplace listings,
// and chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Basketball,
    Football,
    Hockey,
    Baseball,
}

impl Sport {
    pub fn label(self) -> &'static str {
        match self {
            Sport::Basketball => "Basketball",
            Sport::Football => "Football",
            Sport::Hockey => "Hockey",
            Sport::Baseball => "Baseball",
        }
    }
}

/// A card held in the sample portfolio. Everything except favorite
/// membership (tracked in the session) is static.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub player: String,
    pub sport: Sport,
    pub year: u16,
    /// Ten-point numeric grade.
    pub grade: f64,
    pub price: f64,
    /// Percentage above the asking price the card is believed to be worth.
    pub profit_potential: f64,
    pub is_underpriced: bool,
    pub rarity: String,
    pub image_url: String,
}

/// Portfolio summary plus the cards shown in the Portfolio view.
///
/// The headline figures describe the whole (fictional) collection, so
/// `total_cards` is larger than `cards.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub total_value: f64,
    pub total_cards: u32,
    pub average_grade: f64,
    pub favorites: u32,
    pub cards: Vec<Card>,
}

impl Portfolio {
    pub fn sample() -> Self {
        Portfolio {
            total_value: 125_000.0,
            total_cards: 45,
            average_grade: 8.7,
            favorites: 12,
            cards: sample_cards(),
        }
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

fn sample_cards() -> Vec<Card> {
    vec![
        Card {
            id: "1".into(),
            name: "Michael Jordan 1986 Fleer Rookie #57".into(),
            player: "Michael Jordan".into(),
            sport: Sport::Basketball,
            year: 1986,
            grade: 9.0,
            price: 15_000.0,
            profit_potential: 25.0,
            is_underpriced: true,
            rarity: "Legendary".into(),
            image_url: "https://images.unsplash.com/photo-1546519638-68e109498ffc?w=300".into(),
        },
        Card {
            id: "2".into(),
            name: "Patrick Mahomes 2017 Prizm Rookie #252".into(),
            player: "Patrick Mahomes".into(),
            sport: Sport::Football,
            year: 2017,
            grade: 10.0,
            price: 2_500.0,
            profit_potential: 40.0,
            is_underpriced: true,
            rarity: "Ultra Rare".into(),
            image_url: "https://images.unsplash.com/photo-1566577739112-5180d4bf9390?w=300".into(),
        },
        Card {
            id: "3".into(),
            name: "LeBron James 2003 Topps Chrome Rookie".into(),
            player: "LeBron James".into(),
            sport: Sport::Basketball,
            year: 2003,
            grade: 8.0,
            price: 5_000.0,
            profit_potential: 5.0,
            is_underpriced: false,
            rarity: "Rare".into(),
            image_url: "https://images.unsplash.com/photo-1574623452334-1e0ac2b3ccb4?w=300".into(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// A marketplace listing. Field names serialize as snake_case; camelCase
/// aliases are accepted so hand-edited fixtures also load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub price: f64,
    #[serde(alias = "marketValue")]
    pub market_value: f64,
    #[serde(alias = "profitPotential")]
    pub profit_potential: f64,
    #[serde(alias = "isUnderpriced")]
    pub is_underpriced: bool,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub grade: String,
    #[serde(default, alias = "setName")]
    pub set_name: String,
    /// Seller-described condition, e.g. "PSA 8" or "Raw/Mint".
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub seller: String,
    #[serde(default, alias = "sellerRating")]
    pub seller_rating: Option<f64>,
    #[serde(default, alias = "listingUrl")]
    pub listing_url: String,
    #[serde(default, alias = "confidenceScore")]
    pub confidence_score: f64,
}

impl Listing {
    /// True when the listing carries a company grade rather than "Raw".
    pub fn is_graded(&self) -> bool {
        !self.grade.is_empty() && !self.grade.eq_ignore_ascii_case("raw")
    }
}

/// Opportunities are underpriced listings ordered by profit potential,
/// highest first.
pub fn top_opportunities(listings: &[Listing], n: usize) -> Vec<&Listing> {
    let mut picks: Vec<&Listing> = listings.iter().filter(|l| l.is_underpriced).collect();
    picks.sort_by(|a, b| b.profit_potential.total_cmp(&a.profit_potential));
    picks.truncate(n);
    picks
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Oracle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Formats a dollar amount with thousands separators, dropping cents when
/// the amount is whole: `12500.0` -> `$12,500`, `6124.375` -> `$6,124.38`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac:02}")
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
