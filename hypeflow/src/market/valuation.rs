// Mock listing valuation: market value multipliers, the underpricing rule,
// and a data-completeness confidence score.

use crate::cards::{round2, Listing};
use crate::simulate::SimRng;

/// Profit potential (percent) above which a listing counts as underpriced.
pub const UNDERPRICED_THRESHOLD: f64 = 15.0;

const GRADE_MULTIPLIERS: &[(&str, f64)] = &[
    ("PSA 10", 2.5),
    ("BGS 9.5", 2.0),
    ("PSA 9", 1.5),
    ("BGS 9", 1.3),
    ("PSA 8", 1.0),
    ("Raw", 0.8),
];

/// Keyed by a lowercase fragment of the player's name.
const PLAYER_MULTIPLIERS: &[(&str, f64)] = &[
    ("michael jordan", 3.0),
    ("lebron james", 2.5),
    ("patrick mahomes", 2.0),
    ("victor wembanyama", 1.8),
    ("luka don", 1.5),
    ("connor bedard", 1.3),
    ("joe burrow", 1.1),
    ("zion williamson", 0.9),
];

const ROOKIE_BONUS: f64 = 1.2;

pub fn grade_multiplier(grade: &str) -> f64 {
    let grade = grade.trim();
    GRADE_MULTIPLIERS
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(grade))
        .map_or(1.0, |(_, m)| *m)
}

pub fn player_multiplier(player: &str) -> f64 {
    let player = player.to_lowercase();
    PLAYER_MULTIPLIERS
        .iter()
        .find(|(key, _)| player.contains(key))
        .map_or(1.0, |(_, m)| *m)
}

pub fn rookie_bonus(title: &str) -> f64 {
    if title.to_lowercase().contains("rookie") {
        ROOKIE_BONUS
    } else {
        1.0
    }
}

/// Market value before jitter.
pub fn base_market_value(listing: &Listing) -> f64 {
    listing.price
        * grade_multiplier(&listing.grade)
        * player_multiplier(&listing.player)
        * rookie_bonus(&listing.title)
}

/// Percent gain from `price` to `market_value`, floored at zero.
pub fn profit_potential(price: f64, market_value: f64) -> f64 {
    if price <= 0.0 || market_value <= 0.0 {
        return 0.0;
    }
    round2(((market_value - price) / price * 100.0).max(0.0))
}

pub fn is_underpriced(profit_potential: f64) -> bool {
    profit_potential > UNDERPRICED_THRESHOLD
}

/// 0.5 base, plus credit for a descriptive title, a well-rated seller and
/// complete card data. Capped at 1.0.
pub fn confidence_score(listing: &Listing) -> f64 {
    let mut score: f64 = 0.5;
    if listing.title.chars().count() > 30 {
        score += 0.1;
    }
    match listing.seller_rating {
        Some(r) if r > 98.0 => score += 0.2,
        Some(r) if r > 95.0 => score += 0.1,
        _ => {}
    }
    if !listing.player.is_empty() {
        score += 0.1;
    }
    if listing.year.is_some() {
        score += 0.1;
    }
    if listing.is_graded() {
        score += 0.1;
    }
    round2(score.min(1.0))
}

/// Fills in market value, profit potential, underpriced flag, and
/// confidence. Market value gets a +/-10% jitter from `rng`.
pub fn value_listing(listing: &mut Listing, rng: &mut SimRng) {
    let market_value = round2(base_market_value(listing) * rng.uniform(0.9, 1.1));
    let profit = profit_potential(listing.price, market_value);
    listing.market_value = market_value;
    listing.profit_potential = profit;
    listing.is_underpriced = is_underpriced(profit);
    listing.confidence_score = confidence_score(listing);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, price: f64, player: &str, grade: &str) -> Listing {
        Listing {
            title: title.into(),
            price,
            market_value: 0.0,
            profit_potential: 0.0,
            is_underpriced: false,
            image_url: String::new(),
            player: player.into(),
            year: Some(2023),
            grade: grade.into(),
            set_name: "Prizm".into(),
            condition: grade.into(),
            seller: "seller".into(),
            seller_rating: Some(99.2),
            listing_url: String::new(),
            confidence_score: 0.0,
        }
    }

    #[test]
    fn base_value_multiplies_grade_player_and_rookie() {
        let l = listing(
            "Victor Wembanyama 2023 Prizm Rookie #280 PSA 10",
            2450.0,
            "Victor Wembanyama",
            "PSA 10",
        );
        assert!((base_market_value(&l) - 2450.0 * 2.5 * 1.8 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn unknown_grade_and_player_are_neutral() {
        assert_eq!(grade_multiplier("SGC 7"), 1.0);
        assert_eq!(player_multiplier("Some Prospect"), 1.0);
        assert_eq!(rookie_bonus("Base card"), 1.0);
        assert_eq!(player_multiplier("Luka Dončić"), 1.5);
        assert_eq!(player_multiplier("LUKA DONCIC"), 1.5);
    }

    #[test]
    fn underpriced_is_strictly_above_fifteen_percent() {
        assert_eq!(profit_potential(100.0, 115.0), 15.0);
        assert!(!is_underpriced(profit_potential(100.0, 115.0)));
        assert!(is_underpriced(profit_potential(100.0, 115.5)));
    }

    #[test]
    fn profit_never_negative() {
        assert_eq!(profit_potential(100.0, 50.0), 0.0);
        assert_eq!(profit_potential(0.0, 50.0), 0.0);
        assert_eq!(profit_potential(100.0, 0.0), 0.0);
    }

    #[test]
    fn confidence_counts_completeness() {
        let full = listing(
            "Victor Wembanyama 2023 Prizm Rookie #280 PSA 10",
            2450.0,
            "Victor Wembanyama",
            "PSA 10",
        );
        assert_eq!(confidence_score(&full), 1.0);

        let mut sparse = listing("Short title", 10.0, "", "Raw");
        sparse.year = None;
        sparse.seller_rating = Some(96.0);
        assert_eq!(confidence_score(&sparse), 0.6);
    }

    #[test]
    fn value_listing_applies_bounded_jitter() {
        let mut rng = SimRng::seeded(4);
        for _ in 0..100 {
            let mut l = listing("Joe Burrow 2020 Prizm Rookie #252 PSA 10", 425.0, "Joe Burrow", "PSA 10");
            value_listing(&mut l, &mut rng);
            let base = 425.0 * 2.5 * 1.1 * 1.2;
            assert!(l.market_value >= round2(base * 0.9) && l.market_value <= round2(base * 1.1));
            assert_eq!(l.is_underpriced, l.profit_potential > UNDERPRICED_THRESHOLD);
        }
    }
}
