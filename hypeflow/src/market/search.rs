// Synthetic marketplace search results. The query is echoed back by the
// API but does not shape the results.

use crate::cards::round2;
use crate::simulate::SimRng;
use chrono::Utc;
use serde::Serialize;

pub const MAX_RESULTS: usize = 20;
pub const DEFAULT_LIMIT: usize = 20;

const PLAYERS: [&str; 5] = [
    "LeBron James",
    "Michael Jordan",
    "Kobe Bryant",
    "Tom Brady",
    "Patrick Mahomes",
];
const YEARS: [&str; 5] = ["2020", "2021", "2022", "2023", "2024"];
const GRADES: [&str; 5] = ["PSA 10", "PSA 9", "BGS 9.5", "BGS 9", "Raw"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub url: String,
    pub image: String,
    pub condition: String,
    pub seller: String,
    pub shipping: String,
    pub time_left: String,
    pub watchers: u32,
    pub bids: u32,
}

/// Generates `min(limit, MAX_RESULTS)` random listings.
pub fn search(limit: usize, rng: &mut SimRng) -> Vec<SearchResult> {
    let stamp = Utc::now().timestamp_millis();
    (0..limit.min(MAX_RESULTS))
        .map(|i| {
            let player = rng.pick(&PLAYERS).copied().unwrap_or(PLAYERS[0]);
            let year = rng.pick(&YEARS).copied().unwrap_or(YEARS[0]);
            let grade = rng.pick(&GRADES).copied().unwrap_or(GRADES[0]);
            let id = format!("ebay_{stamp}_{i}");
            SearchResult {
                url: format!("https://www.ebay.com/itm/{stamp}_{i}"),
                image: format!(
                    "https://via.placeholder.com/300x400?text={}+{year}",
                    player.replace(' ', "+")
                ),
                title: format!("{year} {player} Card {grade}"),
                price: round2(rng.uniform(50.0, 1050.0)),
                condition: grade.to_string(),
                seller: format!("seller_{}", i + 1),
                shipping: "Free".into(),
                time_left: format!("{}d {}h", rng.below(0, 7), rng.below(0, 24)),
                watchers: rng.below(0, 50),
                bids: rng.below(0, 10),
                id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_capped() {
        let mut rng = SimRng::seeded(1);
        assert_eq!(search(5, &mut rng).len(), 5);
        assert_eq!(search(100, &mut rng).len(), MAX_RESULTS);
        assert!(search(0, &mut rng).is_empty());
    }

    #[test]
    fn fields_stay_in_range() {
        let mut rng = SimRng::seeded(2);
        for (i, r) in search(20, &mut rng).iter().enumerate() {
            assert!((50.0..=1050.0).contains(&r.price));
            assert!(GRADES.contains(&r.condition.as_str()));
            assert!(r.title.ends_with(&r.condition));
            assert!(r.watchers < 50 && r.bids < 10);
            assert_eq!(r.seller, format!("seller_{}", i + 1));
            assert!(r.id.ends_with(&format!("_{i}")));
        }
    }

    #[test]
    fn serializes_camel_case() {
        let mut rng = SimRng::seeded(3);
        let json = serde_json::to_value(&search(1, &mut rng)[0]).unwrap();
        assert!(json.get("timeLeft").is_some());
        assert!(json.get("time_left").is_none());
    }
}
