// Mock card grader. Nothing about the card influences the result: it is
// either the fixed showcase result or a bounded random draw.

use crate::cards::round2;
use crate::config::{GradingConfig, GradingMode};
use crate::simulate::rng::{with_rng, SharedRng, SimRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Every label the grader can emit.
pub const GRADE_LABELS: [&str; 6] = ["PSA 10", "PSA 9", "PSA 8", "BGS 9.5", "BGS 9", "BGS 8.5"];

pub const MARKET_TRENDS: [&str; 4] = [
    "+15.3% this month",
    "+8.7% this week",
    "+22.1% this quarter",
    "+5.2% this year",
];

const SUBMIT: &str = "Submit for grading";
const RESUBMIT: &str = "Consider resubmission";

/// Confidence strictly above this recommends submission.
const SUBMIT_THRESHOLD: f64 = 0.80;
const DEFECT_PROBABILITY: f64 = 0.3;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Sub-scores on the same 0..1 scale as confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeDetails {
    pub centering: f64,
    pub corners: f64,
    pub edges: f64,
    pub surface: f64,
}

impl GradeDetails {
    pub fn mean(&self) -> f64 {
        (self.centering + self.corners + self.edges + self.surface) / 4.0
    }

    pub fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("centering", self.centering),
            ("corners", self.corners),
            ("edges", self.edges),
            ("surface", self.surface),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    pub kind: String,
    pub severity: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub grade: String,
    pub confidence: f64,
    pub details: GradeDetails,
    pub recommendation: String,
    pub estimated_value: f64,
    pub market_trend: String,
    pub category: String,
    pub defects: Vec<Defect>,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Builds a result immediately, without the artificial delay.
pub fn grade_card(config: &GradingConfig, rng: &mut SimRng) -> GradeResult {
    match config.mode {
        GradingMode::Fixed => showcase_result(),
        GradingMode::Random => random_result(config, rng),
    }
}

/// Waits the configured delay, then grades.
pub async fn run_grading(config: GradingConfig, rng: SharedRng) -> GradeResult {
    tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
    let result = with_rng(&rng, |r| grade_card(&config, r));
    debug!(grade = %result.grade, confidence = result.confidence, "grading finished");
    result
}

/// The fixed result shown when grading runs in `fixed` mode.
pub fn showcase_result() -> GradeResult {
    GradeResult {
        grade: "BGS 9.5".into(),
        confidence: 0.973,
        details: GradeDetails {
            centering: 0.90,
            corners: 0.90,
            edges: 1.00,
            surface: 0.90,
        },
        recommendation: "Excellent candidate for PSA grading".into(),
        estimated_value: 2500.0,
        market_trend: MARKET_TRENDS[0].into(),
        category: "Mint".into(),
        defects: Vec::new(),
    }
}

fn random_result(config: &GradingConfig, rng: &mut SimRng) -> GradeResult {
    let (lo, hi) = (config.confidence_min, config.confidence_max);
    let draw = |rng: &mut SimRng| round2(rng.uniform(lo, hi)).clamp(lo, hi);

    let grade = rng.pick(&GRADE_LABELS).copied().unwrap_or(GRADE_LABELS[0]);
    let confidence = draw(rng);
    let details = GradeDetails {
        centering: draw(rng),
        corners: draw(rng),
        edges: draw(rng),
        surface: draw(rng),
    };

    let recommendation = if confidence > SUBMIT_THRESHOLD {
        SUBMIT
    } else {
        RESUBMIT
    };

    let mean = details.mean();
    let estimated_value = round2(1000.0 * mean * confidence * rng.uniform(0.8, 1.2));
    let market_trend = rng.pick(&MARKET_TRENDS).copied().unwrap_or(MARKET_TRENDS[0]);

    let defects = if rng.chance(DEFECT_PROBABILITY) {
        vec![Defect {
            kind: "surface_scratch".into(),
            severity: "minor".into(),
            location: "center".into(),
        }]
    } else {
        Vec::new()
    };

    GradeResult {
        grade: grade.into(),
        confidence,
        details,
        recommendation: recommendation.into(),
        estimated_value,
        market_trend: market_trend.into(),
        category: category_for(mean * 10.0).into(),
        defects,
    }
}

/// Condition category for a ten-point score.
pub fn category_for(score: f64) -> &'static str {
    if score >= 9.5 {
        "Gem Mint"
    } else if score >= 9.0 {
        "Mint"
    } else if score >= 8.0 {
        "Near Mint"
    } else if score >= 7.0 {
        "Excellent"
    } else {
        "Very Good"
    }
}
