// Timed stand-ins for "AI processing": card grading, marketplace scanning,
// and the oracle's typing delay. All randomness comes from `SimRng`.

pub mod grader;
pub mod rng;
pub mod scanner;

pub use grader::{GradeDetails, GradeResult};
pub use rng::{SharedRng, SimRng};
pub use scanner::ScanEvent;

use crate::config::OracleConfig;
use std::time::Duration;

/// How long the oracle "types" before a reply is delivered.
pub fn typing_delay(config: &OracleConfig, rng: &mut SimRng) -> Duration {
    Duration::from_millis(rng.range_u64(config.min_delay_ms, config.max_delay_ms))
}
