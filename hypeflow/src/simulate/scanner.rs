// Mock marketplace scan: reports progress in fixed steps, then hands back
// a static listing list.

use crate::cards::Listing;
use crate::config::ScanConfig;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// Percentage complete, 0..=100.
    Progress(u8),
    Complete(Vec<Listing>),
}

/// Progress values reported for a given step: `0, step, 2*step, ...`
/// always terminated by exactly one `100`.
pub fn progress_steps(step: u8) -> Vec<u8> {
    let step = step.clamp(1, 100) as usize;
    let mut steps: Vec<u8> = (0..=100u8).step_by(step).collect();
    if steps.last() != Some(&100) {
        steps.push(100);
    }
    steps
}

/// Emits each progress step followed by a pause, then the listings.
///
/// Generic over the receiving event type so callers can fold scan events
/// into their own channel. Stops early when the receiver is gone.
pub async fn run_scan<T>(config: ScanConfig, listings: Vec<Listing>, tx: mpsc::Sender<T>)
where
    T: From<ScanEvent> + Send + 'static,
{
    let interval = Duration::from_millis(config.interval_ms);
    for progress in progress_steps(config.step) {
        if tx.send(ScanEvent::Progress(progress).into()).await.is_err() {
            debug!("scan receiver dropped at {progress}%");
            return;
        }
        tokio::time::sleep(interval).await;
    }
    debug!("scan finished with {} listings", listings.len());
    let _ = tx.send(ScanEvent::Complete(listings).into()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_counts_by_ten() {
        assert_eq!(
            progress_steps(10),
            vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
        );
    }

    #[test]
    fn uneven_step_still_ends_at_100() {
        let steps = progress_steps(30);
        assert_eq!(steps, vec![0, 30, 60, 90, 100]);
    }

    #[test]
    fn every_step_size_is_monotonic_and_ends_at_100() {
        for step in 0..=255u8 {
            let steps = progress_steps(step);
            assert!(steps.windows(2).all(|w| w[0] <= w[1]), "step {step}: {steps:?}");
            assert_eq!(steps.last(), Some(&100));
            assert_eq!(steps.iter().filter(|&&p| p == 100).count(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn progress_precedes_results() {
        let (tx, mut rx) = mpsc::channel::<ScanEvent>(32);
        let config = ScanConfig {
            step: 25,
            interval_ms: 200,
        };
        tokio::spawn(run_scan(config, Vec::new(), tx));

        let mut seen = Vec::new();
        let mut completed = false;
        while let Some(event) = rx.recv().await {
            match event {
                ScanEvent::Progress(p) => {
                    assert!(!completed, "progress after completion");
                    seen.push(p);
                }
                ScanEvent::Complete(listings) => {
                    assert!(listings.is_empty());
                    completed = true;
                }
            }
        }
        assert!(completed);
        assert_eq!(seen, vec![0, 25, 50, 75, 100]);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel::<ScanEvent>(1);
        drop(rx);
        // Returns instead of sleeping through every step.
        run_scan(ScanConfig::default(), Vec::new(), tx).await;
    }
}
