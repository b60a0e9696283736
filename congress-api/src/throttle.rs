use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Keeps requests at least `min_interval` apart.
///
/// Create one per run and hand an `Arc<Throttler>` to every client that
/// should share the request budget.
#[derive(Debug)]
pub struct Throttler {
    min_interval: Duration,
    /// Earliest instant the next request may go out.
    next_slot: Mutex<Option<Instant>>,
}

impl Throttler {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Sleeps until the next request is allowed, then claims the slot.
    pub async fn wait(&self) {
        let mut next_slot = self.next_slot.lock().await;

        let now = Instant::now();
        let start = match *next_slot {
            Some(slot) if slot > now => {
                tracing::trace!(delay = ?(slot - now), "Throttling Congress.gov request");
                tokio::time::sleep_until(slot).await;
                slot
            }
            _ => now,
        };

        *next_slot = Some(start + self.min_interval);
    }
}

impl Default for Throttler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
