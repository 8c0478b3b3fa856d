//! Minimum spacing between outbound calls.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Spaces calls at least `min_interval` apart.
///
/// Shared through an `Arc` by every clone of a client, so all calls to one
/// service draw from the same budget. Holding the lock while sleeping
/// serializes waiters in arrival order.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Throttle {
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::const_new(None),
        }
    }

    /// Wait until a call is allowed, then claim the slot.
    pub async fn wait(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let next = prev + self.min_interval;
            if Instant::now() < next {
                sleep_until(next).await;
            }
        }
        *last = Some(Instant::now());
    }
}
