//! Simulated external latency
//!
//! Real ledger operations would talk to other systems (network calls,
//! validation services) after updating a balance. The [`Latency`] hook
//! stands in for that work. It runs after the operation's locks have been
//! released, so it never extends a critical section.
//!
//! Production runs use [`SleepLatency`]; tests inject [`NoLatency`] or a
//! short sleep so they don't depend on wall-clock seconds.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Delay incurred by every ledger operation after its critical section
#[async_trait]
pub trait Latency: Debug + Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed duration on the tokio timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepLatency {
    duration: Duration,
}

impl SleepLatency {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl Latency for SleepLatency {
    async fn pause(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// No delay; only yields to the scheduler so other tasks get a turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn pause(&self) {
        tokio::task::yield_now().await;
    }
}

/// Pick the latency hook for a configured delay
///
/// A zero duration maps to [`NoLatency`] so the timer is never armed.
pub fn latency_for(duration: Duration) -> Arc<dyn Latency> {
    if duration.is_zero() {
        Arc::new(NoLatency)
    } else {
        Arc::new(SleepLatency::new(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_sleep_latency_waits() {
        let latency = SleepLatency::new(Duration::from_millis(20));
        let start = Instant::now();

        latency.pause().await;

        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_no_latency_returns_immediately() {
        let start = Instant::now();

        NoLatency.pause().await;

        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_latency_for_zero_is_no_latency() {
        let latency = latency_for(Duration::ZERO);
        assert_eq!(format!("{:?}", latency), "NoLatency");

        let latency = latency_for(Duration::from_millis(5));
        assert!(format!("{:?}", latency).starts_with("SleepLatency"));
    }
}
