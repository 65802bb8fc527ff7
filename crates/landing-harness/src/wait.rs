// Bounded waits
//
// Every synchronisation with the page's asynchronous rendering goes through
// `poll_until`: run a probe, and if it is not satisfied sleep for the poll
// interval and try again, until the budget is spent. There are no fixed
// sleeps anywhere else in the harness.
//
// Timing uses `tokio::time`, so tests can drive it with a paused clock.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Result of a bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    /// The probe produced a value
    Ready(T),
    /// The budget ran out first
    Expired { elapsed: Duration },
}

impl<T> WaitOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, WaitOutcome::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            WaitOutcome::Ready(value) => Some(value),
            WaitOutcome::Expired { .. } => None,
        }
    }
}

/// Polls `probe` until it yields `Some`, or `timeout` elapses.
///
/// The probe always runs at least once, and once more when the deadline is
/// reached, so a condition that becomes true right at expiry is still seen.
/// Sleeps are clipped to the remaining budget. A probe error ends the wait
/// immediately.
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<WaitOutcome<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();
    let deadline = start + timeout;

    loop {
        if let Some(value) = probe().await? {
            return Ok(WaitOutcome::Ready(value));
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(WaitOutcome::Expired {
                elapsed: now - start,
            });
        }

        let remaining = deadline - now;
        tokio::time::sleep(interval.min(remaining)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_first_probe() {
        let outcome = poll_until(Duration::from_secs(1), Duration::from_millis(100), || async {
            Ok(Some(42))
        })
        .await
        .unwrap();

        assert_eq!(outcome, WaitOutcome::Ready(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_several_polls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let outcome = poll_until(Duration::from_secs(1), Duration::from_millis(100), || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok((n >= 3).then_some(n)) }
        })
        .await
        .unwrap();

        assert_eq!(outcome.ready(), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_exactly_at_deadline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let outcome: WaitOutcome<()> =
            poll_until(Duration::from_millis(250), Duration::from_millis(100), || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(None) }
            })
            .await
            .unwrap();

        // Polls at 0, 100, 200 and a final one at 250
        assert_eq!(
            outcome,
            WaitOutcome::Expired {
                elapsed: Duration::from_millis(250)
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_error_stops_the_wait() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<WaitOutcome<()>> =
            poll_until(Duration::from_secs(5), Duration::from_millis(100), || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::InvalidArgument("boom".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
