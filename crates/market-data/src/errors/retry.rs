//! Retry classification and the bounded backoff loop.

use std::future::Future;
use std::time::Duration;

use log::debug;

use super::MarketDataError;

/// Classification for retry policy.
///
/// | Class | Retry same request? |
/// |-------|---------------------|
/// | `Never` | No |
/// | `WithBackoff` | Yes, after a linearly increasing delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, missing key, or terminal provider failure.
    Never,

    /// Retry the same request after a delay. Used for rate limiting and
    /// timeouts, where the provider is expected to recover shortly.
    WithBackoff,
}

/// Runs `op` up to `max_attempts` times, sleeping between attempts.
///
/// Only errors classified [`RetryClass::WithBackoff`] are retried; everything
/// else is returned immediately. The delay grows linearly: attempt `n` waits
/// `base_delay * n` before the next try.
///
/// Used for the daily time-series endpoint, where the free tier rate limit is
/// routinely hit and a short wait resolves it.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, MarketDataError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MarketDataError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.retry_class() == RetryClass::WithBackoff && attempt < max_attempts => {
                let delay = base_delay * attempt;
                debug!(
                    "attempt {}/{} failed ({}), retrying in {:?}",
                    attempt, max_attempts, err, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn rate_limited() -> MarketDataError {
        MarketDataError::RateLimited {
            provider: "TEST".to_string(),
        }
    }

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(3, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, MarketDataError>(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limit_until_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(3, Duration::from_millis(1), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, _> = retry_with_backoff(3, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(rate_limited()) }
        })
        .await;
        assert!(matches!(result, Err(MarketDataError::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn terminal_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, _> = retry_with_backoff(3, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(MarketDataError::SymbolNotFound("NOPE".to_string())) }
        })
        .await;
        assert!(matches!(result, Err(MarketDataError::SymbolNotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
