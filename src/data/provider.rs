//! Provider abstraction.
//!
//! Each upstream source implements one of these traits. Implementations do the
//! HTTP call and convert the raw payload into typed entities; they contain no
//! merge logic. Everything that decides between sources lives in `pipeline`.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::future::Future;
use std::time::Duration;

use super::{DataError, DataResult, NewsItem, ProfilePayload, Quote, Symbol};

/// A source of company profile payloads
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch the profile for `symbol`. An unknown symbol yields an empty payload.
    async fn fetch_profile(&self, symbol: &Symbol) -> DataResult<ProfilePayload>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

/// A source of quotes and company news
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_quote(&self, symbol: &Symbol) -> DataResult<Quote>;

    /// Company news published between `from` and `to` (inclusive), in provider order
    async fn fetch_company_news(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DataResult<Vec<NewsItem>>;

    fn name(&self) -> &str;
}

/// Run one provider call under a deadline
pub async fn with_timeout<T, Fut>(
    operation: &str,
    timeout: Duration,
    fut: Fut,
) -> DataResult<T>
where
    Fut: Future<Output = DataResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(DataError::Timeout {
            operation: operation.to_string(),
            timeout_seconds: timeout.as_secs(),
        }),
    }
}

/// Best-effort fetch: failures and timeouts degrade to `empty` with a warning.
/// Precondition violations are caller bugs and are still returned.
pub async fn best_effort<T, Fut>(
    operation: &str,
    timeout: Duration,
    fut: Fut,
    empty: T,
) -> DataResult<T>
where
    Fut: Future<Output = DataResult<T>>,
{
    match with_timeout(operation, timeout, fut).await {
        Ok(value) => Ok(value),
        Err(e) if e.is_precondition() => Err(e),
        Err(e) => {
            tracing::warn!(operation, error = %e, "Upstream fetch failed, treating as empty");
            Ok(empty)
        }
    }
}

/// Which step of a two-step fallback produced the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStep {
    Primary,
    Secondary,
}

/// Two-step fallback: keep `primary` unless it is empty, otherwise ask
/// `secondary`. Returns `None` when both are empty.
pub async fn first_non_empty<T, F, Fut>(
    primary: T,
    is_empty: impl Fn(&T) -> bool,
    secondary: F,
) -> Option<(T, FallbackStep)>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    if !is_empty(&primary) {
        return Some((primary, FallbackStep::Primary));
    }

    let fallback = secondary().await;
    if is_empty(&fallback) {
        None
    } else {
        Some((fallback, FallbackStep::Secondary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_primary_wins_without_calling_secondary() {
        let called = AtomicBool::new(false);
        let result = first_non_empty(vec![1], Vec::is_empty, || async {
            called.store(true, Ordering::SeqCst);
            vec![2]
        })
        .await;

        assert_eq!(result, Some((vec![1], FallbackStep::Primary)));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_secondary_used_when_primary_empty() {
        let result = first_non_empty(Vec::<i32>::new(), Vec::is_empty, || async { vec![2] }).await;
        assert_eq!(result, Some((vec![2], FallbackStep::Secondary)));
    }

    #[tokio::test]
    async fn test_both_empty() {
        let result =
            first_non_empty(Vec::<i32>::new(), Vec::is_empty, || async { Vec::new() }).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_timeout_becomes_empty() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec![1])
        };
        let result = best_effort("slow", Duration::from_millis(10), slow, Vec::new())
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_precondition_is_not_swallowed() {
        let bad = async { Err::<Vec<i32>, _>(DataError::InvalidDate("x".to_string())) };
        let result = best_effort("bad", Duration::from_secs(1), bad, Vec::new()).await;
        assert!(matches!(result, Err(DataError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_upstream_error_is_swallowed() {
        let failing = async { Err::<Vec<i32>, _>(DataError::api_error(503, "down")) };
        let result = best_effort("down", Duration::from_secs(1), failing, vec![7]).await;
        assert_eq!(result.unwrap(), vec![7]);
    }
}
