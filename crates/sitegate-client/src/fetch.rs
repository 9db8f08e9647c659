//! Partial-failure fallback for list reads.

use sitegate_types::{ApiError, ErrorCode};
use std::future::Future;

/// Awaits one fetch and falls back to `T::default()` on failure.
///
/// Dashboards fire several independent fetches; one failing endpoint must
/// not block the others from rendering. The failure is logged with its
/// error code and the screen gets an explicit empty value, never stale or
/// undefined data.
///
/// # Example
///
/// ```no_run
/// use sitegate_client::fetch_or_default;
/// use sitegate_types::ApiError;
///
/// # async fn example() {
/// let items: Vec<u32> = fetch_or_default("items", async {
///     Err::<Vec<u32>, _>(ApiError::NetworkUnavailable)
/// })
/// .await;
/// assert!(items.is_empty());
/// # }
/// ```
pub async fn fetch_or_default<T, F>(label: &str, fetch: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, ApiError>>,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(fetch = label, code = e.code(), error = %e, "fetch failed, using default");
            T::default()
        }
    }
}
