//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::HearsayError;

/// Wrap a future with a timeout.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, HearsayError>>,
) -> Result<T, HearsayError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(HearsayError::Timeout(duration.as_millis() as u64)),
    }
}
