//! Retry for read-type queries. Writes never go through here.

use std::future::Future;

pub const DEFAULT_READ_RETRIES: u32 = 1;

/// Run `op`, re-running it up to `retries` more times while it fails. No
/// backoff between attempts. The last error is returned.
pub async fn with_retry<T, E, F, Fut>(retries: u32, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::warn!(error = %err, attempt, retries, "query failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}
