use anyhow::Result;
use log::{debug, info, warn};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

pub async fn retry_with_exponential_backoff<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>> + Send + 'static,
{
    let mut delay = config.base_delay;
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("Operation succeeded on attempt {}", attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                warn!("Operation failed after {} attempts: {}", max_attempts, e);
                return Err(e.context(format!("failed after {} attempts", max_attempts)));
            }
            Err(e) if is_transient_error(&e) => {
                debug!("Attempt {} failed transiently, retrying in {:?}: {}", attempt, delay, e);
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(
                    Duration::from_millis((delay.as_millis() as f64 * config.backoff_multiplier) as u64),
                    config.max_delay,
                );
                attempt += 1;
            }
            Err(e) => {
                debug!("Attempt {} failed with non-transient error, not retrying: {}", attempt, e);
                return Err(e);
            }
        }
    }
}

/// Whether the failure looks like contention or a timeout that may clear.
pub fn is_transient_error(error: &anyhow::Error) -> bool {
    let error_str = format!("{:#}", error).to_lowercase();

    error_str.contains("timeout")
        || error_str.contains("timed out")
        || error_str.contains("connection")
        || error_str.contains("temporary")
        // SQLite contention
        || error_str.contains("database is locked")
        || error_str.contains("busy")
        || error_str.contains("i/o")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_retry_success_on_second_attempt() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result = retry_with_exponential_backoff(&fast_config(), || {
            let count_clone = attempt_count_clone.clone();
            async move {
                let count = count_clone.fetch_add(1, Ordering::SeqCst);
                if count == 0 {
                    Err(anyhow::anyhow!("database is locked"))
                } else {
                    Ok("snapshot")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "snapshot");
        assert_eq!(attempt_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_non_transient_error() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result: Result<&str> = retry_with_exponential_backoff(&fast_config(), || {
            let count_clone = attempt_count_clone.clone();
            async move {
                count_clone.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("no such table: announcements"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempt_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let attempt_count = Arc::new(AtomicU32::new(0));
        let attempt_count_clone = attempt_count.clone();

        let result: Result<()> = retry_with_exponential_backoff(&fast_config(), || {
            let count_clone = attempt_count_clone.clone();
            async move {
                count_clone.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("connection reset"))
            }
        })
        .await;

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("failed after 3 attempts"));
        assert_eq!(attempt_count.load(Ordering::SeqCst), 3);
    }
}
