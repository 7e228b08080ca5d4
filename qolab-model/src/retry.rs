use qolab_core::{QolabError, Result};
use std::{future::Future, time::Duration};

/// Retry policy for oracle calls.
///
/// The default retries once after one second.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub enabled: bool,
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 1,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// No waiting between attempts. Intended for tests.
    #[must_use]
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    fn delay_after(&self, current: Duration) -> Duration {
        let multiplier = f64::from(self.backoff_multiplier.max(1.0));
        Duration::from_secs_f64(current.as_secs_f64() * multiplier).min(self.max_delay)
    }
}

/// Transient HTTP statuses: request timeout, rate limit and server-side failures.
#[must_use]
pub fn is_retryable_status_code(status_code: u16) -> bool {
    matches!(status_code, 408 | 429 | 500..=599)
}

/// Classifies a [`QolabError`] produced by a chat-completion client.
///
/// Only model errors are retried, and only when they carry a transient status or a
/// transport-level failure. Configuration and parse errors never are. A status the client
/// already tagged non-retryable wins over any transport wording in the response body.
#[must_use]
pub fn is_retryable_model_error(error: &QolabError) -> bool {
    let QolabError::Model(message) = error else {
        return false;
    };
    let upper = message.to_ascii_uppercase();
    if upper.contains("NON-RETRYABLE)") {
        return false;
    }
    upper.contains(", RETRYABLE)")
        || upper.contains("TIMED OUT")
        || upper.contains("TIMEOUT")
        || upper.contains("CONNECTION")
        || upper.contains("REQUEST FAILED")
}

pub async fn execute_with_retry<T, Op, Fut, Classify>(
    retry_config: &RetryConfig,
    classify_error: Classify,
    mut operation: Op,
) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    Classify: Fn(&QolabError) -> bool,
{
    let max_retries = if retry_config.enabled {
        retry_config.max_retries
    } else {
        0
    };
    let mut delay = retry_config.initial_delay;
    let mut attempt: u32 = 0;

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        if attempt >= max_retries || !classify_error(&error) {
            return Err(error);
        }
        attempt += 1;
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Oracle call failed with a transient error; retrying"
        );
        tokio::time::sleep(delay).await;
        delay = retry_config.delay_after(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    fn counting_failure(
        attempts: &Arc<AtomicU32>,
        fail_times: u32,
        message: &'static str,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<&'static str>> + Send>> {
        let attempts = Arc::clone(attempts);
        move || {
            let attempts = Arc::clone(&attempts);
            Box::pin(async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < fail_times {
                    return Err(QolabError::Model(message.to_string()));
                }
                Ok("ok")
            })
        }
    }

    #[tokio::test]
    async fn retries_transient_failure_once_by_default() {
        let attempts = Arc::new(AtomicU32::new(0));
        let config = RetryConfig::default().with_initial_delay(Duration::ZERO);

        let result = execute_with_retry(
            &config,
            is_retryable_model_error,
            counting_failure(
                &attempts,
                1,
                "OpenAI API error (503 Service Unavailable, retryable)",
            ),
        )
        .await
        .unwrap();

        assert_eq!(result, "ok");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let attempts = Arc::new(AtomicU32::new(0));

        let error = execute_with_retry(
            &RetryConfig::immediate(1),
            is_retryable_model_error,
            counting_failure(&attempts, 5, "OpenAI API request failed: broken pipe"),
        )
        .await
        .unwrap_err();

        assert!(matches!(error, QolabError::Model(_)));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let attempts = Arc::new(AtomicU32::new(0));

        execute_with_retry(
            &RetryConfig::immediate(3),
            is_retryable_model_error,
            counting_failure(
                &attempts,
                5,
                "OpenAI API error (401 Unauthorized, non-retryable)",
            ),
        )
        .await
        .unwrap_err();

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_config_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));

        execute_with_retry(
            &RetryConfig::disabled(),
            is_retryable_model_error,
            counting_failure(
                &attempts,
                5,
                "OpenAI API error (429 Too Many Requests, retryable)",
            ),
        )
        .await
        .unwrap_err();

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn status_classification() {
        assert!(is_retryable_status_code(408));
        assert!(is_retryable_status_code(429));
        assert!(is_retryable_status_code(502));
        assert!(!is_retryable_status_code(400));
        assert!(!is_retryable_status_code(404));
        assert!(!is_retryable_model_error(&QolabError::Config("timeout".to_string())));
    }

    #[test]
    fn non_retryable_status_wins_over_transport_wording() {
        let body_mentions_timeout = QolabError::Model(
            "OpenAI API error (400 Bad Request, non-retryable): connection timeout".to_string(),
        );
        assert!(!is_retryable_model_error(&body_mentions_timeout));

        let transport = QolabError::Model("OpenAI API request failed: reset".to_string());
        assert!(is_retryable_model_error(&transport));
    }
}
