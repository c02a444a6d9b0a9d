//! HTTP fetch with bounded retries and exponential backoff.
//!
//! Transient failures (timeouts, transport errors, 5xx) are retried;
//! 404/401/429 are terminal classifications and short-circuit the loop
//! immediately. The per-attempt timeout lives on the `reqwest::Client`
//! (builder-level), so a timed-out attempt surfaces as a timeout error and
//! counts against the retry budget like any other transient failure.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::error::WeatherError;

/// Default retry configuration
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per request, first try included
    pub max_attempts: u32,
    /// Delay before the first retry (doubles each attempt)
    pub initial_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::from_millis(initial_delay_ms),
        }
    }

    /// Backoff before retrying after attempt `attempt` (0-based):
    /// `initial_delay * 2^attempt`, i.e. 1s, 2s, 4s, ...
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis((self.initial_delay.as_millis() as u64).saturating_mul(factor))
    }
}

/// Pure classification of an HTTP status for the retry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    /// 404: the city does not exist upstream
    NotFound,
    /// 401: credential rejected
    Unauthorized,
    /// 429: throttled; caller may retry manually later
    RateLimited,
    /// 5xx: eligible for retry
    ServerError,
    /// Any other non-2xx: retried on non-final attempts only
    HttpError,
}

impl StatusClass {
    /// Terminal classifications short-circuit the retry loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::NotFound | Self::Unauthorized | Self::RateLimited)
    }

    fn into_error(self, status: StatusCode) -> WeatherError {
        match self {
            Self::NotFound => WeatherError::CityNotFound,
            Self::Unauthorized => WeatherError::InvalidApiKey,
            Self::RateLimited => WeatherError::RateLimited,
            Self::ServerError => WeatherError::ServerError(status.as_u16()),
            Self::Success | Self::HttpError => WeatherError::Http(status.as_u16()),
        }
    }
}

/// Classify an HTTP status code.
pub fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        return StatusClass::Success;
    }
    match status.as_u16() {
        404 => StatusClass::NotFound,
        401 => StatusClass::Unauthorized,
        429 => StatusClass::RateLimited,
        s if s >= 500 => StatusClass::ServerError,
        _ => StatusClass::HttpError,
    }
}

/// Issue a GET with bounded retries and exponential backoff.
///
/// Returns the first 2xx response. Terminal statuses (404/401/429) fail
/// immediately; other failures are retried until the budget is exhausted.
/// A transport failure on the final attempt collapses into the generic
/// "connection failed after multiple attempts" error, while a classified
/// HTTP failure on the final attempt is returned as-is.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    config: &RetryConfig,
) -> Result<Response, WeatherError> {
    let mut attempt: u32 = 0;

    loop {
        let final_attempt = attempt + 1 >= config.max_attempts;

        match client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                let class = classify_status(status);

                if class == StatusClass::Success {
                    if attempt > 0 {
                        tracing::info!(attempt = attempt + 1, "Request succeeded after retries");
                    }
                    return Ok(response);
                }

                let err = class.into_error(status);
                if class.is_terminal() {
                    tracing::warn!(%status, "Terminal HTTP status, not retrying");
                    return Err(err);
                }
                if final_attempt {
                    tracing::error!(%status, attempts = attempt + 1, "Retry budget exhausted");
                    return Err(err);
                }
                tracing::warn!(%status, attempt = attempt + 1, "Retryable HTTP status");
            }
            Err(e) => {
                let err = if e.is_timeout() {
                    WeatherError::Timeout
                } else {
                    WeatherError::Network(e)
                };
                if final_attempt {
                    tracing::error!(error = %err, attempts = attempt + 1, "Retry budget exhausted");
                    return Err(match err {
                        WeatherError::Network(_) => WeatherError::RetriesExhausted,
                        other => other,
                    });
                }
                tracing::warn!(error = %err, attempt = attempt + 1, "Retryable transport error");
            }
        }

        let delay = config.delay_for_attempt(attempt);
        tracing::debug!(?delay, "Backing off before retry");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retry() -> RetryConfig {
        RetryConfig::new(3, 10)
    }

    #[test]
    fn test_delay_follows_exponential_backoff() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(4000));
    }

    #[test]
    fn test_classification() {
        use StatusClass::*;
        assert_eq!(classify_status(StatusCode::OK), Success);
        assert_eq!(classify_status(StatusCode::NOT_FOUND), NotFound);
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED), Unauthorized);
        assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS), RateLimited);
        assert_eq!(classify_status(StatusCode::INTERNAL_SERVER_ERROR), ServerError);
        assert_eq!(classify_status(StatusCode::BAD_GATEWAY), ServerError);
        assert_eq!(classify_status(StatusCode::BAD_REQUEST), HttpError);
        assert_eq!(classify_status(StatusCode::FORBIDDEN), HttpError);
    }

    #[test]
    fn test_terminal_classes() {
        assert!(StatusClass::NotFound.is_terminal());
        assert!(StatusClass::Unauthorized.is_terminal());
        assert!(StatusClass::RateLimited.is_terminal());
        assert!(!StatusClass::ServerError.is_terminal());
        assert!(!StatusClass::HttpError.is_terminal());
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/weather", server.uri());
        let response = fetch_with_retry(&client, &url, &fast_retry()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_not_found_fails_after_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let err = fetch_with_retry(&client, &server.uri(), &fast_retry())
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::CityNotFound));
    }

    #[tokio::test]
    async fn test_unauthorized_and_rate_limit_short_circuit() {
        for status in [401u16, 429] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .expect(1)
                .mount(&server)
                .await;

            let client = Client::new();
            let err = fetch_with_retry(&client, &server.uri(), &fast_retry())
                .await
                .unwrap_err();
            assert!(err.is_terminal(), "status {status} must not be retried");
        }
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let client = Client::new();
        let err = fetch_with_retry(&client, &server.uri(), &fast_retry())
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::ServerError(503)));
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_timeout_is_classified_and_counted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = fetch_with_retry(&client, &server.uri(), &RetryConfig::new(2, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Timeout));
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
