use crate::error::{Result, TranslateError};
use crate::retry::{with_retry, RetryPolicy};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// GET `url` until it answers 200 or the policy runs out of attempts.
///
/// Non-200 statuses and transport failures are both retried. The body of the
/// first 200 response is returned as-is.
pub async fn fetch(
    client: &reqwest::Client,
    url: &Url,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<Vec<u8>> {
    with_retry(policy, "Translate request", cancel, || async {
        let response = client
            .get(url.clone())
            .timeout(policy.attempt_timeout())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TranslateError::Status(status));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes", body.len());
        Ok(body.to_vec())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn endpoint(server: &MockServer) -> Url {
        Url::parse(&format!("{}/translate_a/single", server.uri())).unwrap()
    }

    // ==================== Success Paths ====================

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[[]]"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetch(
            &reqwest::Client::new(),
            &endpoint(&server),
            &RetryPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(body, b"[[]]");
    }

    #[tokio::test]
    async fn test_fetch_third_attempt_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("third"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetch(
            &reqwest::Client::new(),
            &endpoint(&server),
            &RetryPolicy::new(3, Duration::ZERO),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(body, b"third");
    }

    // ==================== Failure Paths ====================

    #[tokio::test]
    async fn test_fetch_exhausted_with_two_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("third"))
            .expect(0)
            .mount(&server)
            .await;

        let err = fetch(
            &reqwest::Client::new(),
            &endpoint(&server),
            &RetryPolicy::new(2, Duration::ZERO),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        match err {
            TranslateError::RequestExhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(
                    *last,
                    TranslateError::Status(StatusCode::INTERNAL_SERVER_ERROR)
                ));
            }
            other => panic!("expected RequestExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_status_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        let err = fetch(
            &reqwest::Client::new(),
            &endpoint(&server),
            &RetryPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TranslateError::RequestExhausted { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_is_retried_then_exhausted() {
        // Nothing listens on port 9 of localhost in the test environment
        let url = Url::parse("http://127.0.0.1:9/translate_a/single").unwrap();

        let err = fetch(
            &reqwest::Client::new(),
            &url,
            &RetryPolicy::new(2, Duration::ZERO).with_timeout(Duration::from_secs(2)),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        match err {
            TranslateError::RequestExhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, TranslateError::Transport(_)));
            }
            other => panic!("expected RequestExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_attempt_timeout_counts_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let err = fetch(
            &reqwest::Client::new(),
            &endpoint(&server),
            &RetryPolicy::new(2, Duration::ZERO).with_timeout(Duration::from_millis(100)),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TranslateError::RequestExhausted { attempts: 2, .. }));
    }

    // ==================== Cancellation ====================

    #[tokio::test]
    async fn test_fetch_cancelled_mid_request_returns_promptly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let start = std::time::Instant::now();
        let err = fetch(
            &reqwest::Client::new(),
            &endpoint(&server),
            &RetryPolicy::new(3, Duration::from_secs(1)),
            &cancel,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TranslateError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(2));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }
}
