use crate::config::ClientOptions;
use crate::decode::{decode_with, SegmentPolicy, TranslationResult};
use crate::error::{Result, TranslateError};
use crate::fetch::fetch;
use crate::request::{build_url, TranslationRequest};
use crate::retry::RetryPolicy;
use crate::token::SeedKey;
use crate::tongue::Tongue;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Client for the translate endpoint.
///
/// Holds only immutable configuration and a shared [`reqwest::Client`], so one
/// instance can be cloned or shared across tasks and used concurrently.
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    endpoint: String,
    policy: RetryPolicy,
    seed_key: SeedKey,
    segment_policy: SegmentPolicy,
}

impl Translator {
    /// Build a translator with its own HTTP client using the configured timeout.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let policy = options.retry_policy();
        let client = reqwest::Client::builder()
            .timeout(policy.attempt_timeout())
            .build()
            .map_err(TranslateError::Transport)?;
        Ok(Self::with_client(client, options))
    }

    /// Build a translator around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, options: ClientOptions) -> Self {
        Self {
            client,
            endpoint: options.endpoint(),
            policy: options.retry_policy(),
            seed_key: options.seed_key,
            segment_policy: options.segment_policy,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Translate `text` from `from` into `to`.
    pub async fn run(&self, text: &str, from: &Tongue, to: &Tongue) -> Result<TranslationResult> {
        self.run_with_cancel(text, from, to, &CancellationToken::new())
            .await
    }

    /// Like [`Translator::run`], aborting as soon as `cancel` fires.
    pub async fn run_with_cancel(
        &self,
        text: &str,
        from: &Tongue,
        to: &Tongue,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult> {
        let request = TranslationRequest::new(text, from.clone(), to.clone());
        self.translate_with_cancel(&request, cancel).await
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        self.translate_with_cancel(request, &CancellationToken::new())
            .await
    }

    pub async fn translate_with_cancel(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult> {
        let url = build_url(&self.endpoint, request, &self.seed_key)?;
        let body = fetch(&self.client, &url, &self.policy, cancel).await?;
        let result = decode_with(&body, self.segment_policy)?;

        debug!(
            "Translated {} -> {} ({} -> {} chars)",
            result.request_tongue,
            result.response_tongue,
            request.text.chars().count(),
            result.response_text.chars().count()
        );

        Ok(result)
    }
}
