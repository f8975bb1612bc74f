use crate::decode::SegmentPolicy;
use crate::request::endpoint_for_host;
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT};
use crate::token::SeedKey;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "google.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Domain suffix after `translate.`, e.g. `google.com` or `google.co.jp`
    pub host: String,
    /// Wait between attempts
    pub retry_delay: Duration,
    /// Attempts per call, including the first. 0 means default.
    pub max_attempts: u32,
    /// Upper bound for a single HTTP attempt. Zero means default.
    pub timeout: Duration,
    /// Full endpoint URL; overrides `host` when set
    pub endpoint: Option<String>,
    pub seed_key: SeedKey,
    pub segment_policy: SegmentPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            retry_delay: Duration::ZERO,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
            endpoint: None,
            seed_key: SeedKey::DEFAULT,
            segment_policy: SegmentPolicy::default(),
        }
    }
}

impl ClientOptions {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("GTRANSLATE_HOST")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            retry_delay: std::env::var("GTRANSLATE_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::ZERO),
            max_attempts: std::env::var("GTRANSLATE_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            timeout: std::env::var("GTRANSLATE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            endpoint: std::env::var("GTRANSLATE_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            seed_key: std::env::var("GTRANSLATE_SEED_KEY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SeedKey::DEFAULT),
            segment_policy: match std::env::var("GTRANSLATE_SKIP_EMPTY_SEGMENTS").as_deref() {
                Ok("1") | Ok("true") => SegmentPolicy::SkipEmpty,
                _ => SegmentPolicy::StopAtEmpty,
            },
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_seed_key(mut self, seed_key: SeedKey) -> Self {
        self.seed_key = seed_key;
        self
    }

    pub fn with_segment_policy(mut self, policy: SegmentPolicy) -> Self {
        self.segment_policy = policy;
        self
    }

    /// Host with an empty value replaced by the default
    pub fn host(&self) -> &str {
        if self.host.trim().is_empty() {
            DEFAULT_HOST
        } else {
            &self.host
        }
    }

    /// The URL every request is sent to
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => endpoint_for_host(self.host()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.retry_delay).with_timeout(self.timeout)
    }
}
