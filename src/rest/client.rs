//! ballchasing REST API client implementation.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use tracing::{debug, error, info, warn};

use crate::auth::ApiKey;
use crate::error::BallchasingError;
use crate::rate_limit::{self, EndpointFamily};
use crate::rest::endpoints::{BALLCHASING_BASE_URL, PING, REPLAYS};
use crate::rest::types::PingResponse;
use crate::types::Tier;

/// Number of consecutive 429/500 responses after which a session gives up.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 10;

/// Backoff before the first retry, in seconds; doubles per further failure.
const BACKOFF_BASE_SECS: f64 = 0.5;

/// An established session with the ballchasing REST API.
///
/// The client self-identifies its Patreon tier once, at construction, by
/// probing the identity endpoint. Every subsequent request goes through
/// [`call`](ReplayApiClient::call), which attaches the credential, absorbs
/// transient 429/500 failures with exponential backoff, and sleeps the
/// caller-computed rate-limit delay after each request.
///
/// Rate compliance is an aggregate wall-clock contract, so the call path is
/// strictly serial: methods take `&mut self` and the session is owned by one
/// fetch operation at a time, never shared.
///
/// # Example
///
/// ```rust,no_run
/// use ballchasing_api_client::rest::ReplayApiClient;
/// use ballchasing_api_client::rate_limit::EndpointFamily;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = ReplayApiClient::establish("my-api-key".into()).await?;
///     println!("tier: {}", client.tier());
///
///     let delay = client.delay_for(EndpointFamily::ReplayDetail, 1);
///     let replay = client.get_replay("1d1c6040-92d1-481b-a059", delay).await?;
///     println!("{replay}");
///     Ok(())
/// }
/// ```
pub struct ReplayApiClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    tier: Tier,
    consecutive_failures: u32,
}

impl ReplayApiClient {
    /// Establish a session against the production API.
    ///
    /// Equivalent to `ReplayApiClient::builder().api_key(key).establish()`.
    pub async fn establish(api_key: ApiKey) -> Result<Self, BallchasingError> {
        Self::builder().api_key(api_key).establish().await
    }

    /// Create a new client builder.
    pub fn builder() -> ReplayApiClientBuilder {
        ReplayApiClientBuilder::new()
    }

    /// The Patreon tier reported by the identity probe.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Current consecutive 429/500 count for this session.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Compute the legal inter-call delay for a batch of `planned_calls`
    /// requests to one endpoint family, at this session's tier.
    ///
    /// The decision is made once per batch; see [`crate::rate_limit`].
    pub fn delay_for(&self, family: EndpointFamily, planned_calls: usize) -> Duration {
        rate_limit::delay_for(family, self.tier, planned_calls)
    }

    /// Issue one authenticated GET, sleeping `delay` afterwards.
    ///
    /// 429 and 500 responses are retried in place: the base delay is slept
    /// anyway (the rate-limit contract holds even for failed calls), then an
    /// exponential backoff of `0.5 * 2^(failures - 1)` seconds on top. The
    /// failure counter is cumulative across the whole session, resets on any
    /// success, and aborts with [`BallchasingError::RateServer`] when it
    /// reaches [`MAX_CONSECUTIVE_FAILURES`]. Any other non-200 status is
    /// treated as non-transient and fails immediately.
    pub async fn call<T>(&mut self, url: &str, delay: Duration) -> Result<T, BallchasingError>
    where
        T: serde::de::DeserializeOwned,
    {
        loop {
            let response = self.http_client.get(url).send().await?;
            let status = response.status().as_u16();

            match status {
                200 => {
                    self.consecutive_failures = 0;
                    debug!(url, status, "call succeeded");
                    tokio::time::sleep(delay).await;
                    return Ok(response.json::<T>().await?);
                },
                429 | 500 => {
                    self.consecutive_failures += 1;
                    if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                        error!(url, status, "retry budget exhausted, failing");
                        return Err(BallchasingError::RateServer { status });
                    }
                    warn!(
                        url,
                        status,
                        failures = self.consecutive_failures,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    tokio::time::sleep(backoff_delay(self.consecutive_failures)).await;
                },
                status => {
                    error!(url, status, "non-transient status, failing");
                    return Err(BallchasingError::Connection { status });
                },
            }
        }
    }

    /// Look up a single replay by id through the rate-limited call path.
    ///
    /// Callers computing `delay` should use [`EndpointFamily::ReplayDetail`].
    pub async fn get_replay(
        &mut self,
        replay_id: &str,
        delay: Duration,
    ) -> Result<serde_json::Value, BallchasingError> {
        let url = format!("{}{}/{}", self.base_url, REPLAYS, replay_id);
        self.call(&url, delay).await
    }
}

impl std::fmt::Debug for ReplayApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayApiClient")
            .field("base_url", &self.base_url)
            .field("tier", &self.tier)
            .field("consecutive_failures", &self.consecutive_failures)
            .finish()
    }
}

/// Exponential backoff for the given consecutive-failure count (1-based).
pub(crate) fn backoff_delay(failures: u32) -> Duration {
    Duration::from_secs_f64(BACKOFF_BASE_SECS * 2f64.powi(failures as i32 - 1))
}

/// Builder for [`ReplayApiClient`].
pub struct ReplayApiClientBuilder {
    api_key: Option<ApiKey>,
    base_url: String,
    user_agent: Option<String>,
}

impl ReplayApiClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: BALLCHASING_BASE_URL.to_string(),
            user_agent: None,
        }
    }

    /// Set the API key (required).
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the HTTP client and probe the identity endpoint.
    ///
    /// The probe is not retried: any status other than 200 means the tier
    /// cannot be assumed and the session fails with
    /// [`BallchasingError::Connection`].
    pub async fn establish(self) -> Result<ReplayApiClient, BallchasingError> {
        let api_key = self
            .api_key
            .ok_or_else(|| BallchasingError::Validation("an API key is required".to_string()))?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("ballchasing-api-client/{}", env!("CARGO_PKG_VERSION")));
        let user_agent_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("ballchasing-api-client"));
        headers.insert(USER_AGENT, user_agent_value);

        let mut auth_value = HeaderValue::from_str(api_key.expose()).map_err(|_| {
            BallchasingError::Validation("API key contains invalid header characters".to_string())
        })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let reqwest_client = reqwest::Client::builder().default_headers(headers).build()?;
        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let ping_url = format!("{}{}", self.base_url, PING);
        let response = http_client.get(&ping_url).send().await?;
        let status = response.status().as_u16();
        debug!(url = %ping_url, status, "identity probe");

        if status != 200 {
            error!(status, "identity probe failed");
            return Err(BallchasingError::Connection { status });
        }

        let ping: PingResponse = response.json().await?;
        info!(tier = %ping.tier, "established session with ballchasing.com API");

        Ok(ReplayApiClient {
            http_client,
            base_url: self.base_url,
            tier: ping.tier,
            consecutive_failures: 0,
        })
    }
}

impl Default for ReplayApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
