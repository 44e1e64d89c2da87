//! Health check probe logic.
//!
//! Performs retry-bounded HTTP checks against endpoint descriptors and
//! classifies the result as UP or DOWN.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use beacon_core::Endpoint;

use crate::error::ProbeError;

/// Classification of a single health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// 2xx response within the latency threshold.
    Up,
    /// Any other response, or every attempt failed at the transport level.
    Down,
}

impl HealthStatus {
    pub fn is_up(self) -> bool {
        self == HealthStatus::Up
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Up => f.write_str("UP"),
            HealthStatus::Down => f.write_str("DOWN"),
        }
    }
}

/// Retry and timing parameters for a prober.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Upper bound on requests issued per check.
    pub max_attempts: u32,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Pause between consecutive attempts after a transport error.
    pub retry_delay: Duration,
    /// Responses must arrive strictly faster than this to count as UP.
    pub latency_threshold: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            timeout: Duration::from_secs(5),
            retry_delay: Duration::from_secs(1),
            latency_threshold: Duration::from_millis(500),
        }
    }
}

impl ProbeConfig {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_latency_threshold(mut self, latency_threshold: Duration) -> Self {
        self.latency_threshold = latency_threshold;
        self
    }
}

/// Detailed result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: HealthStatus,
    /// Number of requests issued, including the final one.
    pub attempts: u32,
    /// Latency of the completed response, if any.
    pub latency: Option<Duration>,
    /// Status code of the completed response, if any.
    pub status_code: Option<u16>,
}

/// Something that can classify an endpoint as UP or DOWN.
///
/// Implementations never fail: every path resolves to a status.
pub trait Probe {
    fn probe(&self, endpoint: &Endpoint) -> impl Future<Output = HealthStatus> + Send;
}

/// Probes endpoints over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    config: ProbeConfig,
}

impl HttpProber {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        if config.max_attempts == 0 {
            return Err(ProbeError::NoAttempts);
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("beacon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run one retry-bounded check.
    ///
    /// A completed response is final whatever its status; only transport
    /// errors are retried.
    pub async fn check(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let max_attempts = self.config.max_attempts;
        let mut attempt = 0;

        while attempt < max_attempts {
            attempt += 1;

            match self.send(endpoint).await {
                Ok((code, latency)) => {
                    let healthy = (200..300).contains(&code) && latency < self.config.latency_threshold;
                    let status = if healthy { HealthStatus::Up } else { HealthStatus::Down };
                    debug!(
                        endpoint = %endpoint.name,
                        url = %endpoint.url,
                        code,
                        latency_ms = latency.as_millis() as u64,
                        %status,
                        "health check completed"
                    );
                    return ProbeOutcome {
                        status,
                        attempts: attempt,
                        latency: Some(latency),
                        status_code: Some(code),
                    };
                }
                Err(e) => {
                    // `{:#}` renders the whole source chain (refused, DNS, timeout).
                    let error = anyhow::Error::new(e);
                    warn!(
                        attempt,
                        max_attempts,
                        endpoint = %endpoint.name,
                        url = %endpoint.url,
                        error = %format_args!("{error:#}"),
                        "request failed"
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        ProbeOutcome {
            status: HealthStatus::Down,
            attempts: attempt,
            latency: None,
            status_code: None,
        }
    }

    /// Issue one request and read the full body.
    ///
    /// Returns the status code and the wall-clock latency.
    async fn send(&self, endpoint: &Endpoint) -> Result<(u16, Duration), reqwest::Error> {
        let mut request = self
            .client
            .request(endpoint.method.clone(), &endpoint.url)
            .timeout(self.config.timeout);
        for (name, value) in &endpoint.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &endpoint.body {
            request = request.body(body.clone());
        }

        let started = Instant::now();
        let response = request.send().await?;
        let code = response.status().as_u16();
        response.bytes().await?;

        Ok((code, started.elapsed()))
    }
}

impl Probe for HttpProber {
    async fn probe(&self, endpoint: &Endpoint) -> HealthStatus {
        self.check(endpoint).await.status
    }
}

/// Parse a duration string like "5s", "500ms", "1m".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
