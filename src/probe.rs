//! Client side of the container health check.
//!
//! The image runs `devops-todo healthcheck` on a timer; a zero exit keeps the
//! container healthy, anything else counts towards the unhealthy threshold.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not reach {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no response from {url} within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} answered {status}")]
    BadStatus { url: String, status: StatusCode },

    #[error("{url} returned an unreadable body: {source}")]
    BadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} reports status {status:?}")]
    Unhealthy { url: String, status: String },
}

/// Body returned by the `/health` endpoint. Only `status` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Issues a single GET against `url` and succeeds only on a 2xx whose body
/// reports `"healthy"`.
pub async fn probe(url: &str, timeout: Duration) -> Result<HealthReport, ProbeError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| ProbeError::Unreachable {
            url: url.to_string(),
            source,
        })?;

    let response = client.get(url).send().await.map_err(|source| {
        if source.is_timeout() {
            ProbeError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            ProbeError::Unreachable {
                url: url.to_string(),
                source,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::BadStatus {
            url: url.to_string(),
            status,
        });
    }

    let report: HealthReport = response.json().await.map_err(|source| {
        if source.is_timeout() {
            ProbeError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            ProbeError::BadBody {
                url: url.to_string(),
                source,
            }
        }
    })?;

    if report.status != "healthy" {
        return Err(ProbeError::Unhealthy {
            url: url.to_string(),
            status: report.status,
        });
    }

    Ok(report)
}
