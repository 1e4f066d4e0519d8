//! Ordered failover over candidate URLs.
//!
//! One request per candidate, in order, until one yields a decodable body.
//! Transport errors, non-2xx statuses, and undecodable bodies all count as a
//! failure of that candidate; the next one is tried. No retries of the same
//! candidate and no backoff.

use serde::de::DeserializeOwned;
use std::fmt;

use crate::http::{Request, Transport};

/// Why a single candidate failed.
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    /// Curl reported an error (timeout, connection, DNS, ...).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// 2xx response whose body was not the expected JSON.
    #[error("undecodable body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Coarse classification of a candidate failure, for logs and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused, DNS, reset).
    Connection,
    /// Relay or API asked us to slow down (429, 503).
    Throttled,
    /// Other 4xx/5xx status.
    Status(u16),
    /// Body did not decode.
    Decode,
    /// Anything else.
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => f.write_str("timeout"),
            FailureKind::Connection => f.write_str("connection"),
            FailureKind::Throttled => f.write_str("throttled"),
            FailureKind::Status(code) => write!(f, "status {code}"),
            FailureKind::Decode => f.write_str("decode"),
            FailureKind::Other => f.write_str("other"),
        }
    }
}

/// Classify an HTTP status code.
pub fn classify_http_status(code: u32) -> FailureKind {
    match code {
        429 | 503 => FailureKind::Throttled,
        100..=599 => FailureKind::Status(code as u16),
        _ => FailureKind::Other,
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

/// Classify a candidate error.
pub fn classify(e: &CandidateError) -> FailureKind {
    match e {
        CandidateError::Transport(ce) => classify_curl_error(ce),
        CandidateError::Http(code) => classify_http_status(*code),
        CandidateError::Decode(_) => FailureKind::Decode,
    }
}

/// One failed attempt.
#[derive(Debug)]
pub struct CandidateFailure {
    pub url: String,
    pub kind: FailureKind,
    pub error: CandidateError,
}

/// Result of walking the candidate list.
#[derive(Debug)]
pub enum FailoverOutcome<T> {
    /// First candidate that produced a decodable body.
    Success {
        /// Index into the candidate list.
        index: usize,
        data: T,
        /// Failures of the candidates tried before it.
        skipped: Vec<CandidateFailure>,
    },
    /// Every candidate failed.
    Exhausted { failures: Vec<CandidateFailure> },
}

impl<T> FailoverOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FailoverOutcome::Success { .. })
    }

    /// Decoded data of a successful outcome.
    pub fn into_data(self) -> Option<T> {
        match self {
            FailoverOutcome::Success { data, .. } => Some(data),
            FailoverOutcome::Exhausted { .. } => None,
        }
    }
}

/// Fetch and decode one candidate.
fn attempt<T, R>(transport: &R, url: &str, headers: &[(String, String)]) -> Result<T, CandidateError>
where
    T: DeserializeOwned,
    R: Transport + ?Sized,
{
    let resp = transport.get(&Request::get(url).with_headers(headers))?;
    if !resp.is_success() {
        return Err(CandidateError::Http(resp.status));
    }
    Ok(serde_json::from_slice(&resp.body)?)
}

/// Walk `candidates` in order and stop at the first decodable JSON body.
pub fn fetch_first<T, R>(
    transport: &R,
    candidates: &[String],
    headers: &[(String, String)],
) -> FailoverOutcome<T>
where
    T: DeserializeOwned,
    R: Transport + ?Sized,
{
    let mut failures = Vec::new();
    for (index, url) in candidates.iter().enumerate() {
        tracing::debug!(candidate = index, %url, "requesting candidate");
        match attempt::<T, R>(transport, url, headers) {
            Ok(data) => {
                if !failures.is_empty() {
                    tracing::info!(candidate = index, "candidate succeeded after {} failure(s)", failures.len());
                }
                return FailoverOutcome::Success {
                    index,
                    data,
                    skipped: failures,
                };
            }
            Err(error) => {
                let kind = classify(&error);
                tracing::warn!(candidate = index, %url, %kind, "candidate failed: {}", error);
                failures.push(CandidateFailure {
                    url: url.clone(),
                    kind,
                    error,
                });
            }
        }
    }
    tracing::warn!("all {} candidate(s) failed", candidates.len());
    FailoverOutcome::Exhausted { failures }
}
