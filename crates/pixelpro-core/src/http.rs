//! HTTP GET transport.
//!
//! Uses the curl crate (libcurl) with one easy handle per request. The
//! [`Transport`] trait is the seam the failover policy and downloads go
//! through, so both can run against scripted responses in tests.

use std::time::Duration;

use crate::config::HttpConfig;

/// Status and body of a completed request (any status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parameters of one GET.
#[derive(Debug, Clone, Default)]
pub struct Request<'a> {
    pub url: &'a str,
    /// Extra headers as (name, value).
    pub headers: &'a [(String, String)],
    /// Overrides the transport's default total timeout.
    pub timeout: Option<Duration>,
}

impl<'a> Request<'a> {
    pub fn get(url: &'a str) -> Self {
        Self {
            url,
            headers: &[],
            timeout: None,
        }
    }

    pub fn with_headers(mut self, headers: &'a [(String, String)]) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Something that can perform a blocking GET.
///
/// Transport-level failures (DNS, connect, timeout, ...) are `Err`; any HTTP
/// status, including errors, is `Ok`.
pub trait Transport {
    fn get(&self, request: &Request<'_>) -> Result<HttpResponse, curl::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &Request<'_>) -> Result<HttpResponse, curl::Error> {
        (**self).get(request)
    }
}

/// libcurl-backed transport.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            connect_timeout: http.connect_timeout(),
            timeout: http.timeout(),
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl Transport for CurlTransport {
    /// Follows redirects. Runs in the current thread.
    fn get(&self, request: &Request<'_>) -> Result<HttpResponse, curl::Error> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(request.url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(request.timeout.unwrap_or(self.timeout))?;

        // Build curl list for custom headers (e.g. "Name: value").
        let mut list = curl::easy::List::new();
        for (k, v) in request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !request.headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::trace!(url = request.url, status, bytes = body.len(), "GET done");
        Ok(HttpResponse { status, body })
    }
}
