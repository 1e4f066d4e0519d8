//! Candidate URL resolution: direct on a local origin, relayed otherwise.
//!
//! The order is static. Every call recomputes the same sequence; nothing is
//! remembered about which relay answered last.

/// Placeholder in relay templates that receives the encoded target URL.
pub const URL_PLACEHOLDER: &str = "{url}";

const LOCAL_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "::1", "0.0.0.0"];

/// Where the client considers itself to be running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Trusted development host: the API is called directly.
    Local,
    /// Anything else: requests go through the relays.
    Remote(String),
}

impl Origin {
    /// Classify an origin string such as `http://localhost:8080`.
    ///
    /// An origin without a host (e.g. `file://`) is local. Unparseable input is remote.
    pub fn parse(origin: &str) -> Self {
        match url::Url::parse(origin.trim()) {
            Ok(u) => match u.host_str() {
                None => Origin::Local,
                Some(h) => {
                    let host = h.trim_start_matches('[').trim_end_matches(']');
                    if host.is_empty() || LOCAL_HOSTS.iter().any(|l| l.eq_ignore_ascii_case(host)) {
                        Origin::Local
                    } else {
                        Origin::Remote(host.to_string())
                    }
                }
            },
            Err(_) => Origin::Remote(origin.trim().to_string()),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Origin::Local)
    }
}

/// Builds candidate URLs for API requests.
#[derive(Debug, Clone)]
pub struct ProxyResolver {
    base_url: String,
    origin: Origin,
    relays: Vec<String>,
}

impl ProxyResolver {
    pub fn new(base_url: &str, origin: Origin, relays: Vec<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            origin,
            relays,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Direct target URL for `path` and an already-encoded query string.
    pub fn direct_url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    /// Ordered, non-empty list of URLs to attempt, most preferred first.
    pub fn candidates(&self, path: &str, query: &str) -> Vec<String> {
        let target = self.direct_url(path, query);
        if self.origin.is_local() || self.relays.is_empty() {
            return vec![target];
        }
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.relays
            .iter()
            .map(|template| wrap(template, &encoded))
            .collect()
    }
}

/// Embed the encoded target into a relay template. Templates without the
/// placeholder get the target appended.
fn wrap(template: &str, encoded_target: &str) -> String {
    if template.contains(URL_PLACEHOLDER) {
        template.replace(URL_PLACEHOLDER, encoded_target)
    } else {
        format!("{}{}", template, encoded_target)
    }
}
