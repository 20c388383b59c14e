use std::fmt;
use std::time::Duration;
use url::Url;

/// HTTP method used for every upstream call
pub const METHOD_GET: &str = "GET";

/// Upstream JSON endpoint. Identity is the URL; the name is only for logs.
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: String,
    url: Url,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }

    pub fn parse(name: impl Into<String>, url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(name, Url::parse(url)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Split the URL into the components used as request labels
    pub fn target(&self) -> RequestTarget {
        RequestTarget {
            scheme: self.url.scheme().to_string(),
            host: self.url.host_str().unwrap_or_default().to_string(),
            port: self
                .url
                .port_or_known_default()
                .map(|p| p.to_string())
                .unwrap_or_default(),
            path: self.url.path().to_string(),
        }
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Endpoint {}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// URL components of a request, as they appear on request metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: String,
    pub host: String,
    pub port: String,
    pub path: String,
}

/// Result of one instrumented call. Only feeds the request counter and
/// latency histogram; never retained.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// HTTP status, `None` when no response was ever obtained
    pub status: Option<u16>,
    pub method: &'static str,
    pub target: RequestTarget,
    pub elapsed: Duration,
}

impl RequestOutcome {
    /// Status label value, `-1` when the call never produced a response
    pub fn status_label(&self) -> String {
        self.status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-1".to_string())
    }
}
