use thiserror::Error;

/// Errors raised while fetching a JSON document from an upstream endpoint
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was obtained, retries included
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body from {url} (status {status}): {source}")]
    Body {
        url: String,
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON from {url} (status {status}): {source}")]
    Decode {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status of the response that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Status { status, .. } | Self::Body { status, .. } | Self::Decode { status, .. } => {
                Some(*status)
            }
        }
    }
}

/// Collector-level failure. Isolated to the collector that raised it.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Unexpected payload from {endpoint}: expected {expected}, got {found}")]
    UnexpectedShape {
        endpoint: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors pushing the metric batch. Always fatal for the run.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("Invalid push gateway address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("Push to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Push gateway rejected batch with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
