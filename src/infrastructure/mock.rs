use crate::domain::errors::FetchError;
use crate::domain::ports::{JsonResponse, JsonSource};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

#[derive(Debug, Clone)]
enum MockReply {
    Json(Value),
    Status(u16),
    Raw(String),
    Unreachable,
}

/// Scripted [`JsonSource`] keyed by URL. Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct MockJsonSource {
    replies: HashMap<String, MockReply>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockJsonSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.replies.insert(url.to_string(), MockReply::Json(body));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.replies.insert(url.to_string(), MockReply::Status(status));
        self
    }

    /// Serve `text` with status 200, decoded like a real response body
    pub fn with_raw(mut self, url: &str, text: &str) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Raw(text.to_string()));
        self
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), MockReply::Unreachable);
        self
    }

    /// Number of `get_json` calls made for `url`
    pub fn calls(&self, url: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(url).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl JsonSource for MockJsonSource {
    async fn get_json(&self, url: &Url) -> Result<JsonResponse, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(url.to_string()).or_insert(0) += 1;
        }

        match self.replies.get(url.as_str()) {
            Some(MockReply::Json(body)) => Ok(JsonResponse {
                status: 200,
                body: body.clone(),
            }),
            Some(MockReply::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(MockReply::Raw(text)) => serde_json::from_str(text)
                .map(|body| JsonResponse { status: 200, body })
                .map_err(|source| FetchError::Decode {
                    url: url.to_string(),
                    status: 200,
                    source,
                }),
            Some(MockReply::Unreachable) => Err(FetchError::Transport {
                url: url.to_string(),
                source: reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                    "connection refused"
                )),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
