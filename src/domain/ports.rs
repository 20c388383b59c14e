use crate::domain::errors::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Decoded upstream response
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Value,
}

/// Source of JSON documents fetched with GET.
///
/// Retries are an implementation concern: callers only see the final outcome.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<JsonResponse, FetchError>;
}
