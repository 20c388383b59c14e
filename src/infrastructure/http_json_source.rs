use crate::domain::errors::FetchError;
use crate::domain::ports::{JsonResponse, JsonSource};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// [`JsonSource`] backed by the retrying HTTP client
#[derive(Clone)]
pub struct HttpJsonSource {
    client: ClientWithMiddleware,
}

impl HttpJsonSource {
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonSource for HttpJsonSource {
    async fn get_json(&self, url: &Url) -> Result<JsonResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            status: status.as_u16(),
            source,
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            status: status.as_u16(),
            source,
        })?;

        debug!("GET {} -> {} ({} bytes)", url, status, text.len());

        Ok(JsonResponse {
            status: status.as_u16(),
            body,
        })
    }
}
