use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::OrderRecord;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed url: {0}")]
    Url(#[from] url::ParseError),
    #[error("feed request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("feed body did not decode as an order array: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Read side of the host boundary: one snapshot of the active orders per
/// call. Refresh cadence is the caller's policy.
#[async_trait]
pub trait OrderFeed: Send + Sync {
    async fn fetch_active(&self) -> Result<Vec<OrderRecord>, FeedError>;
}

/// Feed client for hosts exposing the plain JSON read endpoint.
pub struct HttpOrderFeed {
    http: Client,
    endpoint: Url,
}

impl HttpOrderFeed {
    pub fn new(base_url: &str) -> Result<Self, FeedError> {
        let endpoint = Url::parse(base_url)?.join("api/orders/active")?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderFeed for HttpOrderFeed {
    async fn fetch_active(&self) -> Result<Vec<OrderRecord>, FeedError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FeedError::Transport)?;
        response.json().await.map_err(FeedError::Decode)
    }
}
