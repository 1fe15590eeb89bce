//! Feature-info sources.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use wms_protocol::{FeatureInfoResponse, GetFeatureInfoRequest};

use crate::error::NetworkError;

/// Anything that can answer a GetFeatureInfo request.
#[async_trait]
pub trait FeatureInfoSource: Send + Sync {
    /// Perform one request. Implementations must not retry.
    async fn get_feature_info(
        &self,
        request: &GetFeatureInfoRequest,
    ) -> Result<FeatureInfoResponse, NetworkError>;
}

/// WMS endpoint reached over HTTP.
pub struct HttpFeatureInfoSource {
    client: Client,
    endpoint: String,
}

impl HttpFeatureInfoSource {
    /// `timeout` bounds the whole exchange, body included.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stookwijzer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NetworkError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FeatureInfoSource for HttpFeatureInfoSource {
    async fn get_feature_info(
        &self,
        request: &GetFeatureInfoRequest,
    ) -> Result<FeatureInfoResponse, NetworkError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&request.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received feature info");

        Ok(FeatureInfoResponse::from_json_slice(&body)?)
    }
}
