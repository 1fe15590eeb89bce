//! Fetch-and-expand pipeline.

use tracing::{error, info, instrument};
use wms_protocol::GetFeatureInfoRequest;

use crate::config::ClientConfig;
use crate::error::{AdvisoryError, NetworkError};
use crate::forecast::{build_forecast, Forecast};
use crate::location::GeoCoordinate;
use crate::snapshot::AdvisorySnapshot;
use crate::source::{FeatureInfoSource, HttpFeatureInfoSource};

/// Produces advisory forecasts for single locations.
///
/// Holds no state between calls: each [`AdvisoryService::fetch_forecast`]
/// makes exactly one source request and either returns all four records or
/// fails.
pub struct AdvisoryService<S = HttpFeatureInfoSource> {
    source: S,
    config: ClientConfig,
}

impl AdvisoryService<HttpFeatureInfoSource> {
    /// Service backed by the configured HTTP endpoint.
    pub fn from_config(config: ClientConfig) -> Result<Self, AdvisoryError> {
        let source = HttpFeatureInfoSource::new(config.endpoint.clone(), config.timeout)?;
        Ok(Self::new(source, config))
    }
}

impl<S: FeatureInfoSource> AdvisoryService<S> {
    pub fn new(source: S, config: ClientConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The request that [`AdvisoryService::fetch_snapshot`] sends for `location`.
    pub fn request_for(&self, location: GeoCoordinate) -> GetFeatureInfoRequest {
        self.config.feature_info_request(location.project())
    }

    /// Query the source and read the first feature's attributes.
    pub async fn fetch_snapshot(
        &self,
        location: GeoCoordinate,
    ) -> Result<AdvisorySnapshot, AdvisoryError> {
        let request = self.request_for(location);
        info!(bbox = %request.bbox.to_wms_string(), "Querying advisory layer");

        let response = self.source.get_feature_info(&request).await?;
        let props = response
            .first_properties()
            .ok_or(NetworkError::NoFeatures)?;

        Ok(AdvisorySnapshot::from_properties(props))
    }

    /// Fetch the snapshot for `location` and expand it into a forecast.
    ///
    /// Failures are logged here; callers only need to skip their output.
    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn fetch_forecast(&self, location: GeoCoordinate) -> Result<Forecast, AdvisoryError> {
        let result = match self.fetch_snapshot(location).await {
            Ok(snapshot) => build_forecast(location, &snapshot),
            Err(e) => Err(e),
        };

        match &result {
            Ok(forecast) => info!(records = forecast.len(), "Built advisory forecast"),
            Err(e) if e.is_timeout() => {
                error!(timeout = ?self.config.timeout, "Advisory request timed out")
            }
            Err(e) => error!(error = %e, "Failed to build advisory forecast"),
        }

        result
    }
}
