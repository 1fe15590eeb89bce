//! Client configuration.
//!
//! Every value has a fixed default matching the RIVM service; the CLI only
//! overrides the endpoint and timeout.

use std::time::Duration;

use projection::RdNew;
use wms_common::BoundingBox;
use wms_protocol::{GetFeatureInfoRequest, InfoFormat};

use crate::location::ProjectedCoordinate;

/// RIVM air-quality WMS.
pub const DEFAULT_ENDPOINT: &str = "https://data.rivm.nl/geo/alo/wms";

/// Layer publishing the wood-burning advisory.
pub const ADVISORY_LAYER: &str = "stookwijzer_v2";

/// Configuration for talking to the feature-info service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WMS endpoint, without query string
    pub endpoint: String,
    /// Layer to display and query
    pub layer: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Queried pixel (I, J) inside the map grid
    pub pixel: (u32, u32),
    /// Map grid size (WIDTH, HEIGHT) in pixels
    pub grid_size: (u32, u32),
    /// Edge length of the query window in RD meters
    pub bbox_size: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            layer: ADVISORY_LAYER.to_string(),
            timeout: Duration::from_secs(10),
            pixel: (139, 222),
            grid_size: (256, 256),
            bbox_size: 10.0,
        }
    }
}

impl ClientConfig {
    /// GetFeatureInfo request for the window anchored on `at`.
    pub fn feature_info_request(&self, at: ProjectedCoordinate) -> GetFeatureInfoRequest {
        let bbox = BoundingBox::from_anchor(at.x, at.y, self.bbox_size);
        let mut request = GetFeatureInfoRequest::single_layer(&self.layer, RdNew::CRS, bbox);
        request.info_format = InfoFormat::Json;
        request.feature_count = Some(1);
        request.i = self.pixel.0;
        request.j = self.pixel.1;
        request.width = self.grid_size.0;
        request.height = self.grid_size.1;
        request
    }
}
