//! WMS GetFeatureInfo handling
//!
//! Client side of the OGC WMS 1.3.0 GetFeatureInfo operation: building the
//! KVP query for a point lookup and decoding the GeoJSON-style answer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wms_common::crs::AxisOrder;
use wms_common::{BoundingBox, CrsCode};

/// GetFeatureInfo request parameters
#[derive(Debug, Clone)]
pub struct GetFeatureInfoRequest {
    /// Layers to display
    pub layers: Vec<String>,
    /// Layers to query for information
    pub query_layers: Vec<String>,
    /// Coordinate reference system of `bbox`
    pub crs: CrsCode,
    /// Map extent in `crs` units
    pub bbox: BoundingBox,
    /// Map width in pixels
    pub width: u32,
    /// Map height in pixels
    pub height: u32,
    /// Pixel column (X coordinate, 0-based from left)
    pub i: u32,
    /// Pixel row (Y coordinate, 0-based from top)
    pub j: u32,
    /// Response format
    pub info_format: InfoFormat,
    /// Maximum number of features to return
    pub feature_count: Option<u32>,
}

impl GetFeatureInfoRequest {
    /// Query for a single layer, used both as display and query layer.
    pub fn single_layer(layer: impl Into<String>, crs: CrsCode, bbox: BoundingBox) -> Self {
        let layer = layer.into();
        Self {
            layers: vec![layer.clone()],
            query_layers: vec![layer],
            crs,
            bbox,
            width: 256,
            height: 256,
            i: 0,
            j: 0,
            info_format: InfoFormat::Json,
            feature_count: Some(1),
        }
    }

    /// Encode as WMS 1.3.0 KVP pairs, ready to be URL-encoded by the caller.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("service", "WMS".to_string()),
            ("version", "1.3.0".to_string()),
            ("request", "GetFeatureInfo".to_string()),
            ("query_layers", self.query_layers.join(",")),
            ("layers", self.layers.join(",")),
            ("info_format", self.info_format.to_mime().to_string()),
        ];
        if let Some(count) = self.feature_count {
            pairs.push(("feature_count", count.to_string()));
        }
        pairs.extend([
            ("I", self.i.to_string()),
            ("J", self.j.to_string()),
            ("WIDTH", self.width.to_string()),
            ("HEIGHT", self.height.to_string()),
            ("CRS", self.crs.to_string()),
            ("BBOX", self.bbox_param()),
        ]);
        pairs
    }

    /// BBOX value in the axis order WMS 1.3.0 prescribes for `crs`.
    fn bbox_param(&self) -> String {
        match self.crs.axis_order_wms_1_3() {
            AxisOrder::XY => self.bbox.to_wms_string(),
            AxisOrder::LatLon => BoundingBox::new(
                self.bbox.min_y,
                self.bbox.min_x,
                self.bbox.max_y,
                self.bbox.max_x,
            )
            .to_wms_string(),
        }
    }
}

/// GetFeatureInfo response formats the client can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum InfoFormat {
    /// application/json - Machine-readable JSON
    #[serde(rename = "application/json")]
    #[default]
    Json,
}

impl InfoFormat {
    /// Get MIME type string
    pub fn to_mime(&self) -> &'static str {
        match self {
            InfoFormat::Json => "application/json",
        }
    }
}

/// One feature of a JSON GetFeatureInfo answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    /// Flat attribute map as published by the layer
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// GetFeatureInfo JSON response (a GeoJSON FeatureCollection).
///
/// Only `features[].properties` is modelled; geometry, ids and CRS members
/// are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureInfoResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureInfoResponse {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Decode a response body.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Properties of the first feature, if the server returned any.
    pub fn first_properties(&self) -> Option<&Map<String, Value>> {
        self.features.first().map(|f| &f.properties)
    }
}

/// Flatten one attribute value to text.
///
/// Servers are inconsistent about quoting, so every JSON scalar is accepted:
/// strings are trimmed, numbers keep their decimal text, booleans become
/// `"True"`/`"False"` and null becomes the empty string. Arrays and objects
/// are kept as compact JSON.
pub fn attribute_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> GetFeatureInfoRequest {
        let mut req = GetFeatureInfoRequest::single_layer(
            "stookwijzer_v2",
            CrsCode::Epsg28992,
            BoundingBox::from_anchor(155000.0, 463000.0, 10.0),
        );
        req.i = 139;
        req.j = 222;
        req
    }

    #[test]
    fn test_query_pairs() {
        let pairs = sample_request().to_query_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "service",
                "version",
                "request",
                "query_layers",
                "layers",
                "info_format",
                "feature_count",
                "I",
                "J",
                "WIDTH",
                "HEIGHT",
                "CRS",
                "BBOX"
            ]
        );

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("version"), "1.3.0");
        assert_eq!(get("query_layers"), "stookwijzer_v2");
        assert_eq!(get("info_format"), "application/json");
        assert_eq!(get("feature_count"), "1");
        assert_eq!(get("I"), "139");
        assert_eq!(get("J"), "222");
        assert_eq!(get("WIDTH"), "256");
        assert_eq!(get("CRS"), "EPSG:28992");
        assert_eq!(get("BBOX"), "155000,463000,155010,463010");
    }

    #[test]
    fn test_geographic_bbox_is_lat_lon() {
        let mut req = sample_request();
        req.crs = CrsCode::Epsg4326;
        req.bbox = BoundingBox::new(5.1, 52.0, 5.2, 52.1);
        let bbox = req
            .to_query_pairs()
            .into_iter()
            .find(|(k, _)| *k == "BBOX")
            .map(|(_, v)| v)
            .unwrap();
        assert_eq!(bbox, "52,5.1,52.1,5.2");
    }

    #[test]
    fn test_feature_count_omitted_when_unset() {
        let mut req = sample_request();
        req.feature_count = None;
        assert!(req.to_query_pairs().iter().all(|(k, _)| *k != "feature_count"));
    }

    #[test]
    fn test_decode_feature_collection() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "stookwijzer_v2.1",
                "geometry": null,
                "properties": {"pc4": "3511", "wind": 3.24}
            }],
            "crs": null
        });
        let resp = FeatureInfoResponse::from_json_slice(body.to_string().as_bytes()).unwrap();
        let props = resp.first_properties().unwrap();
        assert_eq!(props["pc4"], "3511");
    }

    #[test]
    fn test_decode_without_features() {
        let resp = FeatureInfoResponse::from_json_slice(br#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(resp.first_properties().is_none());

        let resp = FeatureInfoResponse::from_json_slice(br#"{"features":[]}"#).unwrap();
        assert!(resp.first_properties().is_none());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(FeatureInfoResponse::from_json_slice(b"<ServiceExceptionReport/>").is_err());
    }

    #[test]
    fn test_attribute_text() {
        assert_eq!(attribute_text(&json!(" 3511 ")), "3511");
        assert_eq!(attribute_text(&json!(3.24)), "3.24");
        assert_eq!(attribute_text(&json!(4)), "4");
        assert_eq!(attribute_text(&json!(true)), "True");
        assert_eq!(attribute_text(&json!(false)), "False");
        assert_eq!(attribute_text(&Value::Null), "");
    }
}
