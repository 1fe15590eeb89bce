//! Common test fixtures for stookwijzer tests.
//!
//! Attribute sets mirror what the RIVM `stookwijzer_v2` layer returns for a
//! single postal area.

use serde_json::{json, Value};

/// Geographic test sites as (lat, lon).
pub mod sites {
    /// The hard-coded site the CLI queries by default (Utrecht).
    pub const UTRECHT: (f64, f64) = (52.089770561127374, 5.109876746789877);

    /// RD New projection origin near Amersfoort.
    pub const AMERSFOORT_REFERENCE: (f64, f64) = (52.15517440, 5.38720621);

    /// Well outside the Netherlands.
    pub const PARIS: (f64, f64) = (48.8566, 2.3522);
}

/// Model run used by [`advisory_properties`].
pub const MODEL_RUNTIME: &str = "01-01-2024 12:00";

/// A complete attribute set: yellow, orange, red and a missing 18h advisory.
pub fn advisory_properties() -> Value {
    json!({
        "pc4": "3511",
        "wind_bft": "3",
        "wind": "4.26",
        "lki": "2",
        "model_runtime": MODEL_RUNTIME,
        "advies_0": "0",
        "advies_6": "1",
        "advies_12": "2",
        "definitief_0": "True",
        "definitief_6": "True",
        "definitief_12": "False",
        "definitief_18": "False"
    })
}

/// Same as [`advisory_properties`] with `key` removed.
pub fn advisory_properties_without(key: &str) -> Value {
    let mut props = advisory_properties();
    if let Some(map) = props.as_object_mut() {
        map.remove(key);
    }
    props
}

/// Same as [`advisory_properties`] with `key` replaced by `value`.
pub fn advisory_properties_with(key: &str, value: Value) -> Value {
    let mut props = advisory_properties();
    if let Some(map) = props.as_object_mut() {
        map.insert(key.to_string(), value);
    }
    props
}

/// Wrap a property set in a GeoJSON FeatureCollection the way GeoServer does.
pub fn feature_collection(properties: Value) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "id": "stookwijzer_v2.fid-1",
            "geometry": null,
            "properties": properties
        }],
        "totalFeatures": "unknown",
        "numberReturned": 1,
        "crs": null
    })
}

/// A FeatureCollection with no features (query outside the layer extent).
pub fn empty_feature_collection() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [],
        "totalFeatures": "unknown",
        "numberReturned": 0,
        "crs": null
    })
}
