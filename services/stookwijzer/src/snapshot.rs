//! Typed view of one feature-info attribute set.
//!
//! The layer publishes flat, loosely typed attributes. Each one is read
//! exactly once here, with its absent-value default fixed per field:
//!
//! | attribute             | field               | when absent |
//! |-----------------------|---------------------|-------------|
//! | `pc4`                 | `postal_area`       | `""`        |
//! | `wind_bft`            | `wind_force`        | `""`        |
//! | `wind`                | `wind_speed_ms`     | `None`      |
//! | `lki`                 | `air_quality_index` | `""`        |
//! | `model_runtime`       | `model_runtime`     | `None`      |
//! | `advies_<h>`          | `advice[..].level`  | `Unknown`   |
//! | `definitief_<h>`      | `advice[..].is_final` | `false`   |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;
use wms_protocol::attribute_text;

/// Forecast offsets in hours from the model run.
pub const FORECAST_OFFSETS: [u32; 4] = [0, 6, 12, 18];

/// Advisory colour code.
///
/// Serialized with the labels used in the CSV output; `Unknown` is an empty
/// cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AdvisoryLevel {
    #[serde(rename = "code_yellow")]
    Yellow,
    #[serde(rename = "code_orange")]
    Orange,
    #[serde(rename = "code_red")]
    Red,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl AdvisoryLevel {
    /// Map the layer's raw code ("0", "1", "2").
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => AdvisoryLevel::Yellow,
            "1" => AdvisoryLevel::Orange,
            "2" => AdvisoryLevel::Red,
            _ => AdvisoryLevel::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdvisoryLevel::Yellow => "code_yellow",
            AdvisoryLevel::Orange => "code_orange",
            AdvisoryLevel::Red => "code_red",
            AdvisoryLevel::Unknown => "",
        }
    }
}

/// Advisory for one forecast offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetAdvice {
    pub hours: u32,
    pub level: AdvisoryLevel,
    /// Whether the advisory is final rather than provisional.
    pub is_final: bool,
}

/// The attribute set returned for one location and one model run.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorySnapshot {
    /// Four-digit postal area code
    pub postal_area: String,
    /// Wind force on the Beaufort scale, as published
    pub wind_force: String,
    /// Wind speed in m/s, rounded to one decimal
    pub wind_speed_ms: Option<f64>,
    /// Air quality index, as published
    pub air_quality_index: String,
    /// Raw model run timestamp, `None` when absent or blank
    pub model_runtime: Option<String>,
    /// One entry per [`FORECAST_OFFSETS`] element, in the same order
    pub advice: [OffsetAdvice; 4],
}

impl AdvisorySnapshot {
    pub fn from_properties(props: &Map<String, Value>) -> Self {
        let text = |key: &str| props.get(key).map(attribute_text).unwrap_or_default();

        let advice = FORECAST_OFFSETS.map(|hours| OffsetAdvice {
            hours,
            level: AdvisoryLevel::from_code(&text(&format!("advies_{}", hours))),
            is_final: text(&format!("definitief_{}", hours)) == "True",
        });

        let model_runtime = Some(text("model_runtime")).filter(|s| !s.is_empty());

        Self {
            postal_area: text("pc4"),
            wind_force: text("wind_bft"),
            wind_speed_ms: parse_wind_speed(&text("wind")),
            air_quality_index: text("lki"),
            model_runtime,
            advice,
        }
    }
}

fn parse_wind_speed(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(round_one_decimal(v)),
        Err(_) => {
            warn!(wind = raw, "Ignoring unparseable wind speed");
            None
        }
    }
}

// Rounds the exact binary value, ties to even: 2.25 -> 2.2, 0.15 -> 0.1.
fn round_one_decimal(v: f64) -> f64 {
    format!("{:.1}", v).parse().unwrap_or(v)
}
