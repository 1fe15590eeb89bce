//! Expansion of one snapshot into a forecast sequence.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wms_common::time::{parse_local, ValidTime, MODEL_RUNTIME_FORMAT};

use crate::error::AdvisoryError;
use crate::location::GeoCoordinate;
use crate::snapshot::{AdvisoryLevel, AdvisorySnapshot};

/// Zone the model run timestamps are published in.
pub const FORECAST_TIMEZONE: Tz = chrono_tz::Europe::Amsterdam;

/// One forecast row.
///
/// Field order and renames define the CSV columns:
/// `model_runtime, lat, lon, datetime, pc4, advies, wind_bft, wind_ms, lki, final`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Written back in zero-padded `dd-mm-YYYY HH:MM` form, whatever padding
    /// the layer served.
    #[serde(with = "model_runtime_format")]
    pub model_runtime: DateTime<Tz>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "datetime", with = "rfc3339_format")]
    pub timestamp: DateTime<Tz>,
    #[serde(rename = "pc4")]
    pub postal_area: String,
    #[serde(rename = "advies")]
    pub advisory_level: AdvisoryLevel,
    #[serde(rename = "wind_bft")]
    pub wind_force: String,
    #[serde(rename = "wind_ms")]
    pub wind_speed_ms: Option<f64>,
    #[serde(rename = "lki")]
    pub air_quality_index: String,
    #[serde(rename = "final", with = "title_case_bool")]
    pub is_final: bool,
}

/// Exactly one record per forecast offset, in offset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    records: Vec<ForecastRecord>,
}

impl Forecast {
    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ForecastRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build the forecast for `location` from a fetched snapshot.
///
/// Fails without producing any record when the model run is missing or
/// cannot be placed in [`FORECAST_TIMEZONE`].
pub fn build_forecast(
    location: GeoCoordinate,
    snapshot: &AdvisorySnapshot,
) -> Result<Forecast, AdvisoryError> {
    let raw = snapshot
        .model_runtime
        .as_deref()
        .ok_or(AdvisoryError::MissingModelRun)?;
    let model_runtime = parse_local(raw, MODEL_RUNTIME_FORMAT, FORECAST_TIMEZONE)?;

    let records = snapshot
        .advice
        .iter()
        .map(|advice| ForecastRecord {
            model_runtime,
            latitude: location.latitude,
            longitude: location.longitude,
            timestamp: ValidTime::new(model_runtime, advice.hours).valid_datetime(),
            postal_area: snapshot.postal_area.clone(),
            advisory_level: advice.level,
            wind_force: snapshot.wind_force.clone(),
            wind_speed_ms: snapshot.wind_speed_ms,
            air_quality_index: snapshot.air_quality_index.clone(),
            is_final: advice.is_final,
        })
        .collect();

    Ok(Forecast { records })
}

mod model_runtime_format {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Tz>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&dt.format(MODEL_RUNTIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Tz>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_local(&raw, MODEL_RUNTIME_FORMAT, FORECAST_TIMEZONE).map_err(de::Error::custom)
    }
}

mod rfc3339_format {
    use super::*;
    use serde::{de, Deserializer, Serializer};
    use wms_common::time::parse_rfc3339_in;

    pub fn serialize<S: Serializer>(dt: &DateTime<Tz>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Tz>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_rfc3339_in(&raw, FORECAST_TIMEZONE).map_err(de::Error::custom)
    }
}

// "True"/"False", as existing output files spell it
mod title_case_bool {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *v { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "True" | "true" => Ok(true),
            "False" | "false" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"True or False",
            )),
        }
    }
}
