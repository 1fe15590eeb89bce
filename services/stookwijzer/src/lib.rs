//! Wood-burning advisory ("stookwijzer") client.
//!
//! Projects a WGS84 location onto the Dutch national grid, asks the RIVM
//! WMS for the advisory feature under that point, and expands the single
//! snapshot it returns into a four-step forecast (now, +6h, +12h, +18h).
//!
//! ```ignore
//! let service = AdvisoryService::from_config(ClientConfig::default())?;
//! let forecast = service.fetch_forecast(GeoCoordinate::new(52.09, 5.11)).await?;
//! let mut sink = CsvSink::open(path, SinkMode::for_path(path))?;
//! sink.write_forecast(&forecast)?;
//! ```

pub mod config;
pub mod error;
pub mod forecast;
pub mod location;
pub mod service;
pub mod sink;
pub mod snapshot;
pub mod source;

pub use config::ClientConfig;
pub use error::{AdvisoryError, NetworkError};
pub use forecast::{build_forecast, Forecast, ForecastRecord, FORECAST_TIMEZONE};
pub use location::{GeoCoordinate, ProjectedCoordinate};
pub use service::AdvisoryService;
pub use sink::{read_records, CsvSink, SinkError, SinkMode};
pub use snapshot::{AdvisoryLevel, AdvisorySnapshot, OffsetAdvice, FORECAST_OFFSETS};
pub use source::{FeatureInfoSource, HttpFeatureInfoSource};
