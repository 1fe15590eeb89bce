//! Common types shared across the stookwijzer workspace.

pub mod bbox;
pub mod crs;
pub mod time;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use time::{ValidTime, MODEL_RUNTIME_FORMAT};
