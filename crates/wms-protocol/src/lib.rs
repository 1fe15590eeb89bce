//! OGC WMS protocol support.
//!
//! Supports the client side of WMS 1.3.0 GetFeatureInfo.

pub mod getfeatureinfo;

pub use getfeatureinfo::{
    attribute_text, Feature, FeatureInfoResponse, GetFeatureInfoRequest, InfoFormat,
};
