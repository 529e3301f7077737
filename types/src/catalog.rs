//! Read-only catalogs: payable services and promotional banners.

use serde::{Deserialize, Serialize};

/// A payable service (electricity, mobile credit, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique key used when paying.
    pub service_code: String,
    pub service_name: String,
    pub service_icon: String,
    pub service_tariff: u64,
}

/// A promotional banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub banner_name: String,
    pub banner_image: String,
    pub description: String,
}
