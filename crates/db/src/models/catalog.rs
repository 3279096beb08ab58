//! Catalog record collections.

use mediadex_core::keys::{
    catalog_key, secondary_catalog_key, CATALOG_PREFIX, SECONDARY_CATALOG_PREFIX,
};
use serde_json::{Map, Value};

/// A catalog record as stored: an arbitrary JSON object.
pub type CatalogRecord = Map<String, Value>;

/// The two denormalized record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCollection {
    /// Primary catalog ("movies").
    Primary,
    /// Secondary catalog ("SC movies").
    Secondary,
}

impl CatalogCollection {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Primary => CATALOG_PREFIX,
            Self::Secondary => SECONDARY_CATALOG_PREFIX,
        }
    }

    pub fn key(self, id: &str) -> String {
        match self {
            Self::Primary => catalog_key(id),
            Self::Secondary => secondary_catalog_key(id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "movie",
            Self::Secondary => "scmovie",
        }
    }
}
