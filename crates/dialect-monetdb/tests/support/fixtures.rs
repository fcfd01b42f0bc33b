#![allow(dead_code)]

use geodialect_core::{FeatureType, GeometryDescriptor, GeometryType, ValueType};
use geodialect_dialect_monetdb::{DialectConfig, MonetDbDialect};
use geodialect_testkit::{RecordingAdapter, text_row};

pub const SPATIAL_VERSION_QUERY: &str = "select PostGIS_Lib_Version()";

pub fn dialect_with(configure: impl FnOnce(&mut DialectConfig)) -> MonetDbDialect {
    let mut config = DialectConfig::default();
    configure(&mut config);
    MonetDbDialect::new(config)
}

pub fn polygon_column() -> GeometryDescriptor {
    GeometryDescriptor::new("geom", GeometryType::Polygon).with_crs_epsg(4326)
}

pub fn roads() -> FeatureType {
    FeatureType::new("roads")
        .with_scalar("name", ValueType::String)
        .with_geometry(polygon_column())
}

/// Adapter answering the spatial library version query with `version`.
pub fn adapter_with_spatial_version(version: &str) -> RecordingAdapter {
    let adapter = RecordingAdapter::new();
    adapter.respond_to(SPATIAL_VERSION_QUERY, vec![text_row(version)]);
    adapter
}
