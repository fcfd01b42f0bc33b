use geodialect_core::{FeatureType, GeometryDescriptor, GeometryType};
use serde::Deserialize;

use crate::error_presentation::{CliError, CliResult};

/// Feature type description read by `geodialect ddl`.
///
/// ```yaml
/// table: roads
/// geometries:
///   - { name: geom, type: LineString, srid: 4326 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FeatureTypeFile {
    pub(crate) table: String,
    #[serde(default)]
    pub(crate) geometries: Vec<GeometryColumnFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GeometryColumnFile {
    pub(crate) name: String,
    #[serde(rename = "type", default = "default_geometry_type")]
    pub(crate) geometry_type: String,
    #[serde(default)]
    pub(crate) srid: Option<i32>,
}

fn default_geometry_type() -> String {
    GeometryType::Geometry.wkt_tag().to_string()
}

pub(crate) fn parse_feature_type(yaml: &str) -> CliResult<FeatureType> {
    let file: FeatureTypeFile = serde_yaml::from_str(yaml).map_err(CliError::FeatureType)?;

    let mut feature_type = FeatureType::new(file.table);
    for column in file.geometries {
        let geometry_type = GeometryType::from_wkt_tag(&column.geometry_type).ok_or_else(|| {
            CliError::UnknownGeometryType {
                column: column.name.clone(),
                geometry_type: column.geometry_type.clone(),
            }
        })?;

        let mut descriptor = GeometryDescriptor::new(column.name, geometry_type);
        descriptor.crs_epsg = column.srid;
        feature_type = feature_type.with_geometry(descriptor);
    }

    Ok(feature_type)
}
