use std::fmt::Write as _;

use geodialect_core::{Envelope, Geometry, GeometryFactory, GeometryFormatError, read_wkt};

use crate::quoting::quote_value;

const NULL_MARKER: &str = "NULL";
const GEOMETRY_CONSTRUCTOR: &str = "ST_GeomFromText";

/// Converts between the WKT MonetDB returns for geometry columns and
/// [`Geometry`] values, and renders geometry literals for generated SQL.
#[derive(Debug, Default, Clone, Copy)]
pub struct WktCodec;

impl WktCodec {
    /// SQL NULL and the textual `NULL` marker both decode to `None`.
    pub fn decode(
        &self,
        value: Option<&str>,
        factory: &GeometryFactory,
    ) -> Result<Option<Geometry>, GeometryFormatError> {
        let Some(text) = non_null(value) else {
            return Ok(None);
        };

        factory
            .read_wkt(text)
            .map(Some)
            .map_err(GeometryFormatError::geometry)
    }

    pub fn decode_envelope(&self, value: Option<&str>) -> Result<Envelope, GeometryFormatError> {
        let Some(text) = non_null(value) else {
            return Ok(Envelope::null());
        };

        read_wkt(text)
            .map(|geometry| geometry.envelope())
            .map_err(GeometryFormatError::envelope)
    }

    /// MonetDB has no ring type; a linear ring is written with its
    /// coordinates as a line string.
    pub fn encode(
        &self,
        value: Option<&Geometry>,
        srid: i32,
        sql: &mut String,
    ) -> Result<(), GeometryFormatError> {
        let Some(geometry) = value.filter(|geometry| !geometry.is_empty()) else {
            sql.push_str("NULL");
            return Ok(());
        };

        let text = geometry.to_wkt().map_err(GeometryFormatError::write)?;
        write!(
            sql,
            "{GEOMETRY_CONSTRUCTOR}({}, {srid})",
            quote_value(Some(&text))
        )
        .expect("writing to String should not fail");
        Ok(())
    }
}

fn non_null(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().eq_ignore_ascii_case(NULL_MARKER))
}
