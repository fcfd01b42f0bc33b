use std::str::FromStr;

use thiserror::Error;
use wkt::Wkt;

use super::{Geometry, for_each_coord};

const SRID_PREFIX: &str = "SRID=";

/// Parse failures carry the reader's message, never the input itself, so
/// arbitrarily large column values cannot leak into error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WktError {
    #[error("{0}")]
    Syntax(String),
    #[error("invalid SRID prefix")]
    InvalidSrid,
    #[error("non-finite ordinates cannot be written as WKT")]
    NonFinite,
}

/// Reads WKT, or EWKT with a leading `SRID=<n>;`.
pub fn read_wkt(text: &str) -> Result<Geometry, WktError> {
    let (srid, body) = split_srid_prefix(text)?;
    let shape =
        Wkt::<f64>::from_str(body).map_err(|error| WktError::Syntax(error.to_string()))?;

    Ok(Geometry {
        shape,
        srid,
        linear_ring: false,
    })
}

/// Writes plain WKT. The SRID travels separately in generated SQL.
pub fn write_wkt(shape: &Wkt<f64>) -> Result<String, WktError> {
    let mut finite = true;
    for_each_coord(shape, &mut |coord| {
        finite &= coord.x.is_finite()
            && coord.y.is_finite()
            && coord.z.is_none_or(f64::is_finite)
            && coord.m.is_none_or(f64::is_finite);
    });
    if !finite {
        return Err(WktError::NonFinite);
    }

    Ok(shape.to_string())
}

fn split_srid_prefix(text: &str) -> Result<(Option<i32>, &str), WktError> {
    let rest = text.trim_start();
    let has_prefix = rest
        .get(..SRID_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SRID_PREFIX));
    if !has_prefix {
        return Ok((None, text));
    }

    let after_prefix = &rest[SRID_PREFIX.len()..];
    let (srid, body) = after_prefix.split_once(';').ok_or(WktError::InvalidSrid)?;
    let srid = srid.trim().parse::<i32>().map_err(|_| WktError::InvalidSrid)?;

    Ok((Some(srid), body))
}
