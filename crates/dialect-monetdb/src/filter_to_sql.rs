use std::fmt::Write as _;

use geodialect_core::{
    Expr, Filter, FilterToSql, Geometry, Result, ScalarValue, SpatialOp, SqlDialect, encode_expr,
    unsupported,
};

use crate::{MonetDbDialect, dialect::UNKNOWN_SRID};

const ENVELOPE_OVERLAP_FUNCTION: &str = "mbrOverlaps";
const DISTANCE_FUNCTION: &str = "ST_DWithin";

/// Filter renderer bound to one dialect instance, so it sees that instance's
/// loose-bbox and function-encoding settings.
pub struct MonetDbFilterToSql<'a> {
    dialect: &'a MonetDbDialect,
}

impl<'a> MonetDbFilterToSql<'a> {
    #[must_use]
    pub fn new(dialect: &'a MonetDbDialect) -> Self {
        Self { dialect }
    }

    fn encode_geometry(
        &self,
        geometry: &Geometry,
        srid: Option<i32>,
        sql: &mut String,
    ) -> Result<()> {
        let srid = srid.or(geometry.srid).unwrap_or(UNKNOWN_SRID);
        Ok(self.dialect.codec().encode(Some(geometry), srid, sql)?)
    }

    fn encode_binary_predicate(
        &self,
        function: &str,
        property: &str,
        geometry: &Geometry,
        srid: Option<i32>,
        sql: &mut String,
    ) -> Result<()> {
        sql.push_str(function);
        sql.push('(');
        self.encode_column(property, sql);
        sql.push_str(", ");
        self.encode_geometry(geometry, srid, sql)?;
        sql.push(')');
        Ok(())
    }

    fn encode_distance(
        &self,
        property: &str,
        geometry: &Geometry,
        distance: f64,
        sql: &mut String,
    ) -> Result<()> {
        sql.push_str(DISTANCE_FUNCTION);
        sql.push('(');
        self.encode_column(property, sql);
        sql.push_str(", ");
        self.encode_geometry(geometry, None, sql)?;
        write!(sql, ", {distance})").expect("writing to String should not fail");
        Ok(())
    }
}

impl FilterToSql for MonetDbFilterToSql<'_> {
    fn dialect_name(&self) -> &str {
        self.dialect.name()
    }

    fn encode_column(&self, name: &str, sql: &mut String) {
        self.dialect.encode_column_name(None, name, sql);
    }

    fn encode_literal(&self, value: &ScalarValue, sql: &mut String) {
        self.dialect.encode_value(value, sql);
    }

    fn encode_spatial(&self, filter: &Filter, sql: &mut String) -> Result<()> {
        match filter {
            Filter::Spatial {
                op,
                property,
                geometry,
            } => self.encode_binary_predicate(spatial_function(*op), property, geometry, None, sql)?,
            Filter::BBox {
                envelope,
                ..
            } if envelope.is_null() => sql.push_str("0 = 1"),
            Filter::BBox {
                property,
                envelope,
                srid,
            } => {
                let function = if self.dialect.config().loose_bbox {
                    ENVELOPE_OVERLAP_FUNCTION
                } else {
                    spatial_function(SpatialOp::Intersects)
                };
                let geometry = Geometry::from_envelope(envelope);
                self.encode_binary_predicate(function, property, &geometry, *srid, sql)?;
            }
            Filter::DWithin {
                property,
                geometry,
                distance,
            } => self.encode_distance(property, geometry, *distance, sql)?,
            Filter::Beyond {
                property,
                geometry,
                distance,
            } => {
                sql.push_str("NOT ");
                self.encode_distance(property, geometry, *distance, sql)?;
            }
            other => return Err(unsupported(self.dialect_name(), other.kind())),
        }
        Ok(())
    }

    fn encode_function(&self, name: &str, args: &[Expr], sql: &mut String) -> Result<()> {
        if !self.dialect.config().function_encoding {
            return Err(unsupported(self.dialect_name(), format!("function {name}")));
        }

        sql.push_str(name);
        sql.push('(');
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                sql.push_str(", ");
            }
            encode_expr(self, arg, sql)?;
        }
        sql.push(')');
        Ok(())
    }
}

fn spatial_function(op: SpatialOp) -> &'static str {
    match op {
        SpatialOp::Intersects => "ST_Intersects",
        SpatialOp::Contains => "ST_Contains",
        SpatialOp::Within => "ST_Within",
        SpatialOp::Disjoint => "ST_Disjoint",
        SpatialOp::Touches => "ST_Touches",
        SpatialOp::Crosses => "ST_Crosses",
        SpatialOp::Overlaps => "ST_Overlaps",
        SpatialOp::Equals => "ST_Equals",
    }
}
