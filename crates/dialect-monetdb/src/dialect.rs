use std::{fmt::Write as _, sync::OnceLock};

use geodialect_core::{
    DatabaseAdapter, Envelope, Error, FeatureType, FilterToSql, Geometry, GeometryDescriptor,
    GeometryFactory, GeometryType, Hints, ReferencedEnvelope, Result, Savepoint, ScalarValue,
    SqlDialect, ValueType, Version, encode_default_text, encode_default_value, execution_error,
    query_scalar_i64, query_scalar_text,
};
use tracing::{debug, warn};

use crate::{
    DialectConfig,
    catalog_queries::{self, LAST_VALUE_QUERY, SPATIAL_VERSION_QUERY},
    codec::WktCodec,
    filter_to_sql::MonetDbFilterToSql,
    quoting::{escape_name, qualified_name},
    type_map::{self, GENERIC_GEOMETRY_TYPE_NAME},
};

pub const DIALECT_NAME: &str = "monetdb";
pub const UNKNOWN_SRID: i32 = -1;

/// From this spatial library version on, geometry type and SRID live in the
/// column type instead of the registry table.
pub const IN_PLACE_GEOMETRY_TYPE_VERSION: Version = Version::new(2, 0, 0);
/// From this server version on, binary literals default to hex encoding.
pub const HEX_BYTEA_SERVER_VERSION: Version = Version::new(9, 1, 0);

const GEOMETRY_DIMENSIONS: u8 = 2;
const GEOMETRY_TYPE_NAME: &str = "geometry";
const GEOGRAPHY_TYPE_NAME: &str = "geography";
const ESTIMATED_EXTENT_SAVEPOINT: &str = "estimated_extent";
const UNBOUNDED_LIMIT: u32 = i32::MAX as u32;
const SEQUENCE_PREFIX: &str = "seq_";
const HIDDEN_TABLES: &[&str] = &[
    "geometry_columns",
    "geography_columns",
    "raster_columns",
    "raster_overviews",
];
const HIDDEN_TABLE_PREFIX: &str = "spatial_ref_sys";
const HIDDEN_SCHEMA: &str = "topology";

#[derive(Debug)]
pub struct MonetDbDialect {
    config: DialectConfig,
    codec: WktCodec,
    spatial_version: OnceLock<Version>,
    server_version: OnceLock<Version>,
}

impl MonetDbDialect {
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            config,
            codec: WktCodec,
            spatial_version: OnceLock::new(),
            server_version: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    #[must_use]
    pub fn codec(&self) -> &WktCodec {
        &self.codec
    }

    /// Version of the spatial library, queried on first use and memoized.
    /// Concurrent first calls may both query; the first stored value wins.
    pub fn spatial_version(&self, cx: &dyn DatabaseAdapter) -> Result<Version> {
        if let Some(version) = self.spatial_version.get() {
            return Ok(version.clone());
        }

        debug!("{SPATIAL_VERSION_QUERY}");
        let raw = query_scalar_text(cx, SPATIAL_VERSION_QUERY)?.ok_or_else(|| {
            execution_error(SPATIAL_VERSION_QUERY, "spatial library version is unavailable")
        })?;
        let version = Version::parse(&raw).ok_or_else(|| {
            execution_error(
                SPATIAL_VERSION_QUERY,
                format!("failed to parse spatial library version string: `{raw}`"),
            )
        })?;

        Ok(self.spatial_version.get_or_init(|| version).clone())
    }

    pub fn server_version(&self, cx: &dyn DatabaseAdapter) -> Result<Version> {
        if let Some(version) = self.server_version.get() {
            return Ok(version.clone());
        }

        let version = cx.server_version()?;
        Ok(self.server_version.get_or_init(|| version).clone())
    }

    /// Statements registering one geometry column after its table exists, in
    /// execution order.
    #[must_use]
    pub fn spatial_column_ddl(
        &self,
        schema: &str,
        table: &str,
        descriptor: &GeometryDescriptor,
        spatial_version: &Version,
    ) -> Vec<String> {
        let srid = resolve_srid(descriptor);
        let geometry_type = type_map::geometry_type_name(descriptor.geometry_type)
            .unwrap_or(GENERIC_GEOMETRY_TYPE_NAME);
        let table_name = qualified_name(schema, table);
        let column = escape_name(&descriptor.name);

        let mut statements = Vec::with_capacity(6);
        if *spatial_version >= IN_PLACE_GEOMETRY_TYPE_VERSION {
            statements.push(format!(
                "ALTER TABLE {table_name} ALTER COLUMN {column} TYPE {GEOMETRY_TYPE_NAME} ({geometry_type}, {srid})"
            ));
        } else {
            statements.push(catalog_queries::delete_registry_column(
                schema,
                table,
                &descriptor.name,
            ));
            statements.push(catalog_queries::insert_registry_column(
                schema,
                table,
                &descriptor.name,
                GEOMETRY_DIMENSIONS,
                srid,
                geometry_type,
            ));
        }

        if srid != UNKNOWN_SRID {
            statements.push(format!(
                "ALTER TABLE {table_name} ADD CONSTRAINT {} CHECK (ST_SRID({column}) = {srid})",
                escape_name(&format!("enforce_srid_{}", descriptor.name)),
            ));
        }

        statements.push(format!(
            "ALTER TABLE {table_name} ADD CONSTRAINT {} CHECK (st_ndims({column}) = {GEOMETRY_DIMENSIONS})",
            escape_name(&format!("enforce_dims_{}", descriptor.name)),
        ));

        if geometry_type != GENERIC_GEOMETRY_TYPE_NAME {
            statements.push(format!(
                "ALTER TABLE {table_name} ADD CONSTRAINT {} CHECK (geometrytype({column}) = '{geometry_type}'::text OR {column} IS NULL)",
                escape_name(&format!("enforce_geotype_{}", descriptor.name)),
            ));
        }

        statements.push(format!(
            "CREATE INDEX {} ON {table_name} USING GIST ({column})",
            escape_name(&format!(
                "spatial_{table}_{}",
                descriptor.name.to_lowercase()
            )),
        ));

        statements
    }

    fn schema_or_default<'a>(&'a self, schema: Option<&'a str>) -> &'a str {
        schema.unwrap_or(self.config.schema.as_str())
    }

    fn estimated_extents(
        &self,
        schema: Option<&str>,
        feature_type: &FeatureType,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Vec<ReferencedEnvelope>> {
        let mut bounds = Vec::new();

        for descriptor in feature_type.geometry_descriptors() {
            let sql =
                catalog_queries::estimated_extent_query(schema, &feature_type.name, &descriptor.name);
            debug!("{sql}");

            let Some(row) = cx.query(&sql)?.into_iter().next() else {
                continue;
            };
            let envelope = self.decode_geometry_envelope(row.text(0, &sql)?.as_deref())?;
            if !envelope.is_null() {
                bounds.push(ReferencedEnvelope {
                    envelope,
                    srid: descriptor.crs_epsg.or(descriptor.native_srid),
                });
            }
        }

        Ok(bounds)
    }
}

impl Default for MonetDbDialect {
    fn default() -> Self {
        Self::new(DialectConfig::default())
    }
}

impl SqlDialect for MonetDbDialect {
    fn name(&self) -> &str {
        DIALECT_NAME
    }

    fn initialize_connection(&self, cx: &dyn DatabaseAdapter) -> Result<()> {
        self.server_version(cx).map(|_| ())
    }

    fn include_table(&self, schema: Option<&str>, table: &str) -> bool {
        if HIDDEN_TABLES.contains(&table) || table.starts_with(HIDDEN_TABLE_PREFIX) {
            return false;
        }
        schema != Some(HIDDEN_SCHEMA)
    }

    fn encode_geometry_column(
        &self,
        descriptor: &GeometryDescriptor,
        prefix: Option<&str>,
        _srid: Option<i32>,
        hints: &Hints,
        sql: &mut String,
    ) {
        let geography = descriptor.native_type_name.as_deref() == Some(GEOGRAPHY_TYPE_NAME);
        let force_2d = hints.force_2d && !geography;

        sql.push_str("ST_AsText(");
        if force_2d {
            sql.push_str("ST_Force_2D(");
        }
        self.encode_column_name(prefix, &descriptor.name, sql);
        if force_2d {
            sql.push(')');
        }
        sql.push(')');
    }

    fn encode_geometry_envelope(&self, _table: &str, column: &str, sql: &mut String) {
        write!(
            sql,
            "ST_AsText(ST_Force_2D(ST_Envelope(ST_Extent({}::geometry))))",
            escape_name(column)
        )
        .expect("writing to String should not fail");
    }

    fn decode_geometry_envelope(&self, value: Option<&str>) -> Result<Envelope> {
        Ok(self.codec.decode_envelope(value)?)
    }

    fn decode_geometry_value(
        &self,
        _descriptor: &GeometryDescriptor,
        value: Option<&str>,
        factory: &GeometryFactory,
    ) -> Result<Option<Geometry>> {
        Ok(self.codec.decode(value, factory)?)
    }

    fn encode_geometry_value(
        &self,
        value: Option<&Geometry>,
        srid: i32,
        sql: &mut String,
    ) -> Result<()> {
        Ok(self.codec.encode(value, srid, sql)?)
    }

    fn optimized_bounds(
        &self,
        schema: Option<&str>,
        feature_type: &FeatureType,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<Vec<ReferencedEnvelope>>> {
        if !self.config.estimated_extents {
            return Ok(None);
        }

        let savepoint = if cx.auto_commit() {
            None
        } else {
            match Savepoint::begin(cx, ESTIMATED_EXTENT_SAVEPOINT) {
                Ok(savepoint) => Some(savepoint),
                Err(Error::Execute(error)) => {
                    warn!(
                        "failed to set a savepoint for ST_Estimated_Extent on `{}`, falling back on envelope aggregation: {error}",
                        feature_type.name
                    );
                    return Ok(None);
                }
                Err(error) => return Err(error),
            }
        };

        match self.estimated_extents(schema, feature_type, cx) {
            Ok(bounds) => {
                if let Some(savepoint) = savepoint {
                    savepoint.release()?;
                }
                Ok(Some(bounds))
            }
            Err(Error::Execute(error)) => {
                if let Some(savepoint) = savepoint {
                    savepoint.rollback()?;
                }
                warn!(
                    "failed to use ST_Estimated_Extent for `{}`, falling back on envelope aggregation: {error}",
                    feature_type.name
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn handle_user_defined_type(
        &self,
        schema: &str,
        table: &str,
        column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<String>> {
        let sql = catalog_queries::udt_name_query(schema, table, column);
        debug!("{sql}");
        query_scalar_text(cx, &sql)
    }

    fn geometry_srid(
        &self,
        schema: Option<&str>,
        table: &str,
        column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i32>> {
        let schema = self.schema_or_default(schema);

        let registry_sql = catalog_queries::registry_srid_query(schema, table, column);
        debug!("geometry srid check: {registry_sql}");
        let registered = cx.query(&registry_sql).and_then(|rows| match rows.first() {
            Some(row) => row.i32(0, &registry_sql),
            None => Ok(None),
        });
        let registered = match registered {
            Ok(srid) => srid,
            Err(error) => {
                warn!(
                    "failed to retrieve information about {schema}.{table}.{column} from the geometry registry, checking the first geometry instead: {error}"
                );
                None
            }
        };
        if registered.is_some() {
            return Ok(registered);
        }

        // Assumes a uniform SRID across the column.
        let sample_sql = catalog_queries::sampled_srid_query(schema, table, column);
        debug!("geometry srid sample: {sample_sql}");
        match cx.query(&sample_sql)?.first() {
            Some(row) => row.i32(0, &sample_sql),
            None => Ok(None),
        }
    }

    fn sequence_for_column(
        &self,
        schema: Option<&str>,
        table: &str,
        column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<String>> {
        let sql = catalog_queries::column_default_query(schema, table, column);
        debug!("{sql}");
        Ok(query_scalar_text(cx, &sql)?
            .as_deref()
            .and_then(extract_sequence_name))
    }

    fn next_sequence_value(
        &self,
        _schema: Option<&str>,
        sequence: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i64>> {
        let sql = catalog_queries::next_value_query(sequence);
        debug!("{sql}");
        query_scalar_i64(cx, &sql)
    }

    fn lookup_generated_values_post_insert(&self) -> bool {
        true
    }

    fn last_auto_generated_value(
        &self,
        _schema: Option<&str>,
        _table: &str,
        _column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i64>> {
        debug!("{LAST_VALUE_QUERY}");
        query_scalar_i64(cx, LAST_VALUE_QUERY)
    }

    fn binding_for_type_name(&self, type_name: &str) -> Option<ValueType> {
        type_map::binding_for_type_name(type_name)
    }

    fn sql_type_name_override(&self, value_type: ValueType) -> Option<&'static str> {
        type_map::sql_type_name_override(value_type)
    }

    fn geometry_type_name(&self, _geometry_type: GeometryType) -> &str {
        GEOMETRY_TYPE_NAME
    }

    fn encode_primary_key(&self, column: &str, sql: &mut String) {
        self.encode_column_name(None, column, sql);
        sql.push_str(" SERIAL PRIMARY KEY");
    }

    fn post_create_table(
        &self,
        schema: Option<&str>,
        feature_type: &FeatureType,
        cx: &dyn DatabaseAdapter,
    ) -> Result<()> {
        let schema = self.schema_or_default(schema);

        for descriptor in feature_type.geometry_descriptors() {
            let spatial_version = self.spatial_version(cx)?;
            for sql in
                self.spatial_column_ddl(schema, &feature_type.name, descriptor, &spatial_version)
            {
                debug!("{sql}");
                cx.execute(&sql)?;
            }
        }

        if !cx.auto_commit() {
            cx.commit()?;
        }
        Ok(())
    }

    fn post_drop_table(
        &self,
        schema: Option<&str>,
        feature_type: &FeatureType,
        cx: &dyn DatabaseAdapter,
    ) -> Result<()> {
        let sql = catalog_queries::delete_registry_table(
            self.schema_or_default(schema),
            &feature_type.name,
        );
        debug!("{sql}");
        cx.execute(&sql)
    }

    fn create_filter_to_sql(&self) -> Box<dyn FilterToSql + '_> {
        Box::new(MonetDbFilterToSql::new(self))
    }

    fn is_limit_offset_supported(&self) -> bool {
        true
    }

    fn apply_limit_offset(&self, sql: &mut String, limit: Option<u32>, offset: u32) {
        if let Some(limit) = limit.filter(|limit| *limit < UNBOUNDED_LIMIT) {
            write!(sql, " LIMIT {limit}").expect("writing to String should not fail");
        }
        if offset > 0 {
            write!(sql, " OFFSET {offset}").expect("writing to String should not fail");
        }
    }

    fn encode_value(&self, value: &ScalarValue, sql: &mut String) {
        match value {
            ScalarValue::Bytes(bytes) => match self.server_version.get() {
                Some(version) if *version < HEX_BYTEA_SERVER_VERSION => {
                    encode_bytes_as_escape(bytes, sql);
                }
                _ => encode_bytes_as_hex(bytes, sql),
            },
            other => encode_default_value(other, sql),
        }
    }

    fn default_varchar_size(&self) -> Option<u32> {
        None
    }
}

fn resolve_srid(descriptor: &GeometryDescriptor) -> i32 {
    descriptor
        .native_srid
        .or(descriptor.crs_epsg)
        .unwrap_or(UNKNOWN_SRID)
}

/// Finds the first `"seq_<name>"` reference in a column default expression.
pub(crate) fn extract_sequence_name(default_expr: &str) -> Option<String> {
    let marker = format!("\"{SEQUENCE_PREFIX}");
    let start = default_expr.find(&marker)? + marker.len();
    let len = default_expr[start..].find('"')?;
    Some(format!("{SEQUENCE_PREFIX}{}", &default_expr[start..start + len]))
}

fn encode_bytes_as_hex(bytes: &[u8], sql: &mut String) {
    let mut literal = String::with_capacity(bytes.len() * 2 + 2);
    literal.push_str("\\x");
    for byte in bytes {
        write!(literal, "{byte:02x}").expect("writing to String should not fail");
    }
    encode_default_text(&literal, sql);
}

fn encode_bytes_as_escape(bytes: &[u8], sql: &mut String) {
    let mut literal = String::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            0 => literal.push_str("\\\\000"),
            b'\'' => literal.push_str("\\'"),
            b'\\' => literal.push_str("\\\\134"),
            byte if byte < 31 || byte >= 127 => {
                write!(literal, "\\\\{byte:03o}").expect("writing to String should not fail");
            }
            byte => literal.push(char::from(byte)),
        }
    }
    encode_default_text(&literal, sql);
}
