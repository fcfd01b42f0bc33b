use crate::{
    DatabaseAdapter, Envelope, FeatureType, FilterToSql, Geometry, GeometryDescriptor,
    GeometryFactory, GeometryType, Hints, ReferencedEnvelope, Result, ScalarValue, ValueType,
    encode_default_value,
};

const DEFAULT_VARCHAR_SIZE: u32 = 255;

/// Translation point between abstract store operations and one engine's SQL.
///
/// Methods that only render SQL append to the caller's buffer. Methods that
/// need the database run their statements on the caller's connection and
/// report "not known" as `Ok(None)`.
pub trait SqlDialect: Send + Sync {
    fn name(&self) -> &str;

    fn initialize_connection(&self, _cx: &dyn DatabaseAdapter) -> Result<()> {
        Ok(())
    }

    fn include_table(&self, _schema: Option<&str>, _table: &str) -> bool {
        true
    }

    fn encode_column_name(&self, prefix: Option<&str>, column: &str, sql: &mut String) {
        if let Some(prefix) = prefix {
            sql.push_str(prefix);
            sql.push('.');
        }
        sql.push('"');
        sql.push_str(&column.replace('"', "\"\""));
        sql.push('"');
    }

    fn encode_table_name(&self, schema: Option<&str>, table: &str, sql: &mut String) {
        if let Some(schema) = schema {
            self.encode_column_name(None, schema, sql);
            sql.push('.');
        }
        self.encode_column_name(None, table, sql);
    }

    fn encode_geometry_column(
        &self,
        descriptor: &GeometryDescriptor,
        prefix: Option<&str>,
        srid: Option<i32>,
        hints: &Hints,
        sql: &mut String,
    );

    fn encode_geometry_envelope(&self, table: &str, column: &str, sql: &mut String);

    fn decode_geometry_envelope(&self, value: Option<&str>) -> Result<Envelope>;

    fn decode_geometry_value(
        &self,
        descriptor: &GeometryDescriptor,
        value: Option<&str>,
        factory: &GeometryFactory,
    ) -> Result<Option<Geometry>>;

    fn encode_geometry_value(
        &self,
        value: Option<&Geometry>,
        srid: i32,
        sql: &mut String,
    ) -> Result<()>;

    /// Fast bounds from engine statistics. `Ok(None)` tells the caller to
    /// compute exact bounds instead.
    fn optimized_bounds(
        &self,
        _schema: Option<&str>,
        _feature_type: &FeatureType,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<Option<Vec<ReferencedEnvelope>>> {
        Ok(None)
    }

    fn handle_user_defined_type(
        &self,
        _schema: &str,
        _table: &str,
        _column: &str,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    fn geometry_srid(
        &self,
        schema: Option<&str>,
        table: &str,
        column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i32>>;

    fn sequence_for_column(
        &self,
        schema: Option<&str>,
        table: &str,
        column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<String>>;

    fn next_sequence_value(
        &self,
        schema: Option<&str>,
        sequence: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i64>>;

    fn lookup_generated_values_post_insert(&self) -> bool {
        false
    }

    fn last_auto_generated_value(
        &self,
        schema: Option<&str>,
        table: &str,
        column: &str,
        cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i64>>;

    fn binding_for_type_name(&self, type_name: &str) -> Option<ValueType>;

    fn sql_type_name_override(&self, _value_type: ValueType) -> Option<&'static str> {
        None
    }

    fn geometry_type_name(&self, geometry_type: GeometryType) -> &str;

    fn encode_primary_key(&self, column: &str, sql: &mut String);

    fn post_create_table(
        &self,
        _schema: Option<&str>,
        _feature_type: &FeatureType,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<()> {
        Ok(())
    }

    fn post_drop_table(
        &self,
        _schema: Option<&str>,
        _feature_type: &FeatureType,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<()> {
        Ok(())
    }

    fn create_filter_to_sql(&self) -> Box<dyn FilterToSql + '_>;

    fn is_limit_offset_supported(&self) -> bool {
        false
    }

    fn apply_limit_offset(&self, _sql: &mut String, _limit: Option<u32>, _offset: u32) {}

    fn encode_value(&self, value: &ScalarValue, sql: &mut String) {
        encode_default_value(value, sql);
    }

    fn default_varchar_size(&self) -> Option<u32> {
        Some(DEFAULT_VARCHAR_SIZE)
    }
}
