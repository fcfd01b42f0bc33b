use geodialect_core::{
    DatabaseAdapter, Envelope, FeatureType, Filter, FilterToSql, Geometry, GeometryDescriptor,
    GeometryFactory, GeometryType, Hints, Result, ScalarValue, SqlDialect, ValueType,
    encode_default_value, query_scalar_text, unsupported,
};

pub const VERSION_QUERY: &str = "SELECT fake_version()";

/// Registers each geometry column with one statement and needs a version
/// answer from the connection first.
#[derive(Debug, Default)]
pub struct FakeSpatialDialect;

impl FakeSpatialDialect {
    pub fn register_sql(schema: &str, table: &str, column: &str, version: &str) -> String {
        format!("REGISTER {schema}.{table}.{column} v{version}")
    }
}

struct FakeFilterToSql;

impl FilterToSql for FakeFilterToSql {
    fn dialect_name(&self) -> &str {
        "fake_spatial"
    }

    fn encode_column(&self, name: &str, sql: &mut String) {
        sql.push_str(name);
    }

    fn encode_literal(&self, value: &ScalarValue, sql: &mut String) {
        encode_default_value(value, sql);
    }

    fn encode_spatial(&self, filter: &Filter, _sql: &mut String) -> Result<()> {
        Err(unsupported(self.dialect_name(), filter.kind()))
    }
}

impl SqlDialect for FakeSpatialDialect {
    fn name(&self) -> &str {
        "fake_spatial"
    }

    fn encode_geometry_column(
        &self,
        descriptor: &GeometryDescriptor,
        prefix: Option<&str>,
        _srid: Option<i32>,
        _hints: &Hints,
        sql: &mut String,
    ) {
        self.encode_column_name(prefix, &descriptor.name, sql);
    }

    fn encode_geometry_envelope(&self, _table: &str, column: &str, sql: &mut String) {
        sql.push_str(column);
    }

    fn decode_geometry_envelope(&self, _value: Option<&str>) -> Result<Envelope> {
        Ok(Envelope::null())
    }

    fn decode_geometry_value(
        &self,
        _descriptor: &GeometryDescriptor,
        _value: Option<&str>,
        _factory: &GeometryFactory,
    ) -> Result<Option<Geometry>> {
        Ok(None)
    }

    fn encode_geometry_value(
        &self,
        _value: Option<&Geometry>,
        _srid: i32,
        sql: &mut String,
    ) -> Result<()> {
        sql.push_str("NULL");
        Ok(())
    }

    fn geometry_srid(
        &self,
        _schema: Option<&str>,
        _table: &str,
        _column: &str,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i32>> {
        Ok(None)
    }

    fn sequence_for_column(
        &self,
        _schema: Option<&str>,
        _table: &str,
        _column: &str,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    fn next_sequence_value(
        &self,
        _schema: Option<&str>,
        _sequence: &str,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i64>> {
        Ok(None)
    }

    fn last_auto_generated_value(
        &self,
        _schema: Option<&str>,
        _table: &str,
        _column: &str,
        _cx: &dyn DatabaseAdapter,
    ) -> Result<Option<i64>> {
        Ok(None)
    }

    fn binding_for_type_name(&self, _type_name: &str) -> Option<ValueType> {
        None
    }

    fn geometry_type_name(&self, geometry_type: GeometryType) -> &str {
        geometry_type.wkt_tag()
    }

    fn encode_primary_key(&self, column: &str, sql: &mut String) {
        sql.push_str(column);
    }

    fn post_create_table(
        &self,
        schema: Option<&str>,
        feature_type: &FeatureType,
        cx: &dyn DatabaseAdapter,
    ) -> Result<()> {
        let version = query_scalar_text(cx, VERSION_QUERY)?.unwrap_or_default();
        for descriptor in feature_type.geometry_descriptors() {
            cx.execute(&Self::register_sql(
                schema.unwrap_or("main"),
                &feature_type.name,
                &descriptor.name,
                &version,
            ))?;
        }
        Ok(())
    }

    fn post_drop_table(
        &self,
        schema: Option<&str>,
        feature_type: &FeatureType,
        cx: &dyn DatabaseAdapter,
    ) -> Result<()> {
        cx.execute(&format!(
            "UNREGISTER {}.{}",
            schema.unwrap_or("main"),
            feature_type.name
        ))
    }

    fn create_filter_to_sql(&self) -> Box<dyn FilterToSql + '_> {
        Box::new(FakeFilterToSql)
    }
}
