// Statements issued against the MonetDB catalog and the geometry registry
// table. Literal values always pass through `quote_value`.

use std::fmt::Write as _;

use crate::quoting::{escape_name, qualified_name, quote_identifier, quote_value};

pub(crate) const SPATIAL_VERSION_QUERY: &str = "select PostGIS_Lib_Version()";
pub(crate) const LAST_VALUE_QUERY: &str = "SELECT lastval()";
pub(crate) const GEOMETRY_REGISTRY_TABLE: &str = "GEOMETRY_COLUMNS";

pub(crate) fn registry_srid_query(schema: &str, table: &str, column: &str) -> String {
    format!(
        "SELECT SRID FROM {GEOMETRY_REGISTRY_TABLE} WHERE F_TABLE_SCHEMA = {} AND F_TABLE_NAME = {} AND F_GEOMETRY_COLUMN = {}",
        quote_value(Some(schema)),
        quote_value(Some(table)),
        quote_value(Some(column)),
    )
}

pub(crate) fn sampled_srid_query(schema: &str, table: &str, column: &str) -> String {
    let column = escape_name(column);
    format!(
        "SELECT SRID({column}) FROM {} WHERE {column} IS NOT NULL LIMIT 1",
        qualified_name(schema, table),
    )
}

pub(crate) fn column_default_query(schema: Option<&str>, table: &str, column: &str) -> String {
    let mut sql = format!(
        "SELECT {} FROM \"sys\".\"_columns\" AS columns INNER JOIN sys._tables AS tables ON columns.table_id = tables.id",
        quote_identifier("default"),
    );

    match schema.filter(|schema| !schema.is_empty()) {
        Some(schema) => write!(
            sql,
            " INNER JOIN sys.schemas AS schemas ON tables.schema_id = schemas.id WHERE schemas.name = {}",
            quote_value(Some(schema)),
        )
        .expect("writing to String should not fail"),
        None => sql.push_str(" WHERE 1=1"),
    }

    write!(
        sql,
        " AND tables.name = {} AND columns.name = {}",
        quote_value(Some(table)),
        quote_value(Some(column)),
    )
    .expect("writing to String should not fail");

    sql
}

pub(crate) fn next_value_query(sequence: &str) -> String {
    format!("SELECT nextval({})", quote_value(Some(sequence)))
}

pub(crate) fn udt_name_query(schema: &str, table: &str, column: &str) -> String {
    format!(
        "SELECT udt_name FROM information_schema.columns WHERE table_schema = {} AND table_name = {} AND column_name = {}",
        quote_value(Some(schema)),
        quote_value(Some(table)),
        quote_value(Some(column)),
    )
}

pub(crate) fn estimated_extent_query(schema: Option<&str>, table: &str, column: &str) -> String {
    let mut arguments = Vec::with_capacity(3);
    if let Some(schema) = schema {
        arguments.push(quote_value(Some(schema)));
    }
    arguments.push(quote_value(Some(table)));
    arguments.push(quote_value(Some(column)));

    format!(
        "select ST_AsText(ST_force_2d(ST_Envelope(ST_Estimated_Extent({}))))",
        arguments.join(", ")
    )
}

pub(crate) fn delete_registry_column(schema: &str, table: &str, column: &str) -> String {
    format!(
        "{} AND f_geometry_column = {}",
        delete_registry_table(schema, table),
        quote_value(Some(column)),
    )
}

pub(crate) fn delete_registry_table(schema: &str, table: &str) -> String {
    format!(
        "DELETE FROM {GEOMETRY_REGISTRY_TABLE} WHERE f_table_catalog='' AND f_table_schema = {} AND f_table_name = {}",
        quote_value(Some(schema)),
        quote_value(Some(table)),
    )
}

pub(crate) fn insert_registry_column(
    schema: &str,
    table: &str,
    column: &str,
    dimensions: u8,
    srid: i32,
    geometry_type: &str,
) -> String {
    format!(
        "INSERT INTO {GEOMETRY_REGISTRY_TABLE} VALUES ('',{},{},{},{dimensions},{srid},{})",
        quote_value(Some(schema)),
        quote_value(Some(table)),
        quote_value(Some(column)),
        quote_value(Some(geometry_type)),
    )
}
