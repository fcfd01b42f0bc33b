#[path = "support/fixtures.rs"]
mod fixtures;

use fixtures::{adapter_with_spatial_version, dialect_with, polygon_column, roads};
use geodialect_core::{Envelope, Filter, SqlDialect, Version};
use geodialect_dialect_monetdb::MonetDbDialect;
use geodialect_testkit::RecordingAdapter;
use sqlparser::{dialect::PostgreSqlDialect, parser::Parser};

fn assert_parses(sql: &str) {
    if let Err(error) = Parser::parse_sql(&PostgreSqlDialect {}, sql) {
        panic!("generated SQL must parse: {sql}\n{error}");
    }
}

#[test]
fn constraint_and_index_statements_parse() {
    let dialect = MonetDbDialect::default();

    for version in [Version::new(1, 5, 0), Version::new(2, 1, 0)] {
        let statements = dialect.spatial_column_ddl("sys", "roads", &polygon_column(), &version);
        // The in-place type change uses an engine type modifier list.
        let skip = usize::from(version >= Version::new(2, 0, 0));
        for sql in &statements[skip..] {
            assert_parses(sql);
        }
    }
}

#[test]
fn catalog_queries_parse() {
    let dialect = dialect_with(|config| config.estimated_extents = true);
    let adapter = adapter_with_spatial_version("2.1.0");

    dialect
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");
    dialect
        .sequence_for_column(Some("sys"), "roads", "fid", &adapter)
        .expect("sequence lookup");
    dialect
        .next_sequence_value(None, "seq_roads", &adapter)
        .expect("next value");
    dialect
        .last_auto_generated_value(None, "roads", "fid", &adapter)
        .expect("last value");
    dialect
        .optimized_bounds(Some("sys"), &roads(), &adapter)
        .expect("optimized bounds");
    dialect
        .handle_user_defined_type("sys", "roads", "geom", &adapter)
        .expect("udt");

    let queried = adapter.queried_sql();
    assert_eq!(queried.len(), 7);
    for sql in &queried {
        assert_parses(sql);
    }
}

#[test]
fn drop_statement_parses() {
    let adapter = RecordingAdapter::new();

    MonetDbDialect::default()
        .post_drop_table(None, &roads(), &adapter)
        .expect("post drop");

    for sql in adapter.executed_sql() {
        assert_parses(&sql);
    }
}

#[test]
fn paged_spatial_query_parses() {
    let dialect = MonetDbDialect::default();
    let filter = Filter::BBox {
        property: "geom".to_string(),
        envelope: Envelope::new(0.0, 10.0, 0.0, 5.0),
        srid: Some(4326),
    };

    let mut sql = String::from("SELECT ");
    dialect.encode_geometry_column(&polygon_column(), None, None, &Default::default(), &mut sql);
    sql.push_str(" FROM ");
    dialect.encode_table_name(Some("sys"), "roads", &mut sql);
    sql.push_str(" WHERE ");
    dialect
        .create_filter_to_sql()
        .encode(&filter, &mut sql)
        .expect("filter");
    dialect.apply_limit_offset(&mut sql, Some(10), 20);

    assert_parses(&sql);
}
