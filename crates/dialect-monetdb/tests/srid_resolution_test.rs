use geodialect_core::{Error, SqlDialect};
use geodialect_dialect_monetdb::MonetDbDialect;
use geodialect_testkit::{RecordingAdapter, integer_row, null_row, text_row};

const REGISTRY_SQL: &str = "SELECT SRID FROM GEOMETRY_COLUMNS WHERE F_TABLE_SCHEMA = 'sys' AND F_TABLE_NAME = 'roads' AND F_GEOMETRY_COLUMN = 'geom'";
const SAMPLE_SQL: &str =
    r#"SELECT SRID("geom") FROM "sys"."roads" WHERE "geom" IS NOT NULL LIMIT 1"#;

#[test]
fn registry_value_wins_over_sampled_value() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to(REGISTRY_SQL, vec![integer_row(4326)]);
    adapter.respond_to(SAMPLE_SQL, vec![integer_row(3857)]);

    let srid = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, Some(4326));
    assert_eq!(adapter.queried_sql(), vec![REGISTRY_SQL]);
}

#[test]
fn sampled_value_is_used_when_registry_has_no_row() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to(SAMPLE_SQL, vec![integer_row(3857)]);

    let srid = MonetDbDialect::default()
        .geometry_srid(Some("sys"), "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, Some(3857));
    assert_eq!(adapter.queried_sql(), vec![REGISTRY_SQL, SAMPLE_SQL]);
}

#[test]
fn null_registry_srid_falls_back_to_sampling() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to(REGISTRY_SQL, vec![null_row()]);
    adapter.respond_to(SAMPLE_SQL, vec![integer_row(28992)]);

    let srid = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, Some(28992));
}

#[test]
fn empty_table_without_registry_row_is_unknown() {
    let adapter = RecordingAdapter::new();

    let srid = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, None);
}

#[test]
fn registry_failure_is_logged_and_sampling_continues() {
    let adapter = RecordingAdapter::new();
    adapter.fail_on_sql(REGISTRY_SQL, "no such table: GEOMETRY_COLUMNS");
    adapter.respond_to(SAMPLE_SQL, vec![integer_row(4326)]);

    let srid = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, Some(4326));
}

#[test]
fn undecodable_registry_srid_falls_back_to_sampling() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to(REGISTRY_SQL, vec![text_row("EPSG:4326")]);
    adapter.respond_to(SAMPLE_SQL, vec![integer_row(4326)]);

    let srid = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, Some(4326));
    assert_eq!(adapter.queried_sql(), vec![REGISTRY_SQL, SAMPLE_SQL]);
}

#[test]
fn out_of_range_registry_srid_falls_back_to_sampling() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to(REGISTRY_SQL, vec![integer_row(i64::from(i32::MAX) + 1)]);
    adapter.respond_to(SAMPLE_SQL, vec![integer_row(3857)]);

    let srid = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(srid, Some(3857));
}

#[test]
fn sampled_query_doubles_quotes_in_names() {
    let adapter = RecordingAdapter::new();

    MonetDbDialect::default()
        .geometry_srid(None, r#"odd"table"#, "geom", &adapter)
        .expect("srid lookup");

    assert_eq!(
        adapter.queried_sql().last().map(String::as_str),
        Some(r#"SELECT SRID("geom") FROM "sys"."odd""table" WHERE "geom" IS NOT NULL LIMIT 1"#)
    );
}

#[test]
fn sampling_failure_propagates() {
    let adapter = RecordingAdapter::new();
    adapter.fail_on_sql(SAMPLE_SQL, "function SRID does not exist");

    let error = MonetDbDialect::default()
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect_err("sampling failure must propagate");

    assert!(matches!(error, Error::Execute(_)));
}

#[test]
fn configured_schema_is_the_default() {
    let adapter = RecordingAdapter::new();
    let dialect = geodialect_dialect_monetdb::MonetDbDialect::new(
        geodialect_dialect_monetdb::DialectConfig {
            schema: "gis".to_string(),
            ..Default::default()
        },
    );

    dialect
        .geometry_srid(None, "roads", "geom", &adapter)
        .expect("srid lookup");

    assert!(adapter.queried_sql()[0].contains("F_TABLE_SCHEMA = 'gis'"));
    assert!(adapter.queried_sql()[1].contains(r#"FROM "gis"."roads""#));
}
