use geodialect_core::SqlDialect;
use geodialect_dialect_monetdb::MonetDbDialect;
use geodialect_testkit::{RecordingAdapter, integer_row, null_row, text_row};

const DEFAULT_QUERY_PREFIX: &str = r#"SELECT "default" FROM "sys"."_columns""#;

#[test]
fn column_default_query_filters_by_schema_table_and_column() {
    let adapter = RecordingAdapter::new();

    MonetDbDialect::default()
        .sequence_for_column(Some("sys"), "orders", "id", &adapter)
        .expect("sequence lookup");

    assert_eq!(
        adapter.queried_sql(),
        vec![
            r#"SELECT "default" FROM "sys"."_columns" AS columns INNER JOIN sys._tables AS tables ON columns.table_id = tables.id INNER JOIN sys.schemas AS schemas ON tables.schema_id = schemas.id WHERE schemas.name = 'sys' AND tables.name = 'orders' AND columns.name = 'id'"#
        ]
    );
}

#[test]
fn column_default_query_without_schema_matches_any_schema() {
    let adapter = RecordingAdapter::new();

    MonetDbDialect::default()
        .sequence_for_column(None, "orders", "id", &adapter)
        .expect("sequence lookup");

    let sql = &adapter.queried_sql()[0];
    assert!(sql.contains(" WHERE 1=1 AND tables.name = 'orders'"), "{sql}");
    assert!(!sql.contains("sys.schemas"), "{sql}");
}

#[test]
fn sequence_name_is_extracted_from_default_expression() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to_prefix(
        DEFAULT_QUERY_PREFIX,
        vec![text_row(r#"next value for "sys"."seq_orders""#)],
    );

    let sequence = MonetDbDialect::default()
        .sequence_for_column(Some("sys"), "orders", "id", &adapter)
        .expect("sequence lookup");

    assert_eq!(sequence.as_deref(), Some("seq_orders"));
}

#[test]
fn defaults_without_sequence_reference_yield_none() {
    for rows in [vec![text_row("0")], vec![null_row()], Vec::new()] {
        let adapter = RecordingAdapter::new();
        adapter.respond_to_prefix(DEFAULT_QUERY_PREFIX, rows);

        let sequence = MonetDbDialect::default()
            .sequence_for_column(Some("sys"), "orders", "id", &adapter)
            .expect("sequence lookup");

        assert_eq!(sequence, None);
    }
}

#[test]
fn next_sequence_value_calls_nextval() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to("SELECT nextval('seq_orders')", vec![integer_row(42)]);

    let value = MonetDbDialect::default()
        .next_sequence_value(Some("sys"), "seq_orders", &adapter)
        .expect("next value");

    assert_eq!(value, Some(42));
}

#[test]
fn last_generated_value_uses_lastval_after_insert() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to("SELECT lastval()", vec![integer_row(43)]);
    let dialect = MonetDbDialect::default();

    let value = dialect
        .last_auto_generated_value(Some("sys"), "orders", "id", &adapter)
        .expect("last value");

    assert!(dialect.lookup_generated_values_post_insert());
    assert_eq!(value, Some(43));
}
