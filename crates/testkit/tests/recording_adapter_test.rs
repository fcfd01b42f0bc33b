use geodialect_core::{DatabaseAdapter, Error, ExecutionError, Savepoint, Version};
use geodialect_testkit::{COMMIT_SQL, RecordingAdapter, integer_row, text_row};

#[test]
fn scripted_queries_answer_by_exact_text_then_prefix() {
    let adapter = RecordingAdapter::new();
    adapter.respond_to("SELECT srid FROM t", vec![integer_row(4326)]);
    adapter.respond_to_prefix("SELECT name", vec![text_row("roads")]);

    let exact = adapter.query("SELECT srid FROM t").expect("exact query");
    let prefixed = adapter.query("SELECT name FROM tables").expect("prefix query");
    let unscripted = adapter.query("SELECT 1").expect("unscripted query");

    assert_eq!(exact, vec![integer_row(4326)]);
    assert_eq!(prefixed, vec![text_row("roads")]);
    assert!(unscripted.is_empty());
    assert_eq!(
        adapter.queried_sql(),
        vec!["SELECT srid FROM t", "SELECT name FROM tables", "SELECT 1"]
    );
}

#[test]
fn failing_statements_are_not_recorded_as_executed() {
    let adapter = RecordingAdapter::new();
    adapter.fail_on_sql("DROP TABLE t", "permission denied");

    adapter.execute("CREATE TABLE t (id INT)").expect("create");
    let error = adapter.execute("DROP TABLE t").expect_err("drop must fail");

    assert!(matches!(
        &error,
        Error::Execute(ExecutionError::StatementFailed { sql, .. }) if sql == "DROP TABLE t"
    ));
    assert_eq!(error.to_string(), "statement failed: DROP TABLE t: permission denied");
    assert_eq!(adapter.executed_sql(), vec!["CREATE TABLE t (id INT)"]);
}

#[test]
fn commit_is_recorded_and_counted() {
    let adapter = RecordingAdapter::new();
    adapter.set_auto_commit(false);

    assert!(!adapter.auto_commit());
    adapter.commit().expect("commit");

    assert_eq!(adapter.executed_sql(), vec![COMMIT_SQL]);
    assert_eq!(adapter.commit_count(), 1);
}

#[test]
fn server_version_is_configurable_and_calls_are_counted() {
    let adapter = RecordingAdapter::new();
    adapter.set_server_version(Version::new(9, 0, 4));

    assert_eq!(adapter.server_version().expect("version"), Version::new(9, 0, 4));
    assert_eq!(adapter.server_version_calls(), 1);
}

#[test]
fn savepoint_guard_rolls_back_through_recording_adapter() {
    let adapter = RecordingAdapter::new();

    {
        let _savepoint = Savepoint::begin(&adapter, "probe").expect("savepoint");
    }

    assert_eq!(
        adapter.executed_sql(),
        vec![
            "SAVEPOINT probe",
            "ROLLBACK TO SAVEPOINT probe",
            "RELEASE SAVEPOINT probe",
        ]
    );
}
