#[path = "support/fake_spatial_dialect.rs"]
mod fake_spatial_dialect;

use fake_spatial_dialect::{FakeSpatialDialect, VERSION_QUERY};
use geodialect_testkit::{TestResult, load_test_cases_from_str, run_offline_test};

fn case(yaml: &str, name: &str) -> geodialect_testkit::TestCase {
    load_test_cases_from_str(yaml)
        .expect("yaml must parse")
        .remove(name)
        .expect("named testcase must be present")
}

fn two_column_yaml(executed: &str) -> String {
    format!(
        r#"
two_columns:
  schema: gis
  table: roads
  geometries:
    - {{ name: geom, type: LineString, srid: 4326 }}
    - {{ name: centroid, type: Point }}
  responses:
    "{VERSION_QUERY}": [["3.4"]]
  executed:
{executed}
"#
    )
}

#[test]
fn offline_runner_passes_when_executed_sql_matches() {
    let yaml = two_column_yaml(
        "    - REGISTER gis.roads.geom v3.4\n    - REGISTER gis.roads.centroid v3.4",
    );
    let testcase = case(&yaml, "two_columns");

    assert_eq!(
        run_offline_test(FakeSpatialDialect::default, &testcase),
        TestResult::Passed
    );
}

#[test]
fn offline_runner_fails_on_statement_mismatch() {
    let yaml = two_column_yaml("    - REGISTER gis.roads.geom v3.4");
    let testcase = case(&yaml, "two_columns");

    let result = run_offline_test(FakeSpatialDialect::default, &testcase);
    let TestResult::Failed(message) = result else {
        panic!("mismatched statements must fail, got {result:?}");
    };
    assert!(
        message.contains("executed SQL mismatch"),
        "unexpected failure message: {message}"
    );
}

#[test]
fn offline_runner_enforces_expected_error_contract() {
    let yaml = format!(
        r#"
failing_register:
  table: roads
  geometries:
    - {{ name: geom, type: Point }}
  fail_on:
    "REGISTER main.roads.geom v": "registry is read-only"
  error: "statement failed: REGISTER main.roads.geom v: registry is read-only"
missing_error:
  table: roads
  geometries:
    - {{ name: geom, type: Point }}
  responses:
    "{VERSION_QUERY}": [[~]]
  error: "statement failed: REGISTER main.roads.geom v: registry is read-only"
"#
    );

    assert_eq!(
        run_offline_test(
            FakeSpatialDialect::default,
            &case(&yaml, "failing_register")
        ),
        TestResult::Passed,
        "matching expected error must pass"
    );
    assert!(
        matches!(
            run_offline_test(FakeSpatialDialect::default, &case(&yaml, "missing_error")),
            TestResult::Failed(_)
        ),
        "successful execution with `error` expectation must fail"
    );
}

#[test]
fn offline_runner_rejects_unknown_geometry_type() {
    let yaml = r#"
bad_type:
  table: roads
  geometries:
    - { name: geom, type: Blob }
"#;

    let result = run_offline_test(FakeSpatialDialect::default, &case(yaml, "bad_type"));
    let TestResult::Failed(message) = result else {
        panic!("unknown geometry type must fail, got {result:?}");
    };
    assert!(message.contains("unknown geometry type 'Blob'"), "{message}");
}

#[test]
fn offline_runner_runs_drop_operation() {
    let yaml = r#"
drop:
  operation: drop_table
  table: roads
  executed:
    - UNREGISTER main.roads
"#;

    assert_eq!(
        run_offline_test(FakeSpatialDialect::default, &case(yaml, "drop")),
        TestResult::Passed
    );
}

#[test]
fn offline_runner_honours_skip_reason() {
    let yaml = r#"
skipped:
  table: roads
  skip: needs a live server
"#;

    assert_eq!(
        run_offline_test(FakeSpatialDialect::default, &case(yaml, "skipped")),
        TestResult::Skipped("needs a live server".to_string())
    );
}
