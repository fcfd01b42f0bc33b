use std::collections::BTreeMap;

use geodialect_core::{
    FeatureType, GeometryDescriptor, GeometryType, Result, Row, SqlDialect, SqlValue, Version,
    execution_error,
};
use serde::Deserialize;

use crate::RecordingAdapter;

const RUNNER_LABEL: &str = "yaml testcase";

/// One DDL scenario: a feature type, what the connection answers, and the
/// statements the dialect is expected to execute.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestCase {
    pub operation: Operation,
    pub schema: Option<String>,
    pub table: String,
    pub geometries: Vec<GeometryColumn>,
    /// `None` resolves to auto-commit at execution time.
    pub auto_commit: Option<bool>,
    pub server_version: Option<String>,
    /// Query text to returned rows; `~` cells are SQL NULL.
    pub responses: BTreeMap<String, Vec<Vec<Option<Cell>>>>,
    /// Statement text to the failure message it raises.
    pub fail_on: BTreeMap<String, String>,
    pub executed: Option<Vec<String>>,
    pub error: Option<String>,
    pub skip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[default]
    CreateTable,
    DropTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub geometry_type: String,
    #[serde(default)]
    pub srid: Option<i32>,
    #[serde(default)]
    pub native_srid: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Skipped(String),
    Failed(String),
}

pub fn load_test_cases_from_str(
    yaml: &str,
) -> std::result::Result<BTreeMap<String, TestCase>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Runs one scenario against a fresh dialect built by `new_dialect`, so
/// memoized versions never leak between cases.
pub fn run_offline_test<D, F>(new_dialect: F, test: &TestCase) -> TestResult
where
    D: SqlDialect,
    F: FnOnce() -> D,
{
    if let Some(reason) = &test.skip {
        return TestResult::Skipped(reason.clone());
    }

    let dialect = new_dialect();
    let adapter = RecordingAdapter::new();
    let outcome = prepare_adapter(&adapter, test)
        .and_then(|()| run_operation(&dialect, &adapter, test));

    match evaluate_expected_error(test, outcome)
        .and_then(|()| assert_executed_sql(test, &adapter.executed_sql()))
    {
        Ok(()) => TestResult::Passed,
        Err(error) => TestResult::Failed(error.to_string()),
    }
}

pub fn feature_type_for(test: &TestCase) -> Result<FeatureType> {
    let mut feature_type = FeatureType::new(&test.table);
    for column in &test.geometries {
        let geometry_type = GeometryType::from_wkt_tag(&column.geometry_type).ok_or_else(|| {
            runner_assertion_error(format!(
                "unknown geometry type '{}' for column '{}'",
                column.geometry_type, column.name
            ))
        })?;

        let mut descriptor = GeometryDescriptor::new(&column.name, geometry_type);
        descriptor.crs_epsg = column.srid;
        descriptor.native_srid = column.native_srid;
        feature_type = feature_type.with_geometry(descriptor);
    }
    Ok(feature_type)
}

fn prepare_adapter(adapter: &RecordingAdapter, test: &TestCase) -> Result<()> {
    adapter.set_auto_commit(test.auto_commit.unwrap_or(true));

    if let Some(raw) = test.server_version.as_deref() {
        let version = Version::parse(raw).ok_or_else(|| {
            runner_assertion_error(format!("invalid server_version '{raw}'"))
        })?;
        adapter.set_server_version(version);
    }

    for (sql, rows) in &test.responses {
        adapter.respond_to(sql.trim(), rows.iter().map(|cells| row_from_cells(cells)).collect());
    }
    for (sql, message) in &test.fail_on {
        adapter.fail_on_sql(sql.trim(), message);
    }

    Ok(())
}

fn run_operation(dialect: &dyn SqlDialect, adapter: &RecordingAdapter, test: &TestCase) -> Result<()> {
    let feature_type = feature_type_for(test)?;
    let schema = test.schema.as_deref();

    match test.operation {
        Operation::CreateTable => dialect.post_create_table(schema, &feature_type, adapter),
        Operation::DropTable => dialect.post_drop_table(schema, &feature_type, adapter),
    }
}

fn row_from_cells(cells: &[Option<Cell>]) -> Row {
    Row::new(
        cells
            .iter()
            .map(|cell| match cell {
                None => SqlValue::Null,
                Some(Cell::Bool(value)) => SqlValue::Bool(*value),
                Some(Cell::Integer(value)) => SqlValue::Integer(*value),
                Some(Cell::Double(value)) => SqlValue::Double(*value),
                Some(Cell::Text(value)) => SqlValue::Text(value.clone()),
            })
            .collect(),
    )
}

fn evaluate_expected_error(test: &TestCase, execution_result: Result<()>) -> Result<()> {
    let Some(expected_error) = test.error.as_deref() else {
        return execution_result;
    };

    match execution_result {
        Ok(()) => Err(runner_assertion_error(format!(
            "expected error: {expected_error}, but got no error"
        ))),
        Err(actual_error) => {
            let actual_error = actual_error.to_string();
            if actual_error == expected_error {
                Ok(())
            } else {
                Err(runner_assertion_error(format!(
                    "expected error: {expected_error}, but got: {actual_error}"
                )))
            }
        }
    }
}

fn assert_executed_sql(test: &TestCase, actual: &[String]) -> Result<()> {
    let Some(expected) = &test.executed else {
        return Ok(());
    };

    let expected = expected.iter().map(|sql| sql.trim()).collect::<Vec<_>>();
    let actual_trimmed = actual.iter().map(|sql| sql.trim()).collect::<Vec<_>>();
    if expected == actual_trimmed {
        return Ok(());
    }

    Err(runner_assertion_error(format!(
        "executed SQL mismatch; expected:\n{}\nactual:\n{}",
        expected.join("\n"),
        actual_trimmed.join("\n")
    )))
}

fn runner_assertion_error(message: impl Into<String>) -> geodialect_core::Error {
    execution_error(RUNNER_LABEL, message)
}
