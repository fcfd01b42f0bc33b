use std::io;

use crate::{ExecutionError, Result, Version};

const SAVEPOINT_SQL: &str = "SAVEPOINT";
const RELEASE_SAVEPOINT_SQL: &str = "RELEASE SAVEPOINT";
const ROLLBACK_TO_SAVEPOINT_SQL: &str = "ROLLBACK TO SAVEPOINT";

/// Connection handle supplied by the driver layer. Every dialect operation runs
/// synchronously on the handle it is given; cancellation and timeouts belong to
/// the implementation.
pub trait DatabaseAdapter {
    fn execute(&self, sql: &str) -> Result<()>;
    fn query(&self, sql: &str) -> Result<Vec<Row>>;
    fn auto_commit(&self) -> bool;
    fn commit(&self) -> Result<()>;
    fn server_version(&self) -> Result<Version>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    #[must_use]
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(&self, column: usize) -> Option<&SqlValue> {
        self.values.get(column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn text(&self, column: usize, sql: &str) -> Result<Option<String>> {
        match self.values.get(column) {
            Some(SqlValue::Null) => Ok(None),
            Some(SqlValue::Text(value)) => Ok(Some(value.clone())),
            Some(SqlValue::Integer(value)) => Ok(Some(value.to_string())),
            Some(SqlValue::Double(value)) => Ok(Some(value.to_string())),
            Some(SqlValue::Bool(value)) => Ok(Some(value.to_string())),
            _ => Err(unexpected_value(sql, column, "text")),
        }
    }

    pub fn i64(&self, column: usize, sql: &str) -> Result<Option<i64>> {
        match self.values.get(column) {
            Some(SqlValue::Null) => Ok(None),
            Some(SqlValue::Integer(value)) => Ok(Some(*value)),
            Some(SqlValue::Text(value)) => value
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| unexpected_value(sql, column, "an integer")),
            _ => Err(unexpected_value(sql, column, "an integer")),
        }
    }

    pub fn i32(&self, column: usize, sql: &str) -> Result<Option<i32>> {
        match self.i64(column, sql)? {
            None => Ok(None),
            Some(value) => i32::try_from(value)
                .map(Some)
                .map_err(|_| unexpected_value(sql, column, "a 32-bit integer")),
        }
    }
}

/// Scoped transaction checkpoint. Dropping a savepoint that was neither
/// released nor rolled back rolls it back.
pub struct Savepoint<'a> {
    adapter: &'a dyn DatabaseAdapter,
    name: String,
    finished: bool,
}

impl<'a> Savepoint<'a> {
    pub fn begin(adapter: &'a dyn DatabaseAdapter, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        adapter.execute(&format!("{SAVEPOINT_SQL} {name}"))?;
        Ok(Self {
            adapter,
            name,
            finished: false,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn release(mut self) -> Result<()> {
        self.finished = true;
        self.adapter
            .execute(&format!("{RELEASE_SAVEPOINT_SQL} {}", self.name))
    }

    pub fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.rollback_and_release()
    }

    fn rollback_and_release(&self) -> Result<()> {
        self.adapter
            .execute(&format!("{ROLLBACK_TO_SAVEPOINT_SQL} {}", self.name))?;
        self.adapter
            .execute(&format!("{RELEASE_SAVEPOINT_SQL} {}", self.name))
    }
}

impl Drop for Savepoint<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.rollback_and_release();
        }
    }
}

pub fn query_scalar_i64(adapter: &dyn DatabaseAdapter, sql: &str) -> Result<Option<i64>> {
    match adapter.query(sql)?.first() {
        Some(row) => row.i64(0, sql),
        None => Ok(None),
    }
}

pub fn query_scalar_text(adapter: &dyn DatabaseAdapter, sql: &str) -> Result<Option<String>> {
    match adapter.query(sql)?.first() {
        Some(row) => row.text(0, sql),
        None => Ok(None),
    }
}

pub fn execution_error(sql: &str, message: impl Into<String>) -> crate::Error {
    ExecutionError::statement_failed(sql, io::Error::other(message.into())).into()
}

fn unexpected_value(sql: &str, column: usize, expected: &'static str) -> crate::Error {
    ExecutionError::UnexpectedValue {
        sql: sql.to_string(),
        column,
        expected,
    }
    .into()
}
