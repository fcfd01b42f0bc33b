use std::cell::RefCell;

use geodialect_core::{DatabaseAdapter, Result, Row, Version, execution_error};

/// Records executed statements and answers every query with the same rows.
#[derive(Debug, Default)]
pub struct StatementLogAdapter {
    executed: RefCell<Vec<String>>,
    rows: Vec<Row>,
    failing_prefix: Option<String>,
}

#[allow(dead_code)]
impl StatementLogAdapter {
    pub fn answering(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing_on(prefix: &str) -> Self {
        Self {
            failing_prefix: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl DatabaseAdapter for StatementLogAdapter {
    fn execute(&self, sql: &str) -> Result<()> {
        if let Some(prefix) = &self.failing_prefix
            && sql.starts_with(prefix.as_str())
        {
            return Err(execution_error(sql, "rejected"));
        }
        self.executed.borrow_mut().push(sql.to_string());
        Ok(())
    }

    fn query(&self, _sql: &str) -> Result<Vec<Row>> {
        Ok(self.rows.clone())
    }

    fn auto_commit(&self) -> bool {
        false
    }

    fn commit(&self) -> Result<()> {
        self.execute("COMMIT")
    }

    fn server_version(&self) -> Result<Version> {
        Ok(Version::new(11, 47, 0))
    }
}
