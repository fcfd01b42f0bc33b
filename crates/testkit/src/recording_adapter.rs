use std::cell::RefCell;

use geodialect_core::{DatabaseAdapter, Result, Row, SqlValue, Version, execution_error};

pub const COMMIT_SQL: &str = "COMMIT";

#[derive(Debug, Clone)]
enum SqlMatch {
    Exact(String),
    Prefix(String),
}

impl SqlMatch {
    fn matches(&self, sql: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == sql,
            Self::Prefix(prefix) => sql.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    matcher: SqlMatch,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct FailureRule {
    matcher: SqlMatch,
    message: String,
}

/// Connection stand-in that records every statement and answers queries from
/// a script. Unscripted queries return no rows.
#[derive(Debug)]
pub struct RecordingAdapter {
    state: RefCell<RecordingState>,
}

#[derive(Debug)]
struct RecordingState {
    server_version: Version,
    auto_commit: bool,
    executed_sql: Vec<String>,
    queried_sql: Vec<String>,
    responses: Vec<ScriptedResponse>,
    failures: Vec<FailureRule>,
    commit_count: usize,
    server_version_calls: usize,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self {
            server_version: Version::new(11, 47, 0),
            auto_commit: true,
            executed_sql: Vec::new(),
            queried_sql: Vec::new(),
            responses: Vec::new(),
            failures: Vec::new(),
            commit_count: 0,
            server_version_calls: 0,
        }
    }
}

impl Default for RecordingAdapter {
    fn default() -> Self {
        Self {
            state: RefCell::new(RecordingState::default()),
        }
    }
}

impl RecordingAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_server_version(&self, version: Version) {
        self.state.borrow_mut().server_version = version;
    }

    pub fn set_auto_commit(&self, auto_commit: bool) {
        self.state.borrow_mut().auto_commit = auto_commit;
    }

    /// Rows returned for a query whose text equals `sql`. Earlier scripts win.
    pub fn respond_to(&self, sql: impl Into<String>, rows: Vec<Row>) {
        self.state.borrow_mut().responses.push(ScriptedResponse {
            matcher: SqlMatch::Exact(sql.into()),
            rows,
        });
    }

    pub fn respond_to_prefix(&self, prefix: impl Into<String>, rows: Vec<Row>) {
        self.state.borrow_mut().responses.push(ScriptedResponse {
            matcher: SqlMatch::Prefix(prefix.into()),
            rows,
        });
    }

    /// Makes statements and queries equal to `sql` fail with `message`.
    pub fn fail_on_sql(&self, sql: impl Into<String>, message: impl Into<String>) {
        self.state.borrow_mut().failures.push(FailureRule {
            matcher: SqlMatch::Exact(sql.into()),
            message: message.into(),
        });
    }

    pub fn fail_on_prefix(&self, prefix: impl Into<String>, message: impl Into<String>) {
        self.state.borrow_mut().failures.push(FailureRule {
            matcher: SqlMatch::Prefix(prefix.into()),
            message: message.into(),
        });
    }

    pub fn clear_failures(&self) {
        self.state.borrow_mut().failures.clear();
    }

    /// Statements passed to `execute` plus commits, in order. Failed
    /// statements are not recorded.
    #[must_use]
    pub fn executed_sql(&self) -> Vec<String> {
        self.state.borrow().executed_sql.clone()
    }

    /// Every query issued, including failed ones.
    #[must_use]
    pub fn queried_sql(&self) -> Vec<String> {
        self.state.borrow().queried_sql.clone()
    }

    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.state.borrow().commit_count
    }

    #[must_use]
    pub fn server_version_calls(&self) -> usize {
        self.state.borrow().server_version_calls
    }

    fn failure_for(state: &RecordingState, sql: &str) -> Option<String> {
        state
            .failures
            .iter()
            .find(|rule| rule.matcher.matches(sql))
            .map(|rule| rule.message.clone())
    }
}

impl DatabaseAdapter for RecordingAdapter {
    fn execute(&self, sql: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = Self::failure_for(&state, sql) {
            return Err(execution_error(sql, message));
        }

        state.executed_sql.push(sql.to_string());
        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<Row>> {
        let mut state = self.state.borrow_mut();
        state.queried_sql.push(sql.to_string());
        if let Some(message) = Self::failure_for(&state, sql) {
            return Err(execution_error(sql, message));
        }

        Ok(state
            .responses
            .iter()
            .find(|response| response.matcher.matches(sql))
            .map(|response| response.rows.clone())
            .unwrap_or_default())
    }

    fn auto_commit(&self) -> bool {
        self.state.borrow().auto_commit
    }

    fn commit(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = Self::failure_for(&state, COMMIT_SQL) {
            return Err(execution_error(COMMIT_SQL, message));
        }

        state.executed_sql.push(COMMIT_SQL.to_string());
        state.commit_count += 1;
        Ok(())
    }

    fn server_version(&self) -> Result<Version> {
        let mut state = self.state.borrow_mut();
        state.server_version_calls += 1;
        Ok(state.server_version.clone())
    }
}

#[must_use]
pub fn text_row(value: &str) -> Row {
    Row::new(vec![SqlValue::Text(value.to_string())])
}

#[must_use]
pub fn integer_row(value: i64) -> Row {
    Row::new(vec![SqlValue::Integer(value)])
}

#[must_use]
pub fn null_row() -> Row {
    Row::new(vec![SqlValue::Null])
}
