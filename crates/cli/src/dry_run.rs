use std::cell::RefCell;

use geodialect_core::{DatabaseAdapter, Result, Row, SqlValue, Version};

const SERVER_VERSION: Version = Version::new(11, 47, 0);

/// Connection stand-in that collects statements instead of running them.
///
/// Post-create DDL issues a single query, the spatial library version lookup,
/// so every query is answered with the configured version banner.
pub(crate) struct DryRunAdapter {
    spatial_version: Version,
    statements: RefCell<Vec<String>>,
}

impl DryRunAdapter {
    pub(crate) fn new(spatial_version: Version) -> Self {
        Self {
            spatial_version,
            statements: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn into_statements(self) -> Vec<String> {
        self.statements.into_inner()
    }
}

impl DatabaseAdapter for DryRunAdapter {
    fn execute(&self, sql: &str) -> Result<()> {
        self.statements.borrow_mut().push(sql.to_string());
        Ok(())
    }

    fn query(&self, _sql: &str) -> Result<Vec<Row>> {
        Ok(vec![Row::new(vec![SqlValue::Text(
            self.spatial_version.to_string(),
        )])])
    }

    fn auto_commit(&self) -> bool {
        true
    }

    fn commit(&self) -> Result<()> {
        Ok(())
    }

    fn server_version(&self) -> Result<Version> {
        Ok(SERVER_VERSION)
    }
}
