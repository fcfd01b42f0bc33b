use std::{error::Error as StdError, fmt};

use thiserror::Error;

use crate::geometry::WktError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryFormatError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryText {
    Geometry,
    Envelope,
}

impl fmt::Display for GeometryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry => f.write_str("geometry"),
            Self::Envelope => f.write_str("envelope"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeometryFormatError {
    #[error("failed to parse {target} WKT: {source}")]
    Parse {
        target: GeometryText,
        #[source]
        source: WktError,
    },
    #[error("failed to write geometry WKT: {source}")]
    Write {
        #[source]
        source: WktError,
    },
}

impl GeometryFormatError {
    #[must_use]
    pub fn geometry(source: WktError) -> Self {
        Self::Parse {
            target: GeometryText::Geometry,
            source,
        }
    }

    #[must_use]
    pub fn envelope(source: WktError) -> Self {
        Self::Parse {
            target: GeometryText::Envelope,
            source,
        }
    }

    #[must_use]
    pub fn write(source: WktError) -> Self {
        Self::Write { source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required parameter `{key}`")]
    MissingParameter { key: String },
    #[error("parameter `{key}` must be {expected}")]
    InvalidParameter { key: String, expected: &'static str },
    #[error("dbtype `{actual}` does not match `{expected}`")]
    DbTypeMismatch { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("filter `{filter}` is not supported by dialect `{dialect}`")]
    UnsupportedFilter { filter: String, dialect: String },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("statement failed: {sql}: {source}")]
    StatementFailed {
        sql: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("column[{column}] of `{sql}` is not {expected}")]
    UnexpectedValue {
        sql: String,
        column: usize,
        expected: &'static str,
    },
}

impl ExecutionError {
    pub fn statement_failed<E>(sql: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::StatementFailed {
            sql: sql.into(),
            source: Box::new(source),
        }
    }
}
