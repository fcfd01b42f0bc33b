use std::collections::BTreeMap;

use crate::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Integer,
    Bool,
}

impl ParamKind {
    fn expected(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Bool => "a boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Text(&'static str),
    Integer(i64),
    Bool(bool),
}

/// Descriptor of one connection parameter accepted by a data store factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub key: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    pub sample: Option<Sample>,
}

impl Param {
    #[must_use]
    pub const fn new(
        key: &'static str,
        kind: ParamKind,
        description: &'static str,
        required: bool,
        sample: Option<Sample>,
    ) -> Self {
        Self {
            key,
            kind,
            description,
            required,
            sample,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Parameter bag handed to a factory. Textual values are converted to the
/// declared kind on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn lookup_text(&self, param: &Param) -> Result<Option<String>> {
        match self.values.get(param.key) {
            None => Ok(None),
            Some(ParamValue::Text(value)) => Ok(Some(value.clone())),
            Some(ParamValue::Integer(value)) => Ok(Some(value.to_string())),
            Some(ParamValue::Bool(value)) => Ok(Some(value.to_string())),
        }
    }

    pub fn lookup_integer(&self, param: &Param) -> Result<Option<i64>> {
        match self.values.get(param.key) {
            None => Ok(None),
            Some(ParamValue::Integer(value)) => Ok(Some(*value)),
            Some(ParamValue::Text(value)) => value
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| invalid(param)),
            Some(ParamValue::Bool(_)) => Err(invalid(param)),
        }
    }

    pub fn lookup_bool(&self, param: &Param) -> Result<Option<bool>> {
        match self.values.get(param.key) {
            None => Ok(None),
            Some(ParamValue::Bool(value)) => Ok(Some(*value)),
            Some(ParamValue::Text(value)) if value.trim().eq_ignore_ascii_case("true") => {
                Ok(Some(true))
            }
            Some(ParamValue::Text(value)) if value.trim().eq_ignore_ascii_case("false") => {
                Ok(Some(false))
            }
            Some(_) => Err(invalid(param)),
        }
    }

    pub fn require_text(&self, param: &Param) -> Result<String> {
        self.lookup_text(param)?.ok_or_else(|| missing(param))
    }

    pub fn text_or_sample(&self, param: &Param) -> Result<Option<String>> {
        match self.lookup_text(param)? {
            Some(value) => Ok(Some(value)),
            None => match param.sample {
                Some(Sample::Text(sample)) => Ok(Some(sample.to_string())),
                _ => Ok(None),
            },
        }
    }

    pub fn integer_or_sample(&self, param: &Param) -> Result<Option<i64>> {
        match self.lookup_integer(param)? {
            Some(value) => Ok(Some(value)),
            None => match param.sample {
                Some(Sample::Integer(sample)) => Ok(Some(sample)),
                _ => Ok(None),
            },
        }
    }

    pub fn bool_or_sample(&self, param: &Param) -> Result<bool> {
        match self.lookup_bool(param)? {
            Some(value) => Ok(value),
            None => Ok(matches!(param.sample, Some(Sample::Bool(true)))),
        }
    }
}

fn missing(param: &Param) -> crate::Error {
    ConfigError::MissingParameter {
        key: param.key.to_string(),
    }
    .into()
}

fn invalid(param: &Param) -> crate::Error {
    ConfigError::InvalidParameter {
        key: param.key.to_string(),
        expected: param.kind.expected(),
    }
    .into()
}
