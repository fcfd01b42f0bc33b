use std::fmt::Write as _;

use crate::GeometryType;

/// In-memory binding of an attribute or database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Geometry(GeometryType),
    String,
    Boolean,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    Timestamp,
    Uuid,
    Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
}

/// Literal encoding shared by every dialect: single quotes doubled inside text,
/// numbers and booleans bare, bytes as an `X'..'` hex literal.
pub fn encode_default_value(value: &ScalarValue, sql: &mut String) {
    match value {
        ScalarValue::Null => sql.push_str("NULL"),
        ScalarValue::Bool(true) => sql.push_str("TRUE"),
        ScalarValue::Bool(false) => sql.push_str("FALSE"),
        ScalarValue::Integer(value) => {
            write!(sql, "{value}").expect("writing to String should not fail");
        }
        ScalarValue::Double(value) if value.is_finite() => {
            write!(sql, "{value}").expect("writing to String should not fail");
        }
        ScalarValue::Double(value) => encode_default_text(&value.to_string(), sql),
        ScalarValue::Text(value) => encode_default_text(value, sql),
        ScalarValue::Bytes(bytes) => {
            sql.push_str("X'");
            for byte in bytes {
                write!(sql, "{byte:02x}").expect("writing to String should not fail");
            }
            sql.push('\'');
        }
    }
}

pub fn encode_default_text(value: &str, sql: &mut String) {
    sql.push('\'');
    sql.push_str(&value.replace('\'', "''"));
    sql.push('\'');
}
