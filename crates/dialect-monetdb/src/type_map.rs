use geodialect_core::{GeometryType, ValueType};

pub const GENERIC_GEOMETRY_TYPE_NAME: &str = "GEOMETRY";

/// Geometry type names as they appear in the geometry registry and in
/// `geometry (TYPE, SRID)` column types, including measured variants.
pub const GEOMETRY_TYPE_NAMES: &[(&str, ValueType)] = &[
    ("GEOMETRY", ValueType::Geometry(GeometryType::Geometry)),
    ("GEOGRAPHY", ValueType::Geometry(GeometryType::Geometry)),
    ("POINT", ValueType::Geometry(GeometryType::Point)),
    ("POINTM", ValueType::Geometry(GeometryType::Point)),
    ("LINESTRING", ValueType::Geometry(GeometryType::LineString)),
    ("LINESTRINGM", ValueType::Geometry(GeometryType::LineString)),
    ("POLYGON", ValueType::Geometry(GeometryType::Polygon)),
    ("POLYGONM", ValueType::Geometry(GeometryType::Polygon)),
    ("MULTIPOINT", ValueType::Geometry(GeometryType::MultiPoint)),
    ("MULTIPOINTM", ValueType::Geometry(GeometryType::MultiPoint)),
    ("MULTILINESTRING", ValueType::Geometry(GeometryType::MultiLineString)),
    ("MULTILINESTRINGM", ValueType::Geometry(GeometryType::MultiLineString)),
    ("MULTIPOLYGON", ValueType::Geometry(GeometryType::MultiPolygon)),
    ("MULTIPOLYGONM", ValueType::Geometry(GeometryType::MultiPolygon)),
    (
        "GEOMETRYCOLLECTION",
        ValueType::Geometry(GeometryType::GeometryCollection),
    ),
    (
        "GEOMETRYCOLLECTIONM",
        ValueType::Geometry(GeometryType::GeometryCollection),
    ),
    ("BYTEA", ValueType::Bytes),
];

pub const BINDING_TYPE_NAMES: &[(ValueType, &str)] = &[
    (ValueType::Geometry(GeometryType::Geometry), "GEOMETRY"),
    (ValueType::Geometry(GeometryType::Point), "POINT"),
    (ValueType::Geometry(GeometryType::LineString), "LINESTRING"),
    (ValueType::Geometry(GeometryType::Polygon), "POLYGON"),
    (ValueType::Geometry(GeometryType::MultiPoint), "MULTIPOINT"),
    (
        ValueType::Geometry(GeometryType::MultiLineString),
        "MULTILINESTRING",
    ),
    (ValueType::Geometry(GeometryType::MultiPolygon), "MULTIPOLYGON"),
    (
        ValueType::Geometry(GeometryType::GeometryCollection),
        "GEOMETRYCOLLECTION",
    ),
    (ValueType::Bytes, "BYTEA"),
];

/// Column type names reported by the catalog, keyed in lowercase.
pub const SQL_TYPE_NAMES: &[(&str, ValueType)] = &[
    ("multipolygon", ValueType::Geometry(GeometryType::MultiPolygon)),
    ("geometry", ValueType::Geometry(GeometryType::Geometry)),
    ("geography", ValueType::Geometry(GeometryType::Geometry)),
    ("text", ValueType::String),
    ("varchar", ValueType::String),
    ("char", ValueType::String),
    ("character", ValueType::String),
    ("clob", ValueType::String),
    ("int8", ValueType::Long),
    ("bigint", ValueType::Long),
    ("int4", ValueType::Integer),
    ("int", ValueType::Integer),
    ("integer", ValueType::Integer),
    ("int2", ValueType::Short),
    ("smallint", ValueType::Short),
    ("bool", ValueType::Boolean),
    ("boolean", ValueType::Boolean),
    ("float8", ValueType::Double),
    ("double", ValueType::Double),
    ("float4", ValueType::Float),
    ("real", ValueType::Float),
    ("decimal", ValueType::Decimal),
    ("numeric", ValueType::Decimal),
    ("date", ValueType::Date),
    ("time", ValueType::Time),
    ("timetz", ValueType::Time),
    ("timestamp", ValueType::Timestamp),
    ("timestamptz", ValueType::Timestamp),
    ("uuid", ValueType::Uuid),
    ("blob", ValueType::Bytes),
];

pub const SQL_TYPE_NAME_OVERRIDES: &[(ValueType, &str)] = &[
    (ValueType::String, "VARCHAR"),
    (ValueType::Boolean, "BOOL"),
];

/// Case-insensitive lookup over the catalog names, then the geometry names.
#[must_use]
pub fn binding_for_type_name(type_name: &str) -> Option<ValueType> {
    let normalized = type_name.trim().to_ascii_lowercase();
    SQL_TYPE_NAMES
        .iter()
        .chain(GEOMETRY_TYPE_NAMES)
        .find(|(name, _)| name.eq_ignore_ascii_case(&normalized))
        .map(|(_, binding)| *binding)
}

#[must_use]
pub fn geometry_type_name(geometry_type: GeometryType) -> Option<&'static str> {
    type_name_for_binding(ValueType::Geometry(geometry_type))
}

#[must_use]
pub fn type_name_for_binding(binding: ValueType) -> Option<&'static str> {
    BINDING_TYPE_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == binding)
        .map(|(_, name)| *name)
}

#[must_use]
pub fn sql_type_name_override(binding: ValueType) -> Option<&'static str> {
    SQL_TYPE_NAME_OVERRIDES
        .iter()
        .find(|(candidate, _)| *candidate == binding)
        .map(|(_, name)| *name)
}
