mod adapter;
mod config;
mod dialect;
mod error;
mod feature;
mod filter;
mod geometry;
mod params;
mod value;

pub use adapter::{
    DatabaseAdapter, Row, Savepoint, SqlValue, execution_error, query_scalar_i64,
    query_scalar_text,
};
pub use config::{ConnectionConfig, Version};
pub use dialect::SqlDialect;
pub use error::{
    ConfigError, Error, ExecutionError, GenerateError, GeometryFormatError, GeometryText, Result,
};
pub use feature::{AttributeDescriptor, FeatureType, GeometryDescriptor, Hints};
pub use filter::{
    ComparisonOp, Expr, Filter, FilterToSql, SpatialOp, encode_expr, encode_filter, unsupported,
};
pub use geometry::{
    Envelope, Geometry, GeometryFactory, GeometryType, PrecisionModel, ReferencedEnvelope,
    WktError, read_wkt, write_wkt,
};
pub use params::{Param, ParamKind, ParamValue, Params, Sample};
pub use value::{ScalarValue, ValueType, encode_default_text, encode_default_value};
pub use wkt::{self, Wkt};
