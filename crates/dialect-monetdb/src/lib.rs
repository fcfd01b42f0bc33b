mod catalog_queries;
mod codec;
mod config;
mod dialect;
mod factory;
mod filter_to_sql;
mod quoting;
pub mod type_map;

pub use codec::WktCodec;
pub use config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEMA, DialectConfig};
pub use dialect::{
    DIALECT_NAME, HEX_BYTEA_SERVER_VERSION, IN_PLACE_GEOMETRY_TYPE_VERSION, MonetDbDialect,
    UNKNOWN_SRID,
};
pub use factory::{
    DATABASE, DBTYPE, DataSource, DataStoreSetup, ENCODE_FUNCTIONS, ESTIMATED_EXTENTS, HOST,
    JNDI_REFERENCE_NAME, LOOSE_BBOX, MonetDbDataStoreFactory, MonetDbJndiDataStoreFactory,
    PASSWD, PORT, SCHEMA, USER,
};
pub use filter_to_sql::MonetDbFilterToSql;
pub use quoting::{prepare_identifier, quote_identifier, quote_value};
