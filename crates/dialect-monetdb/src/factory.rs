use std::collections::BTreeMap;

use geodialect_core::{
    ConfigError, ConnectionConfig, Param, ParamKind, Params, Result, Sample,
};
use tracing::debug;

use crate::{
    DialectConfig, MonetDbDialect,
    config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEMA},
    dialect::DIALECT_NAME,
};

const DISPLAY_NAME: &str = "MonetDB";
const DESCRIPTION: &str = "MonetDB/GeoSpatial database";
const DRIVER_CLASS_NAME: &str = "nl.cwi.monetdb.jdbc.MonetDriver";
const VALIDATION_QUERY: &str = "select now()";
const URL_SCHEME: &str = "jdbc:monetdb";
const FETCH_SIZE: u32 = 0;
const DEFAULT_USER: &str = "monetdb";

pub const DBTYPE: Param = Param::new(
    "dbtype",
    ParamKind::Text,
    "Type",
    true,
    Some(Sample::Text(DIALECT_NAME)),
);
pub const HOST: Param = Param::new(
    "host",
    ParamKind::Text,
    "Host",
    false,
    Some(Sample::Text(DEFAULT_HOST)),
);
pub const PORT: Param = Param::new(
    "port",
    ParamKind::Integer,
    "Port",
    false,
    Some(Sample::Integer(DEFAULT_PORT as i64)),
);
pub const DATABASE: Param = Param::new("database", ParamKind::Text, "Database", true, None);
pub const SCHEMA: Param = Param::new(
    "schema",
    ParamKind::Text,
    "Schema",
    false,
    Some(Sample::Text(DEFAULT_SCHEMA)),
);
pub const USER: Param = Param::new(
    "user",
    ParamKind::Text,
    "user name to login as",
    false,
    Some(Sample::Text(DEFAULT_USER)),
);
pub const PASSWD: Param = Param::new(
    "passwd",
    ParamKind::Text,
    "password used to login",
    false,
    None,
);
pub const LOOSE_BBOX: Param = Param::new(
    "Loose bbox",
    ParamKind::Bool,
    "Perform only primary filter on bbox",
    false,
    Some(Sample::Bool(false)),
);
pub const ESTIMATED_EXTENTS: Param = Param::new(
    "Estimated extends",
    ParamKind::Bool,
    "Use the spatial index information to quickly get an estimate of the data bounds",
    false,
    Some(Sample::Bool(false)),
);
pub const ENCODE_FUNCTIONS: Param = Param::new(
    "encode functions",
    ParamKind::Bool,
    "set to true to have a set of filter functions be translated directly in SQL. \
     Due to differences in the type systems the result might not be the same as evaluating \
     them in memory, including the SQL failing with errors while the in memory version works fine. \
     However this allows to push more of the filter into the database, increasing performance.",
    false,
    Some(Sample::Bool(false)),
);
pub const JNDI_REFERENCE_NAME: Param = Param::new(
    "jndiReferenceName",
    ParamKind::Text,
    "JNDI data source",
    true,
    None,
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url {
        url: String,
        connection: ConnectionConfig,
    },
    Jndi {
        name: String,
    },
}

/// Everything the store layer needs to open connections and talk MonetDB.
#[derive(Debug)]
pub struct DataStoreSetup {
    pub source: DataSource,
    pub user: Option<String>,
    pub password: Option<String>,
    pub fetch_size: u32,
    pub validation_query: &'static str,
    pub dialect: MonetDbDialect,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MonetDbDataStoreFactory;

impl MonetDbDataStoreFactory {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        DESCRIPTION
    }

    #[must_use]
    pub fn database_id(&self) -> &'static str {
        DIALECT_NAME
    }

    #[must_use]
    pub fn driver_class_name(&self) -> &'static str {
        DRIVER_CLASS_NAME
    }

    #[must_use]
    pub fn validation_query(&self) -> &'static str {
        VALIDATION_QUERY
    }

    #[must_use]
    pub fn parameters(&self) -> Vec<Param> {
        vec![
            DBTYPE,
            HOST,
            PORT,
            DATABASE,
            SCHEMA,
            USER,
            PASSWD,
            LOOSE_BBOX,
            ESTIMATED_EXTENTS,
            ENCODE_FUNCTIONS,
        ]
    }

    #[must_use]
    pub fn can_process(&self, params: &Params) -> bool {
        check_db_type(params).is_ok() && has_required(params, &self.parameters())
    }

    /// `jdbc:monetdb://<host>:<port>/<database>`; host and port fall back to
    /// their defaults.
    pub fn jdbc_url(&self, params: &Params) -> Result<String> {
        let host = host(params)?;
        let port = port(params)?;
        let database = params.require_text(&DATABASE)?;
        Ok(format!("{URL_SCHEME}://{host}:{port}/{database}"))
    }

    pub fn create_dialect(&self, params: &Params) -> Result<MonetDbDialect> {
        check_db_type(params)?;
        Ok(MonetDbDialect::new(DialectConfig {
            host: host(params)?,
            port: port(params)?,
            database: params.require_text(&DATABASE)?,
            ..flag_config(params)?
        }))
    }

    pub fn create_data_store(&self, params: &Params) -> Result<DataStoreSetup> {
        let dialect = self.create_dialect(params)?;
        let url = self.jdbc_url(params)?;
        let user = params.text_or_sample(&USER)?;
        let password = params.lookup_text(&PASSWD)?;
        debug!("configuring {DISPLAY_NAME} data store at {url}");

        let config = dialect.config();
        let connection = ConnectionConfig {
            host: Some(config.host.clone()),
            port: Some(config.port),
            user: user.clone(),
            password: password.clone(),
            database: config.database.clone(),
            schema: Some(config.schema.clone()),
            extra: BTreeMap::new(),
        };

        Ok(DataStoreSetup {
            source: DataSource::Url { url, connection },
            user,
            password,
            fetch_size: FETCH_SIZE,
            validation_query: VALIDATION_QUERY,
            dialect,
        })
    }
}

/// Same dialect, with connections looked up by JNDI name instead of a URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonetDbJndiDataStoreFactory;

impl MonetDbJndiDataStoreFactory {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        "MonetDB (JNDI)"
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        DESCRIPTION
    }

    #[must_use]
    pub fn parameters(&self) -> Vec<Param> {
        vec![
            DBTYPE,
            JNDI_REFERENCE_NAME,
            SCHEMA,
            LOOSE_BBOX,
            ESTIMATED_EXTENTS,
            ENCODE_FUNCTIONS,
        ]
    }

    #[must_use]
    pub fn can_process(&self, params: &Params) -> bool {
        check_db_type(params).is_ok() && has_required(params, &self.parameters())
    }

    pub fn create_dialect(&self, params: &Params) -> Result<MonetDbDialect> {
        check_db_type(params)?;
        Ok(MonetDbDialect::new(flag_config(params)?))
    }

    pub fn create_data_store(&self, params: &Params) -> Result<DataStoreSetup> {
        let dialect = self.create_dialect(params)?;
        let name = params.require_text(&JNDI_REFERENCE_NAME)?;
        debug!("configuring {DISPLAY_NAME} data store from JNDI name {name}");

        Ok(DataStoreSetup {
            source: DataSource::Jndi { name },
            user: None,
            password: None,
            fetch_size: FETCH_SIZE,
            validation_query: VALIDATION_QUERY,
            dialect,
        })
    }
}

fn check_db_type(params: &Params) -> Result<()> {
    let actual = params.require_text(&DBTYPE)?;
    if actual.eq_ignore_ascii_case(DIALECT_NAME) {
        return Ok(());
    }
    Err(ConfigError::DbTypeMismatch {
        expected: DIALECT_NAME.to_string(),
        actual,
    }
    .into())
}

fn has_required(params: &Params, parameters: &[Param]) -> bool {
    parameters
        .iter()
        .filter(|param| param.required && param.sample.is_none())
        .all(|param| params.contains(param.key))
}

fn host(params: &Params) -> Result<String> {
    Ok(params
        .text_or_sample(&HOST)?
        .unwrap_or_else(|| DEFAULT_HOST.to_string()))
}

fn port(params: &Params) -> Result<u16> {
    let Some(port) = params.integer_or_sample(&PORT)? else {
        return Ok(DEFAULT_PORT);
    };
    u16::try_from(port).map_err(|_| {
        ConfigError::InvalidParameter {
            key: PORT.key.to_string(),
            expected: "a port number",
        }
        .into()
    })
}

fn flag_config(params: &Params) -> Result<DialectConfig> {
    Ok(DialectConfig {
        schema: params
            .text_or_sample(&SCHEMA)?
            .unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        loose_bbox: params.bool_or_sample(&LOOSE_BBOX)?,
        estimated_extents: params.bool_or_sample(&ESTIMATED_EXTENTS)?,
        function_encoding: params.bool_or_sample(&ENCODE_FUNCTIONS)?,
        ..DialectConfig::default()
    })
}
