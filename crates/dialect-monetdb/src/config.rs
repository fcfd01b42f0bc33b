pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 50000;
pub const DEFAULT_SCHEMA: &str = "sys";

/// Per-datastore settings, fixed once the dialect is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub schema: String,
    pub loose_bbox: bool,
    pub estimated_extents: bool,
    pub function_encoding: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: String::new(),
            schema: DEFAULT_SCHEMA.to_string(),
            loose_bbox: false,
            estimated_extents: false,
            function_encoding: false,
        }
    }
}
