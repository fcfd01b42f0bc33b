use std::{io, path::PathBuf};

use anyhow::Context;
use miette::Report;

const DIALECT_CONTEXT: &str = "while rendering MonetDB SQL";
const FILE_READ_CONTEXT: &str = "while reading feature type file";
const STDIN_READ_CONTEXT: &str = "while reading feature type from stdin";
const FEATURE_TYPE_CONTEXT: &str = "while parsing feature type YAML";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    MissingFeatureTypeInput,
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    ReadStdin(io::Error),
    FeatureType(serde_yaml::Error),
    UnknownGeometryType {
        column: String,
        geometry_type: String,
    },
    Core(geodialect_core::Error),
}

impl From<geodialect_core::Error> for CliError {
    fn from(value: geodialect_core::Error) -> Self {
        Self::Core(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::MissingFeatureTypeInput => {
            format!("[usage] {}", missing_feature_type_message())
        }
        CliError::ReadFile { path, source } => {
            let context = format!("{FILE_READ_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::ReadStdin(source) => {
            let report = report_with_context(source, STDIN_READ_CONTEXT);
            format!("[io] {report}")
        }
        CliError::FeatureType(source) => {
            let report = report_with_context(source, FEATURE_TYPE_CONTEXT);
            format!("[config] {report}")
        }
        CliError::UnknownGeometryType {
            column,
            geometry_type,
        } => format!("[config] unknown geometry type `{geometry_type}` for column `{column}`"),
        CliError::Core(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, DIALECT_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &geodialect_core::Error) -> &'static str {
    match error {
        geodialect_core::Error::Geometry(_) => "geometry",
        geodialect_core::Error::Config(_) => "config",
        geodialect_core::Error::Generate(_) => "generate",
        geodialect_core::Error::Execute(_) => "execute",
    }
}

fn missing_feature_type_message() -> &'static str {
    "missing feature type YAML: pass --file <PATH> or pipe YAML via stdin"
}
