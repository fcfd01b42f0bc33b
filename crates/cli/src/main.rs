mod dry_run;
mod error_presentation;
mod feature_file;

use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use geodialect_core::{Param, Params, Sample, SqlDialect, Version};
use geodialect_dialect_monetdb::{
    DATABASE, DBTYPE, DIALECT_NAME, DialectConfig, HOST, MonetDbDataStoreFactory, MonetDbDialect,
    MonetDbJndiDataStoreFactory, PORT,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    dry_run::DryRunAdapter,
    error_presentation::{CliError, CliResult, render_runtime_error},
    feature_file::parse_feature_type,
};

#[derive(Debug, Parser)]
#[command(
    name = "geodialect",
    version,
    about = "Render MonetDB spatial SQL without a database connection"
)]
struct Cli {
    /// Log every rendered statement at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the JDBC connection URL for a database.
    Url(UrlArgs),
    /// List the parameters accepted by the data store factory.
    Params(ParamsArgs),
    /// Print the spatial DDL issued after creating or dropping a feature table.
    Ddl(DdlArgs),
}

#[derive(Debug, Args)]
struct UrlArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<String>,
    database: String,
}

#[derive(Debug, Args)]
struct ParamsArgs {
    /// Show the JNDI factory parameters instead.
    #[arg(long)]
    jndi: bool,
}

#[derive(Debug, Args)]
struct DdlArgs {
    /// Feature type YAML; read from stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    schema: Option<String>,
    #[arg(long, default_value = "3.4.0", value_parser = parse_version)]
    spatial_version: Version,
    /// Render the cleanup issued after the table is dropped.
    #[arg(long)]
    drop: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> CliResult<()> {
    match command {
        Command::Url(args) => print_url(args),
        Command::Params(args) => {
            print_params(args);
            Ok(())
        }
        Command::Ddl(args) => print_ddl(args),
    }
}

fn print_url(args: UrlArgs) -> CliResult<()> {
    let mut params = Params::new()
        .with(DBTYPE.key, DIALECT_NAME)
        .with(DATABASE.key, args.database);
    if let Some(host) = args.host {
        params.insert(HOST.key, host);
    }
    if let Some(port) = args.port {
        params.insert(PORT.key, port);
    }

    println!("{}", MonetDbDataStoreFactory.jdbc_url(&params)?);
    Ok(())
}

fn print_params(args: ParamsArgs) {
    let (display_name, parameters) = if args.jndi {
        let factory = MonetDbJndiDataStoreFactory;
        (factory.display_name(), factory.parameters())
    } else {
        let factory = MonetDbDataStoreFactory;
        (factory.display_name(), factory.parameters())
    };

    println!("{display_name}");
    for param in &parameters {
        println!(
            "{}\t{}\t{}\t{}",
            param.key,
            if param.required { "required" } else { "optional" },
            sample_text(param),
            param.description
        );
    }
}

fn sample_text(param: &Param) -> String {
    match param.sample {
        Some(Sample::Text(value)) => value.to_string(),
        Some(Sample::Integer(value)) => value.to_string(),
        Some(Sample::Bool(value)) => value.to_string(),
        None => "-".to_string(),
    }
}

fn print_ddl(args: DdlArgs) -> CliResult<()> {
    let yaml = read_feature_type_input(args.file.as_ref())?;
    let feature_type = parse_feature_type(&yaml)?;

    let mut config = DialectConfig::default();
    if let Some(schema) = args.schema {
        config.schema = schema;
    }
    let dialect = MonetDbDialect::new(config);
    let adapter = DryRunAdapter::new(args.spatial_version);
    debug!(
        "rendering {} DDL for table {}",
        if args.drop { "post-drop" } else { "post-create" },
        feature_type.name
    );

    if args.drop {
        dialect.post_drop_table(None, &feature_type, &adapter)?;
    } else {
        dialect.post_create_table(None, &feature_type, &adapter)?;
    }

    for sql in adapter.into_statements() {
        println!("{sql};");
    }
    Ok(())
}

fn read_feature_type_input(file: Option<&PathBuf>) -> CliResult<String> {
    let input = match file {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(CliError::MissingFeatureTypeInput);
            }
            let mut input = String::new();
            stdin
                .read_to_string(&mut input)
                .map_err(CliError::ReadStdin)?;
            input
        }
    };

    if input.trim().is_empty() {
        return Err(CliError::MissingFeatureTypeInput);
    }
    Ok(input)
}

fn parse_version(raw: &str) -> Result<Version, String> {
    Version::parse(raw).ok_or_else(|| format!("`{raw}` is not a version number"))
}
