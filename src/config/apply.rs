use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, Command, PositiveUsize, parse_header};
use crate::error::{ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the
/// command line win.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header).map_err(|err| ConfigError::InvalidHeader { source: err })?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "accept")
        && let Some(accept) = config.accept.clone()
    {
        args.accept = accept;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout
            .to_duration()
            .map_err(|err| ConfigError::InvalidTimeout { source: err })?;
    }

    if !is_cli(matches, "http_version")
        && let Some(version) = config.http_version
    {
        args.http_version = version;
    }

    if !is_cli(matches, "pool_size")
        && let Some(pool_size) = config.pool_size
    {
        args.pool_size = ensure_positive(pool_size, "pool_size")?;
    }

    if !is_cli(matches, "calls")
        && let Some(calls) = config.calls.as_ref()
    {
        if calls.is_empty() {
            return Err(ConfigError::FieldMustBePositive {
                field: "calls",
                source: ValidationError::EmptyCallCounts,
            });
        }
        args.calls = calls
            .iter()
            .map(|&value| ensure_positive(value, "calls"))
            .collect::<Result<_, _>>()?;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.as_ref()
    {
        args.output = PathBuf::from(output);
    }

    if !is_cli(matches, "no_csv")
        && let Some(no_csv) = config.no_csv
    {
        args.no_csv = no_csv;
    }

    if let Some(Command::Demo(demo)) = args.command.as_mut()
        && let Some(demo_calls) = config.demo_calls
    {
        let cli_set = matches
            .subcommand_matches("demo")
            .is_some_and(|sub| is_cli(sub, "demo_calls"));
        if !cli_set {
            demo.demo_calls = ensure_positive(demo_calls, "demo_calls")?;
        }
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.value_source(id), Some(ValueSource::CommandLine))
}

fn ensure_positive(value: usize, field: &'static str) -> Result<PositiveUsize, ConfigError> {
    PositiveUsize::try_from(value)
        .map_err(|err| ConfigError::FieldMustBePositive { field, source: err })
}
