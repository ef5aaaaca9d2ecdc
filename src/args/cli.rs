use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::bench::{DEFAULT_CALL_COUNTS, DEFAULT_DEMO_CALLS};
use crate::request::{DEFAULT_ACCEPT, DEFAULT_URL, HttpVersionPreference};
use crate::strategy::DEFAULT_POOL_SIZE;

use super::parsers::{parse_duration_arg, parse_header, parse_http_version, parse_positive_usize};
use super::types::PositiveUsize;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run each strategy once at a single call count
    Demo(DemoArgs),
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Calls issued by each strategy
    #[arg(
        long = "calls",
        default_value_t = PositiveUsize::at_least_one(DEFAULT_DEMO_CALLS),
        value_parser = parse_positive_usize
    )]
    pub demo_calls: PositiveUsize,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "callbench",
    version,
    about = "Compare concurrency strategies for batches of outbound HTTP GET calls."
)]
pub struct BenchArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL
    #[arg(long, short, global = true, default_value = DEFAULT_URL)]
    pub url: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Accept header sent with every call
    #[arg(long = "accept", short = 'A', global = true, default_value = DEFAULT_ACCEPT)]
    pub accept: String,

    /// Per-call timeout (supports ms/s/m/h)
    #[arg(long = "timeout", global = true, default_value = "10s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Protocol preference: 1.1, 2 (negotiated), or 2-prior-knowledge
    #[arg(long = "http-version", global = true, default_value = "2", value_parser = parse_http_version)]
    pub http_version: HttpVersionPreference,

    /// Worker count of the bounded pool strategy
    #[arg(
        long = "pool-size",
        global = true,
        default_value_t = PositiveUsize::at_least_one(DEFAULT_POOL_SIZE),
        value_parser = parse_positive_usize
    )]
    pub pool_size: PositiveUsize,

    /// Call counts of the benchmark matrix (comma-separated)
    #[arg(
        long = "calls",
        value_delimiter = ',',
        default_values_t = DEFAULT_CALL_COUNTS.map(PositiveUsize::at_least_one),
        value_parser = parse_positive_usize
    )]
    pub calls: Vec<PositiveUsize>,

    /// CSV output path
    #[arg(long = "output", short = 'o', default_value = crate::report::DEFAULT_CSV_PATH)]
    pub output: PathBuf,

    /// Skip writing the CSV file
    #[arg(long = "no-csv")]
    pub no_csv: bool,

    /// Config file (TOML or JSON); defaults to callbench.toml/callbench.json when present
    #[arg(long = "config", short = 'c', global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

impl BenchArgs {
    /// Call counts of the matrix as plain numbers.
    #[must_use]
    pub fn call_counts(&self) -> Vec<usize> {
        self.calls.iter().map(|calls| calls.get()).collect()
    }
}
