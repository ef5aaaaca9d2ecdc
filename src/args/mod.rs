//! CLI argument types and parsing helpers.
mod cli;
mod descriptor;
pub(crate) mod parsers;
mod types;


pub use cli::{BenchArgs, Command, DemoArgs};
pub use types::PositiveUsize;

pub(crate) use parsers::{parse_duration_arg, parse_header};
