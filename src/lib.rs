//! Core library for the `callbench` CLI.
//!
//! `callbench` times the same batch of HTTP GET calls under several
//! concurrency strategies (sequential, a fixed worker pool, one task per call,
//! and two future-combinator variants) across a range of call counts, and
//! reports the timings as a text table and a CSV file.
pub mod args;
pub mod bench;
pub mod config;
pub mod error;
pub mod http;
pub mod report;
pub mod request;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_support;
