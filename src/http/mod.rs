//! Outbound call plumbing shared by every strategy.
mod call;
mod client;


pub use call::{ResponseSummary, send_call};
pub use client::build_client;
