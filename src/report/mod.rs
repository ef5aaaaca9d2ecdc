//! Console and CSV output for a finished result table.
mod csv;
mod render;


pub use csv::{DEFAULT_CSV_PATH, persist, persist_or_warn, to_csv};
pub use render::{CALLS_HEADER, render};
