use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{error, info};

use crate::bench::ResultTable;
use crate::error::PersistenceError;

use super::render::CALLS_HEADER;

pub const DEFAULT_CSV_PATH: &str = "benchmark_results.csv";
const SEPARATOR: &str = ", ";

/// Header line followed by one line per call count, fields separated by
/// `", "`.
#[must_use]
pub fn to_csv(table: &ResultTable) -> String {
    let mut output = String::new();

    let header: Vec<&str> = std::iter::once(CALLS_HEADER)
        .chain(table.columns().iter().map(|kind| kind.column_header()))
        .collect();
    output.push_str(&header.join(SEPARATOR));
    output.push('\n');

    for row in table.rows() {
        let fields: Vec<String> = std::iter::once(row.calls().to_string())
            .chain(
                row.results()
                    .iter()
                    .map(|result| result.elapsed_ms().to_string()),
            )
            .collect();
        output.push_str(&fields.join(SEPARATOR));
        output.push('\n');
    }

    output
}

/// Writes the table to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn persist(table: &ResultTable, path: &Path) -> Result<(), PersistenceError> {
    let file = File::create(path).map_err(|err| PersistenceError::Create {
        path: path.to_path_buf(),
        source: err,
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(to_csv(table).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|err| PersistenceError::Write {
            path: path.to_path_buf(),
            source: err,
        })
}

/// Like [`persist`], but a failure is logged and reported as `false` so the
/// benchmark can carry on with the in-memory table.
pub fn persist_or_warn(table: &ResultTable, path: &Path) -> bool {
    match persist(table, path) {
        Ok(()) => {
            info!("Results saved to {}", path.display());
            true
        }
        Err(err) => {
            error!("Error writing results to CSV file: {}", err);
            false
        }
    }
}
