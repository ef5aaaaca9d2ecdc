use crate::bench::ResultTable;

pub const CALLS_HEADER: &str = "Number of Calls";
const CALLS_WIDTH: usize = 15;
const TIMING_WIDTH: usize = 25;
const DIVIDER_WIDTH: usize = 107;

/// Fixed-width text table, one line per call count.
#[must_use]
pub fn render(table: &ResultTable) -> String {
    let mut lines = Vec::with_capacity(table.rows().len().saturating_add(2));

    lines.push(fixed_width_line(
        CALLS_HEADER,
        table.columns().iter().map(|kind| kind.column_header()),
    ));
    lines.push("=".repeat(DIVIDER_WIDTH));
    for row in table.rows() {
        lines.push(fixed_width_line(
            &row.calls().to_string(),
            row.results()
                .iter()
                .map(|result| result.elapsed_ms().to_string()),
        ));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn fixed_width_line<I, S>(first: &str, rest: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells: Vec<String> = std::iter::once(format!("{:<width$}", first, width = CALLS_WIDTH))
        .chain(
            rest.into_iter()
                .map(|cell| format!("{:<width$}", cell.as_ref(), width = TIMING_WIDTH)),
        )
        .collect();
    cells.join(" ").trim_end().to_owned()
}
