//! Pipe-table emission shared by the table-producing stages

/// Render a header, a `---` separator per column and the data rows
///
/// Short rows are right-padded with empty cells to the header width.
#[must_use]
pub fn pipe_table(header: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let width = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(pipe_row(header, width));
    out.push(pipe_row(&vec!["---".to_string(); width], width));
    out.extend(rows.iter().map(|row| pipe_row(row, width)));
    out
}

fn pipe_row(cells: &[String], width: usize) -> String {
    let mut row = String::from("|");
    for i in 0..width {
        let cell = cells.get(i).map_or("", |c| c.trim());
        if cell.is_empty() {
            row.push_str("  |");
        } else {
            row.push(' ');
            row.push_str(&cell.replace('|', r"\|"));
            row.push_str(" |");
        }
    }
    row
}
