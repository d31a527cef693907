//! Elastic tabstop alignment in the style of Go's `text/tabwriter`.
//!
//! Each line is a list of cells. Every cell but the last one on a line is
//! terminated and takes part in column alignment; the last cell is written as
//! is. A column block is a run of consecutive lines that all have a
//! terminated cell in that column, so a shorter line (a comment, a blank line)
//! ends the block.
//!
//! ```text
//! ["ID", "string", "`json`"]        ID      string `json`
//! ["Name", "string", "`json`"]  →   Name    string `json`
//! ["private", "string"]             private string
//! ```

/// Spaces added after the widest cell of a column
const PADDING: usize = 1;

/// Align cell rows into text lines, one output line per input row.
///
/// Columns whose cells are all empty are dropped, matching gofmt's use of
/// `DiscardEmptyColumns`.
pub fn align<S: AsRef<str>>(rows: &[Vec<S>]) -> Vec<String> {
    let mut out = vec![String::new(); rows.len()];
    let mut widths = Vec::new();
    format_block(rows, 0, rows.len(), &mut widths, &mut out);
    out
}

fn format_block<S: AsRef<str>>(
    rows: &[Vec<S>],
    mut line0: usize,
    line1: usize,
    widths: &mut Vec<usize>,
    out: &mut [String],
) {
    let column = widths.len();
    let mut this = line0;

    while this < line1 {
        if !has_terminated_cell(&rows[this], column) {
            this += 1;
            continue;
        }

        // Lines before the block only use the columns already fixed.
        write_lines(rows, line0, this, widths, out);
        line0 = this;

        let mut width = 0;
        let mut discardable = true;
        while this < line1 && has_terminated_cell(&rows[this], column) {
            let cell = cell_width(rows[this][column].as_ref());
            width = width.max(cell + PADDING);
            if cell > 0 {
                discardable = false;
            }
            this += 1;
        }
        if discardable {
            width = 0;
        }

        widths.push(width);
        format_block(rows, line0, this, widths, out);
        widths.pop();
        line0 = this;
    }

    write_lines(rows, line0, line1, widths, out);
}

fn write_lines<S: AsRef<str>>(
    rows: &[Vec<S>],
    line0: usize,
    line1: usize,
    widths: &[usize],
    out: &mut [String],
) {
    for (row, line) in rows[line0..line1].iter().zip(&mut out[line0..line1]) {
        line.clear();
        for (j, cell) in row.iter().enumerate() {
            let text = cell.as_ref();
            line.push_str(text);
            if let Some(&width) = widths.get(j) {
                let pad = width.saturating_sub(cell_width(text));
                line.extend(std::iter::repeat_n(' ', pad));
            }
        }
    }
}

fn has_terminated_cell<S>(row: &[S], column: usize) -> bool {
    column + 1 < row.len()
}

fn cell_width(text: &str) -> usize {
    text.chars().count()
}
