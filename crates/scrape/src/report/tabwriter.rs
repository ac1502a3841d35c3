//! Elastic tab-stop alignment for tab-separated rows.
//!
//! Every cell except the last one of a row belongs to a column. Consecutive
//! rows that share a column form a block, and all cells of that column in the
//! block are padded with tabs to the same tab stop. A row with fewer cells
//! (or an empty row) ends the blocks it does not take part in.

/// Minimum width of a column, in characters.
pub const MIN_CELL_WIDTH: usize = 10;

/// Width of a tab stop.
pub const TAB_WIDTH: usize = 8;

/// Buffers rows and renders them with aligned columns.
#[derive(Debug, Clone)]
pub struct TabWriter {
    min_width: usize,
    tab_width: usize,
    rows: Vec<Vec<String>>,
}

impl Default for TabWriter {
    fn default() -> Self {
        Self::new(MIN_CELL_WIDTH, TAB_WIDTH)
    }
}

impl TabWriter {
    pub fn new(min_width: usize, tab_width: usize) -> Self {
        Self {
            min_width,
            tab_width: tab_width.max(1),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells.
    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Append an empty line, which also ends every column block.
    pub fn blank_line(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Width of each padded cell, indexed like `rows`.
    fn cell_widths(&self) -> Vec<Vec<usize>> {
        let mut widths: Vec<Vec<usize>> = self
            .rows
            .iter()
            .map(|r| vec![0; r.len().saturating_sub(1)])
            .collect();

        let columns = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for column in 0..columns.saturating_sub(1) {
            let mut start = 0;
            while start < self.rows.len() {
                if self.rows[start].len() <= column + 1 {
                    start += 1;
                    continue;
                }

                let mut end = start;
                let mut widest = 0;
                while end < self.rows.len() && self.rows[end].len() > column + 1 {
                    widest = widest.max(text_width(&self.rows[end][column]));
                    end += 1;
                }

                // At least one tab always separates a cell from the next.
                let width = round_up(self.min_width.max(widest + 1), self.tab_width);
                for row in &mut widths[start..end] {
                    row[column] = width;
                }
                start = end;
            }
        }

        widths
    }

    /// Render every buffered row.
    pub fn render(&self) -> String {
        let widths = self.cell_widths();
        let mut out = String::new();

        for (row, row_widths) in self.rows.iter().zip(&widths) {
            if let Some((last, cells)) = row.split_last() {
                for (cell, &width) in cells.iter().zip(row_widths) {
                    out.push_str(cell);
                    let padding = width - text_width(cell);
                    let tabs = padding.div_ceil(self.tab_width);
                    out.extend(std::iter::repeat_n('\t', tabs));
                }
                out.push_str(last);
            }
            out.push('\n');
        }

        out
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn round_up(width: usize, multiple: usize) -> usize {
    width.div_ceil(multiple) * multiple
}
