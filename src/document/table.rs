/// Row/column data backing a document table.
///
/// Rows are plain strings; the table is an authoring container, not a data
/// frame. Rows shorter than the header are padded with empty cells and rows
/// longer than the header are truncated, so a ragged table still renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableData {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableData {
    /// Creates an empty table with the given column headers.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Builds a table from column headers and row data in one call.
    #[must_use]
    pub fn from_records<C, R, S>(columns: C, records: R) -> Self
    where
        C: IntoIterator<Item = S>,
        R: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for record in records {
            table.push_row(record);
        }
        table
    }

    /// The column headers.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows, each the same width as [`columns`](Self::columns).
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as a markdown pipe table, without its caption.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!("| {} |", self.columns.join(" | ")));
        lines.push(format!(
            "|{}",
            self.columns.iter().map(|_| " --- |").collect::<String>()
        ));
        for row in &self.rows {
            lines.push(format!("| {} |", row.join(" | ")));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_pipe_table() {
        let mut table = TableData::new(["A", "B"]);
        table.push_row(["1", "x"]);
        table.push_row(["2", "y"]);

        let expected = "| A | B |\n| --- | --- |\n| 1 | x |\n| 2 | y |";
        assert_eq!(table.to_markdown(), expected);
    }

    #[test]
    fn ragged_rows_are_padded_and_truncated() {
        let mut table = TableData::new(["A", "B"]);
        table.push_row(["only"]);
        table.push_row(["1", "2", "3"]);

        assert_eq!(table.rows()[0], vec!["only".to_string(), String::new()]);
        assert_eq!(table.rows()[1], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn from_records_collects_rows() {
        let table = TableData::from_records(
            vec!["Name", "Age"],
            vec![vec!["Alice", "25"], vec!["Bob", "30"]],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["Name", "Age"]);
    }
}
