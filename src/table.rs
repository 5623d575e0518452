// Plain bordered text tables for terminal output.
//
//   +-------+------+
//   | Email | Name |
//   +-------+------+
//   | a@x   | Ann  |
//   +-------+------+

use std::fmt;

#[derive(Debug, Default)]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// A table whose first row is a header, separated from the body.
    pub fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            header: Some(header.into_iter().map(Into::into).collect()),
            rows: Vec::new(),
        }
    }

    /// Two-column key/value table without a header.
    pub fn key_value() -> Self {
        Table::default()
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn entry(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.row([key.to_string(), value.to_string()])
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in self.header.iter().chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let w = cell_width(cell);
                match widths.get_mut(i) {
                    Some(existing) => *existing = (*existing).max(w),
                    None => widths.push(w),
                }
            }
        }
        widths
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

fn write_border(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    f.write_str("+")?;
    for w in widths {
        write!(f, "{}+", "-".repeat(w + 2))?;
    }
    f.write_str("\n")
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], row: &[String]) -> fmt::Result {
    f.write_str("|")?;
    for (i, w) in widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        // Cells are single-line; embedded newlines would break the border.
        let cell = cell.replace('\n', " ");
        let pad = w - cell_width(&cell);
        write!(f, " {}{} |", cell, " ".repeat(pad))?;
    }
    f.write_str("\n")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        if widths.is_empty() {
            return Ok(());
        }
        write_border(f, &widths)?;
        if let Some(header) = &self.header {
            write_row(f, &widths, header)?;
            write_border(f, &widths)?;
        }
        for row in &self.rows {
            write_row(f, &widths, row)?;
        }
        if !self.rows.is_empty() {
            write_border(f, &widths)?;
        }
        Ok(())
    }
}
