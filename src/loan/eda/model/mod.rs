use std::fmt;

use serde::Serialize;

use crate::loan::eda::error::{DashboardError, Result};

/// A single spreadsheet value as loaded from the workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Cell {
    /// Numeric value (integers are widened to floating point).
    Number(f64),
    /// Free-form text, including rendered date and time values.
    Text(String),
    /// Boolean flag.
    Bool(bool),
    /// Empty cell, spreadsheet error, or a value dropped by coercion.
    Missing,
}

impl Cell {
    /// Best-effort numeric interpretation of the cell.
    ///
    /// Text is trimmed and parsed as a decimal number; anything that does not
    /// yield a finite value is treated as missing.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
            Cell::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
            Cell::Bool(flag) => write!(f, "{flag}"),
            Cell::Missing => Ok(()),
        }
    }
}

/// Outcome of coercing one column to numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoercionReport {
    /// Cells that were already numeric.
    pub numeric: usize,
    /// Cells converted from text or booleans.
    pub converted: usize,
    /// Non-empty cells that could not be parsed and are now missing.
    pub dropped: usize,
    /// Cells that were missing before coercion.
    pub missing: usize,
}

/// A sheet loaded into memory: one header row followed by data rows.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a table, padding short rows with [`Cell::Missing`] and
    /// truncating cells that have no header.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column` in the header row.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| DashboardError::MissingColumn {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Iterates the cells of one column in row order.
    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &Cell>> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }

    /// Converts every cell of `column` to a number in place. Cells that cannot
    /// be parsed become [`Cell::Missing`] instead of failing the call.
    pub fn coerce_numeric(&mut self, column: &str) -> Result<CoercionReport> {
        let index = self.column_index(column)?;
        let mut report = CoercionReport::default();

        for row in &mut self.rows {
            let cell = &mut row[index];
            match cell {
                Cell::Number(_) => report.numeric += 1,
                Cell::Missing => report.missing += 1,
                _ => match cell.to_number() {
                    Some(value) => {
                        *cell = Cell::Number(value);
                        report.converted += 1;
                    }
                    None => {
                        *cell = Cell::Missing;
                        report.dropped += 1;
                    }
                },
            }
        }

        Ok(report)
    }

    /// Numeric reading of every cell of `column`, using [`Cell::to_number`].
    /// Booleans count as 1/0; text that does not parse counts as missing.
    pub fn numeric_values(&self, column: &str) -> Result<Vec<f64>> {
        Ok(self.column(column)?.filter_map(Cell::to_number).collect())
    }

    /// Literal text of every non-missing cell of `column`.
    pub fn category_values(&self, column: &str) -> Result<Vec<String>> {
        Ok(self
            .column(column)?
            .filter(|cell| !cell.is_missing())
            .map(Cell::to_string)
            .collect())
    }
}
