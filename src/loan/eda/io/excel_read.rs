use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::{debug, info, instrument};

use crate::loan::eda::error::{DashboardError, Result};
use crate::loan::eda::model::{Cell, Table};

/// Sheet holding one row per loan.
pub const RECORDS_SHEET: &str = "DATA";
/// Sheet documenting the meaning of each record column.
pub const DESCRIPTION_SHEET: &str = "Description";

/// Both tables of the loan workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanWorkbook {
    /// Loan records; the only table charts are built from.
    pub records: Table,
    /// Column documentation, kept for human readers.
    pub descriptions: Table,
}

/// Reads the record and description sheets from the workbook at `path`.
///
/// Either sheet missing fails the whole load; nothing is returned partially.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_workbook(path: &Path) -> Result<LoanWorkbook> {
    if !path.exists() {
        return Err(DashboardError::MissingInput(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let records = read_required_sheet(&mut workbook, RECORDS_SHEET)?;
    let descriptions = read_required_sheet(&mut workbook, DESCRIPTION_SHEET)?;

    info!(
        records = records.len(),
        columns = records.columns.len(),
        descriptions = descriptions.len(),
        "workbook loaded"
    );
    Ok(LoanWorkbook {
        records,
        descriptions,
    })
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Table> {
    let range = workbook
        .worksheet_range(name)
        .ok_or_else(|| DashboardError::MissingSheet(name.to_string()))??;
    let table = range_to_table(name, &range);
    debug!(sheet = name, rows = table.len(), "sheet read");
    Ok(table)
}

fn range_to_table(name: &str, range: &calamine::Range<DataType>) -> Table {
    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_missing()))
        .collect();

    Table::new(name, columns, rows)
}

fn to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Float(value) => Cell::Number(*value),
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::Empty | DataType::Error(_) => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
