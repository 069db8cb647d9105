//! Read candidate rows from the first sheet of an Excel workbook

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};

use super::error::RowError;

/// Column positions of a candidate row
pub mod columns {
    pub const OPENING: usize = 0;
    pub const FULL_NAME: usize = 1;
    pub const COMPENSATION: usize = 2;
    pub const COMMENT: usize = 3;
    pub const STAGE: usize = 4;
}

/// One spreadsheet row, cells rendered to text
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number in the sheet (the header is row 1)
    pub number: usize,
    pub cells: Vec<Option<String>>,
}

impl SheetRow {
    pub fn new(number: usize, cells: Vec<Option<String>>) -> Self {
        Self { number, cells }
    }

    /// Trimmed, non-empty value at `column`
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells
            .get(column)
            .and_then(|c| c.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Like `cell`, failing with `MissingCell` when absent
    pub fn require(&self, column: usize) -> Result<&str, RowError> {
        self.cell(column).ok_or(RowError::MissingCell {
            column,
            label: column_label(column),
        })
    }
}

fn column_label(column: usize) -> &'static str {
    match column {
        columns::OPENING => "opening name",
        columns::FULL_NAME => "full name",
        columns::COMPENSATION => "compensation",
        columns::COMMENT => "comment",
        columns::STAGE => "stage name",
        _ => "value",
    }
}

/// Read every row of the first sheet, header included
pub fn read_sheet_rows<P: AsRef<Path>>(path: P) -> Result<Vec<SheetRow>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Workbook has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    // calamine ranges start at the first used cell, not at A1
    let (first_row, first_col) = range.start().unwrap_or((0, 0));

    let rows = range
        .rows()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![None; first_col as usize];
            cells.extend(row.iter().map(cell_to_string));
            SheetRow::new(first_row as usize + idx + 1, cells)
        })
        .collect();

    Ok(rows)
}

/// Render a cell as text the way it reads in the sheet
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}
