//! Read the first worksheet of a workbook into a grid of cells

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use log::debug;

use crate::dates::{WIRE_FORMAT, excel_serial_to_date, parse_calendar_date};

/// A spreadsheet cell, reduced to what the importer cares about
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    /// Cells that carry no usable value: empty, whitespace, zero or false
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => *n == 0.0 || n.is_nan(),
            Cell::Bool(b) => !b,
            Cell::Date(_) => false,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.format(WIRE_FORMAT).to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<&Data> for Cell {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => Cell::Number(dt.as_f64()),
            Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
                .map(Cell::Date)
                .unwrap_or(Cell::Number(dt.as_f64())),
            Data::DateTimeIso(s) => parse_calendar_date(s)
                .map(Cell::Date)
                .unwrap_or_else(|_| Cell::Text(s.clone())),
            Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

/// Read every row of the first sheet. Columns keep their sheet positions
/// even when the used range does not start in column A.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<Cell>>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Excel file has no sheets")?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let grid: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| {
            let mut cells = vec![Cell::Empty; leading_cols];
            cells.extend(row.iter().map(Cell::from));
            cells
        })
        .collect();

    debug!(
        "Read {} rows from sheet '{}' of {}",
        grid.len(),
        sheet_name,
        path.display()
    );

    Ok(grid)
}
