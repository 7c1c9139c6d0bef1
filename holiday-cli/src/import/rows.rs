//! Map grid rows to plan entries

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

use super::excel::Cell;
use crate::api::{NewHolidayPlan, PlanOption};
use crate::dates::{WIRE_FORMAT, excel_serial_to_date, parse_calendar_date};

/// Literal found in the date column of header rows
pub const HEADER_MARKER: &str = "Sr.No.";

/// One data row, columns taken positionally
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based row number in the sheet, for error messages
    pub line: usize,
    pub date: Cell,
    pub day: Cell,
    pub name: Cell,
    pub details: Cell,
}

/// Drop the header row, map the rest to `ImportRow`s, and discard rows
/// whose date is blank or is the header marker
pub fn map_rows(grid: Vec<Vec<Cell>>) -> Vec<ImportRow> {
    grid.into_iter()
        .enumerate()
        .skip(1)
        .map(|(index, row)| {
            let mut cells = row.into_iter();
            let mut next = || cells.next().unwrap_or(Cell::Empty);
            ImportRow {
                line: index + 1,
                date: next(),
                day: next(),
                name: next(),
                details: next(),
            }
        })
        .filter(|row| !row.date.is_blank() && !is_header_marker(&row.date))
        .collect()
}

fn is_header_marker(cell: &Cell) -> bool {
    matches!(cell, Cell::Text(s) if s.trim() == HEADER_MARKER)
}

/// Build the create payload for a row, normalising its date
pub fn parse_row(row: &ImportRow, option: PlanOption) -> Result<NewHolidayPlan> {
    let date = cell_date(&row.date)?;
    Ok(NewHolidayPlan {
        date: date.format(WIRE_FORMAT).to_string(),
        day: row.day.as_text().trim().to_string(),
        name: row.name.as_text().trim().to_string(),
        details: row.details.as_text().trim().to_string(),
        option,
    })
}

fn cell_date(cell: &Cell) -> Result<NaiveDate> {
    match cell {
        Cell::Date(date) => Ok(*date),
        Cell::Number(serial) => {
            excel_serial_to_date(*serial).ok_or_else(|| anyhow!("Invalid date: {}", cell.as_text()))
        }
        Cell::Text(text) => parse_calendar_date(text),
        Cell::Empty | Cell::Bool(_) => Err(anyhow!("Invalid date: {}", cell.as_text())),
    }
}
