//! Starter workbook for bulk imports

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 4] = ["Date", "Day", "Name", "Details"];
const EXAMPLE_ROW: [&str; 4] = ["2025-01-01", "Wednesday", "New Year's Day", "Office closed"];

/// Write a workbook with the import header row and one example row
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Holiday Plans")
        .context("Failed to name template sheet")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .context("Failed to write template header")?;
        sheet
            .set_column_width(col as u16, 18)
            .context("Failed to size template column")?;
    }
    for (col, value) in EXAMPLE_ROW.iter().enumerate() {
        sheet
            .write_string(1, col as u16, *value)
            .context("Failed to write template row")?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write template: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlanOption;
    use crate::import::excel::{Cell, read_first_sheet};
    use crate::import::rows::{map_rows, parse_row};

    #[test]
    fn test_template_reads_back_as_one_valid_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        write_template(&path).unwrap();

        let grid = read_first_sheet(&path).unwrap();
        assert_eq!(grid[0][0], Cell::Text("Date".to_string()));

        let rows = map_rows(grid);
        assert_eq!(rows.len(), 1);
        let plan = parse_row(&rows[0], PlanOption::Option1).unwrap();
        assert_eq!(plan.date, "2025-01-01");
        assert_eq!(plan.name, "New Year's Day");
    }
}
