//! Spreadsheet bulk import for holiday plan entries
//!
//! Workbook layout:
//! - first sheet only
//! - row 1 is a header and is always discarded
//! - columns are read positionally as Date, Day, Name, Details

pub mod bulk;
pub mod excel;
pub mod rows;
pub mod template;

pub use bulk::{ImportStrategy, import_file};
pub use template::write_template;
