//! Submit imported rows as independent plan writes
//!
//! Writes are issued concurrently and the import succeeds only when every
//! row succeeds. Nothing is rolled back: rows written before a failure stay
//! on the server.
//!
//! Two strategies decide when dates are validated:
//! - `ValidateFirst` parses every row before the first request, so a bad
//!   date means zero writes.
//! - `Concurrent` parses each row inside its own write task. A bad date
//!   fails the import while writes for other rows may already be in
//!   flight, and those are allowed to finish.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use futures::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::excel::read_first_sheet;
use super::rows::{ImportRow, map_rows, parse_row};
use crate::api::{HolidayPlanEntry, HolidayRepository, NewHolidayPlan, PlanOption};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStrategy {
    #[default]
    ValidateFirst,
    Concurrent,
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStrategy::ValidateFirst => write!(f, "validate-first"),
            ImportStrategy::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl FromStr for ImportStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validate-first" | "validate_first" | "sequential" => Ok(ImportStrategy::ValidateFirst),
            "concurrent" => Ok(ImportStrategy::Concurrent),
            other => Err(format!(
                "unknown import strategy '{}' (expected validate-first or concurrent)",
                other
            )),
        }
    }
}

/// Result of a fully successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Rows left after header and blank-date filtering
    pub submitted: usize,
    /// Entries created by the server, in row order
    pub created: Vec<HolidayPlanEntry>,
}

pub struct BulkImporter<'a> {
    repo: &'a dyn HolidayRepository,
    strategy: ImportStrategy,
}

impl<'a> BulkImporter<'a> {
    pub fn new(repo: &'a dyn HolidayRepository, strategy: ImportStrategy) -> Self {
        Self { repo, strategy }
    }

    pub async fn run(&self, rows: &[ImportRow], option: PlanOption) -> Result<ImportOutcome> {
        debug!(
            "Importing {} rows for {} ({} strategy)",
            rows.len(),
            option,
            self.strategy
        );

        let results = match self.strategy {
            ImportStrategy::ValidateFirst => {
                let plans = rows
                    .iter()
                    .map(|row| {
                        parse_row(row, option).inspect_err(|e| {
                            warn!("Row {} rejected before upload: {}", row.line, e)
                        })
                    })
                    .collect::<Result<Vec<NewHolidayPlan>>>()?;

                join_all(plans.iter().map(|plan| self.repo.create_plan(plan))).await
            }
            ImportStrategy::Concurrent => {
                join_all(rows.iter().map(|row| async move {
                    let plan = parse_row(row, option)?;
                    self.repo.create_plan(&plan).await
                }))
                .await
            }
        };

        let total = results.len();
        let mut created = Vec::with_capacity(total);
        let mut first_error = None;
        for (row, result) in rows.iter().zip(results) {
            match result {
                Ok(entry) => created.push(entry),
                Err(e) => {
                    warn!("Row {} failed: {:#}", row.line, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            info!(
                "Bulk import failed; {} of {} rows were written and remain on the server",
                created.len(),
                total
            );
            return Err(e);
        }

        info!("Bulk import wrote {} rows for {}", created.len(), option);
        Ok(ImportOutcome {
            submitted: total,
            created,
        })
    }
}

/// Read `path`, map its rows and import them for `option`
pub async fn import_file(
    repo: &dyn HolidayRepository,
    path: &Path,
    option: PlanOption,
    strategy: ImportStrategy,
) -> Result<ImportOutcome> {
    let grid = read_first_sheet(path)?;
    let rows = map_rows(grid);
    if rows.is_empty() {
        return Err(anyhow!("No holiday rows found in {}", path.display()));
    }
    BulkImporter::new(repo, strategy).run(&rows, option).await
}
