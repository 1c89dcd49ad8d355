//! Post-clean invariant checks.

use crate::error::Result;
use crate::schema::{self, Weekday};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// An invariant violated by a supposedly cleaned frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// Expected column is missing
    MissingColumn { column: String },
    /// Count column is not integer-typed
    NonIntegerColumn { column: String, dtype: String },
    /// Count column holds negative values
    NegativeCount { column: String, cells: usize },
    /// Weekday column holds a value outside Mon..Sun
    UnknownWeekday { value: String },
    /// Date column was never parsed
    UnparsedDate { dtype: String },
}

/// Check the cleaned-table invariants, returning every violation found.
///
/// An empty result means the frame satisfies the contract the statistics
/// and year-slicing consumers rely on.
pub fn validate(df: &DataFrame) -> Result<Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let mut numeric = schema::count_columns();
    numeric.push(schema::TOTAL_EXC_SUB.to_string());

    for name in &numeric {
        let Ok(column) = df.column(name) else {
            issues.push(ValidationIssue::MissingColumn {
                column: name.clone(),
            });
            continue;
        };
        let series = column.as_materialized_series();
        let Ok(ca) = series.i64() else {
            issues.push(ValidationIssue::NonIntegerColumn {
                column: name.clone(),
                dtype: series.dtype().to_string(),
            });
            continue;
        };
        let negatives = ca.into_iter().flatten().filter(|v| *v < 0).count();
        if negatives > 0 {
            issues.push(ValidationIssue::NegativeCount {
                column: name.clone(),
                cells: negatives,
            });
        }
    }

    match df.column(schema::DAY) {
        Ok(column) => {
            let series = column.as_materialized_series();
            if let Ok(ca) = series.str() {
                for value in ca.unique()?.into_iter().flatten() {
                    if value.parse::<Weekday>().is_err() {
                        issues.push(ValidationIssue::UnknownWeekday {
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
        Err(_) => issues.push(ValidationIssue::MissingColumn {
            column: schema::DAY.to_string(),
        }),
    }

    match df.column(schema::DATE) {
        Ok(column) if column.dtype() != &DataType::Date => {
            issues.push(ValidationIssue::UnparsedDate {
                dtype: column.dtype().to_string(),
            });
        }
        Ok(_) => {}
        Err(_) => issues.push(ValidationIssue::MissingColumn {
            column: schema::DATE.to_string(),
        }),
    }

    Ok(issues)
}
