//! Anomaly correction for the aggregate total.

use crate::error::{ParkstatError, Result};
use crate::schema;
use polars::prelude::*;
use tracing::debug;

/// Floors a computed count column at zero.
///
/// The source extract derives `Total Exc Sub` by subtracting subscriber
/// counts from a raw total, which occasionally dips below zero. The
/// floor is applied unconditionally to the whole column.
#[derive(Debug, Clone)]
pub struct NegativeFloor {
    column: String,
}

impl Default for NegativeFloor {
    fn default() -> Self {
        Self::new(schema::TOTAL_EXC_SUB)
    }
}

impl NegativeFloor {
    /// Create a floor for the named column.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Apply the floor, returning a new frame.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        Ok(self.apply_counted(df)?.0)
    }

    /// Apply the floor, also reporting how many cells were clipped.
    pub fn apply_counted(&self, df: &DataFrame) -> Result<(DataFrame, usize)> {
        let column = df
            .column(&self.column)
            .map_err(|_| ParkstatError::ColumnNotFound(self.column.clone()))?;

        let series = column.as_materialized_series();
        let ca = series.i64().map_err(|_| {
            ParkstatError::DataError(format!(
                "column '{}' must be Int64 before flooring, got {}",
                self.column,
                series.dtype()
            ))
        })?;

        let clipped = ca.into_iter().flatten().filter(|v| *v < 0).count();
        if clipped == 0 {
            return Ok((df.clone(), 0));
        }
        debug!(column = %self.column, clipped, "flooring negative cells");

        let floored = df
            .clone()
            .lazy()
            .with_columns([when(col(self.column.as_str()).lt(lit(0)))
                .then(lit(0i64))
                .otherwise(col(self.column.as_str()))
                .alias(self.column.as_str())])
            .collect()?;
        Ok((floored, clipped))
    }
}
