//! Value repair: declarative corrections, sentinel substitution,
//! integer coercion and comment nulling.

use super::config::CleaningConfig;
use crate::error::{ParkstatError, Result};
use crate::schema;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A known correction: exact cell match mapped to a replacement token.
///
/// Corrections are data, not code. The default table carries the one
/// anomaly observed in the source extract; new ones are appended without
/// touching the repair logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Column the correction is scoped to; `None` applies everywhere
    pub column: Option<String>,
    /// Raw token to match, after trimming
    pub from: String,
    /// Replacement token
    pub to: String,
}

impl Correction {
    /// Correction applied to every column
    pub fn global(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            column: None,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Correction scoped to a single column
    pub fn for_column(
        column: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            column: Some(column.into()),
            from: from.into(),
            to: to.into(),
        }
    }

    fn applies_to(&self, column: &str) -> bool {
        match &self.column {
            Some(scope) => scope == column,
            None => true,
        }
    }
}

/// Counts of cells touched by one repair pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RepairCounts {
    pub sentinels_replaced: usize,
    pub corrections_applied: usize,
    pub comments_nulled: usize,
}

/// Repairs the textual encodings of the numeric columns.
///
/// Substitutions only ever touch string-typed columns, so re-running the
/// repairer on an already-cleaned frame is a no-op.
#[derive(Debug, Clone)]
pub struct ValueRepairer {
    sentinel: String,
    corrections: Vec<Correction>,
    count_columns: Vec<String>,
}

impl ValueRepairer {
    /// Build a repairer from a cleaning configuration.
    pub fn from_config(config: &CleaningConfig) -> Self {
        Self {
            sentinel: config.sentinel.clone(),
            corrections: config.corrections.clone(),
            count_columns: config.count_columns.clone(),
        }
    }

    /// Apply the repair pass, returning a new frame.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        Ok(self.apply_counted(df)?.0)
    }

    /// Apply the repair pass, also reporting how many cells were touched.
    pub fn apply_counted(&self, df: &DataFrame) -> Result<(DataFrame, RepairCounts)> {
        let mut counts = RepairCounts::default();

        let string_cols: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| c.dtype() == &DataType::String)
            .map(|c| c.name().to_string())
            .collect();

        for name in &string_cols {
            let series = df.column(name)?.as_materialized_series();
            for value in series.str()?.into_iter().flatten() {
                if value == self.sentinel {
                    counts.sentinels_replaced += 1;
                } else if self
                    .corrections
                    .iter()
                    .any(|c| c.applies_to(name) && c.from == value)
                {
                    counts.corrections_applied += 1;
                }
            }
        }

        let mut result = self.substitute(df, &string_cols)?;
        result = self.coerce_counts(result)?;
        counts.comments_nulled = Self::null_comments(&mut result)?;

        debug!(
            sentinels = counts.sentinels_replaced,
            corrections = counts.corrections_applied,
            comments = counts.comments_nulled,
            "repair pass complete"
        );
        Ok((result, counts))
    }

    /// Sentinel and correction substitution, exact cell match against the
    /// raw (trimmed) token.
    fn substitute(&self, df: &DataFrame, string_cols: &[String]) -> Result<DataFrame> {
        if string_cols.is_empty() {
            return Ok(df.clone());
        }

        let mut exprs = Vec::with_capacity(string_cols.len());
        for name in string_cols {
            let mut expr = when(col(name.as_str()).eq(lit(self.sentinel.as_str())))
                .then(lit("0"))
                .otherwise(col(name.as_str()));
            for correction in self.corrections.iter().filter(|c| c.applies_to(name)) {
                expr = when(col(name.as_str()).eq(lit(correction.from.as_str())))
                    .then(lit(correction.to.as_str()))
                    .otherwise(expr);
            }
            exprs.push(expr.alias(name.as_str()));
        }
        Ok(df.clone().lazy().with_columns(exprs).collect()?)
    }

    /// Cast the count columns and the aggregate total to integers. Any
    /// cell still non-numeric after substitution is a hard error.
    fn coerce_counts(&self, mut df: DataFrame) -> Result<DataFrame> {
        let mut targets = self.count_columns.clone();
        targets.push(schema::TOTAL_EXC_SUB.to_string());

        for name in &targets {
            let Ok(column) = df.column(name) else {
                continue;
            };
            if column.dtype() != &DataType::String {
                continue;
            }

            let series = column.as_materialized_series();
            let nulls_before = series.null_count();
            let casted = series.cast(&DataType::Int64)?;
            let failures = casted.null_count() - nulls_before;
            if failures > 0 {
                return Err(ParkstatError::CoercionError {
                    column: name.clone(),
                    failures,
                });
            }
            df.with_column(casted)?;
        }
        Ok(df)
    }

    /// The literal `"0"` in the comments column is a "no comment"
    /// placeholder; replace it with null, pass everything else through.
    fn null_comments(df: &mut DataFrame) -> Result<usize> {
        let Ok(column) = df.column(schema::COMMENTS) else {
            return Ok(0);
        };
        if column.dtype() != &DataType::String {
            return Ok(0);
        }

        let nulled = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .filter(|v| *v == "0")
            .count();
        if nulled == 0 {
            return Ok(0);
        }

        *df = df
            .clone()
            .lazy()
            .with_columns([when(col(schema::COMMENTS).eq(lit("0")))
                .then(lit(NULL))
                .otherwise(col(schema::COMMENTS))
                .alias(schema::COMMENTS)])
            .collect()?;
        Ok(nulled)
    }
}
