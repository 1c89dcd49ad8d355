//! Descriptive statistics over the cleaned table
//!
//! The quartile set here (min, q1, median, q3, max) is what a grouped
//! box plot needs; rendering itself is left to external consumers.

use crate::error::{ParkstatError, Result};
use crate::schema::{self, Weekday};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one set of observations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl DescriptiveStats {
    /// Compute a summary from a slice of values.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let variance: f64 = values
            .iter()
            .map(|&x| (x - mean).powi(2))
            .sum::<f64>()
            / count as f64;
        let std_dev = variance.sqrt();

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            count,
            min,
            max,
            mean,
            std_dev,
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
        }
    }
}

/// Linear-interpolated quantile of pre-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Summary of one table column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub null_count: usize,
    pub stats: DescriptiveStats,
}

/// Per-weekday summary of one count column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayStats {
    pub weekday: Weekday,
    pub stats: DescriptiveStats,
}

/// Extract a numeric column as non-null f64 values.
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let series = df
        .column(column)
        .map_err(|_| ParkstatError::ColumnNotFound(column.to_string()))?
        .as_materialized_series();
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().flatten().collect())
}

/// Summarize every integer column of the cleaned table.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::new();
    for column in df.get_columns() {
        if column.dtype() != &DataType::Int64 {
            continue;
        }
        let name = column.name().to_string();
        let values = numeric_values(df, &name)?;
        summaries.push(ColumnSummary {
            null_count: column.null_count(),
            stats: DescriptiveStats::from_values(&values),
            column: name,
        });
    }
    Ok(summaries)
}

/// Per-weekday statistics for one count column, ordered Mon through Sun.
///
/// Weekdays absent from the data still appear, with an empty summary, so
/// consumers can rely on exactly seven rows in canonical order.
pub fn weekday_profile(df: &DataFrame, column: &str) -> Result<Vec<WeekdayStats>> {
    let days = df
        .column(schema::DAY)
        .map_err(|_| ParkstatError::ColumnNotFound(schema::DAY.to_string()))?
        .as_materialized_series()
        .str()?
        .clone();
    let series = df
        .column(column)
        .map_err(|_| ParkstatError::ColumnNotFound(column.to_string()))?
        .as_materialized_series();
    let values = series.cast(&DataType::Float64)?.f64()?.clone();

    let mut grouped: BTreeMap<Weekday, Vec<f64>> = BTreeMap::new();
    for (day, value) in days.into_iter().zip(values.into_iter()) {
        let (Some(day), Some(value)) = (day, value) else {
            continue;
        };
        grouped.entry(day.parse::<Weekday>()?).or_default().push(value);
    }

    Ok(Weekday::ALL
        .iter()
        .map(|weekday| WeekdayStats {
            weekday: *weekday,
            stats: grouped
                .get(weekday)
                .map(|v| DescriptiveStats::from_values(v))
                .unwrap_or_default(),
        })
        .collect())
}
