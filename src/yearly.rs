//! Per-calendar-year slicing and comparison of the cleaned table.

use crate::error::{ParkstatError, Result};
use crate::schema::{self, Weekday};
use crate::stats::{self, DescriptiveStats};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slices the cleaned table into inclusive per-year subsets.
#[derive(Debug, Clone, Default)]
pub struct YearPartitioner;

impl YearPartitioner {
    /// Years present in the table, ascending.
    pub fn years(df: &DataFrame) -> Result<Vec<i32>> {
        let years = Self::year_column(df)?;
        let mut unique: Vec<i32> = years.into_iter().flatten().collect();
        unique.sort_unstable();
        unique.dedup();
        Ok(unique)
    }

    /// Split the table into one frame per calendar year.
    pub fn partition(df: &DataFrame) -> Result<BTreeMap<i32, DataFrame>> {
        let years = Self::year_column(df)?;
        let mut parts = BTreeMap::new();
        for year in Self::years(df)? {
            let mask = years.equal(year);
            parts.insert(year, df.filter(&mask)?);
        }
        Ok(parts)
    }

    /// Rows of a single year; errors if the year is absent.
    pub fn slice_year(df: &DataFrame, year: i32) -> Result<DataFrame> {
        let mask = Self::year_column(df)?.equal(year);
        let slice = df.filter(&mask)?;
        if slice.height() == 0 {
            return Err(ParkstatError::EmptyYear(year));
        }
        Ok(slice)
    }

    fn year_column(df: &DataFrame) -> Result<Int32Chunked> {
        let column = df
            .column(schema::DATE)
            .map_err(|_| ParkstatError::ColumnNotFound(schema::DATE.to_string()))?;
        if column.dtype() != &DataType::Date {
            return Err(ParkstatError::SchemaError(format!(
                "column '{}' must be Date, got {} (run the cleaning pipeline first)",
                schema::DATE,
                column.dtype()
            )));
        }
        Ok(column.as_materialized_series().year()?)
    }
}

/// Descriptive summary of a single year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub total_exc_sub: DescriptiveStats,
    pub subscribers: DescriptiveStats,
    /// Weekday with the highest mean non-subscriber total
    pub busiest_weekday: Option<Weekday>,
}

/// Side-by-side comparison of two years
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearComparison {
    pub year_a: YearSummary,
    pub year_b: YearSummary,
    /// Mean daily non-subscriber total, year B minus year A
    pub total_mean_delta: f64,
    /// Mean daily subscriber count, year B minus year A
    pub subscribers_mean_delta: f64,
}

/// Summarize a single calendar year of the cleaned table.
pub fn analyse_year(df: &DataFrame, year: i32) -> Result<YearSummary> {
    let slice = YearPartitioner::slice_year(df, year)?;

    let physical = slice
        .column(schema::DATE)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let days_ca = physical.i32()?;
    let first = days_ca
        .min()
        .and_then(date_from_epoch_days)
        .ok_or_else(|| ParkstatError::EmptyYear(year))?;
    let last = days_ca
        .max()
        .and_then(date_from_epoch_days)
        .ok_or_else(|| ParkstatError::EmptyYear(year))?;

    let total_values = stats::numeric_values(&slice, schema::TOTAL_EXC_SUB)?;
    let subscriber_values = stats::numeric_values(&slice, schema::SUBSCRIBERS)?;

    let busiest_weekday = stats::weekday_profile(&slice, schema::TOTAL_EXC_SUB)?
        .into_iter()
        .filter(|w| w.stats.count > 0)
        .max_by(|a, b| a.stats.mean.total_cmp(&b.stats.mean))
        .map(|w| w.weekday);

    Ok(YearSummary {
        year,
        days: slice.height(),
        first_date: first,
        last_date: last,
        total_exc_sub: DescriptiveStats::from_values(&total_values),
        subscribers: DescriptiveStats::from_values(&subscriber_values),
        busiest_weekday,
    })
}

/// Compare two calendar years of the cleaned table.
pub fn compare_years(df: &DataFrame, year_a: i32, year_b: i32) -> Result<YearComparison> {
    let a = analyse_year(df, year_a)?;
    let b = analyse_year(df, year_b)?;
    let total_mean_delta = b.total_exc_sub.mean - a.total_exc_sub.mean;
    let subscribers_mean_delta = b.subscribers.mean - a.subscribers.mean;
    Ok(YearComparison {
        year_a: a,
        year_b: b,
        total_mean_delta,
        subscribers_mean_delta,
    })
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1).map(|epoch| epoch + chrono::Duration::days(days as i64))
}
