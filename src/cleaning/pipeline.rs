//! The cleaning pipeline: normalize, repair, floor.

use super::{CleaningConfig, NegativeFloor, SchemaNormalizer, ValueRepairer};
use crate::error::Result;
use crate::loader::DataLoader;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// What one cleaning run touched
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows: usize,
    pub sentinels_replaced: usize,
    pub corrections_applied: usize,
    pub comments_nulled: usize,
    pub cells_floored: usize,
}

/// Cleaned table plus its report
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub df: DataFrame,
    pub report: CleaningReport,
}

/// Composes the cleaning stages into one pass over the raw frame.
///
/// Each stage is a pure transformation taking and returning a frame, so
/// stage ordering and idempotence stay auditable: normalize (labels,
/// cells, weekday domain, dates), repair (corrections, sentinel,
/// coercion, comments), floor (non-negative aggregate total).
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    config: CleaningConfig,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningPipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CleaningConfig::default())
    }

    /// Create a pipeline with a custom configuration.
    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Run all stages over a raw frame.
    pub fn run(&self, df: &DataFrame) -> Result<CleaningOutcome> {
        let mut report = CleaningReport {
            rows: df.height(),
            ..Default::default()
        };

        let normalized = SchemaNormalizer::new(self.config.date_format.as_str()).apply(df)?;

        let repairer = ValueRepairer::from_config(&self.config);
        let (repaired, counts) = repairer.apply_counted(&normalized)?;
        report.sentinels_replaced = counts.sentinels_replaced;
        report.corrections_applied = counts.corrections_applied;
        report.comments_nulled = counts.comments_nulled;

        let cleaned = if self.config.floor_total {
            let (floored, clipped) = NegativeFloor::default().apply_counted(&repaired)?;
            report.cells_floored = clipped;
            floored
        } else {
            repaired
        };

        info!(
            rows = report.rows,
            sentinels = report.sentinels_replaced,
            corrections = report.corrections_applied,
            floored = report.cells_floored,
            "cleaning complete"
        );
        Ok(CleaningOutcome {
            df: cleaned,
            report,
        })
    }

    /// Convenience: run and keep only the cleaned frame.
    pub fn clean(&self, df: &DataFrame) -> Result<DataFrame> {
        Ok(self.run(df)?.df)
    }

    /// Load a CSV file and run all stages.
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<CleaningOutcome> {
        let df = DataLoader::new().load_csv(path)?;
        self.run(&df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn raw_df() -> DataFrame {
        df!(
            " Date" => &["01/04/2019", "02/04/2019", "03/04/2019"],
            "Day" => &["Mon", "Tue ", "Wed"],
            "Up to 1 hr" => &["1,678", "12", "-"],
            "1 to 2 hrs" => &["3", "-", "5"],
            "2 to 3 hrs" => &["0", "1", "2"],
            "3 to 4 hrs" => &["0", "0", "0"],
            "4 to 5 hrs" => &["-", "-", "-"],
            "5 to 6 hrs" => &["1", "0", "0"],
            "6 to <24 hours" => &["2", "2", "2"],
            "24 hours +" => &["0", "0", "1"],
            "Total Exc Sub" => &["173", "15", "-1"],
            "Subscribers" => &["40", "-", "44"],
            "Comments" => &["0", " roadworks ", "0"],
        )
        .unwrap()
    }

    #[test]
    fn test_full_run_types_and_report() {
        let outcome = CleaningPipeline::new().run(&raw_df()).unwrap();
        let df = &outcome.df;

        assert_eq!(df.column(schema::DATE).unwrap().dtype(), &DataType::Date);
        for name in schema::count_columns() {
            assert_eq!(df.column(&name).unwrap().dtype(), &DataType::Int64, "{name}");
        }

        let report = outcome.report;
        assert_eq!(report.rows, 3);
        assert_eq!(report.sentinels_replaced, 6);
        assert_eq!(report.corrections_applied, 1);
        assert_eq!(report.comments_nulled, 2);
        assert_eq!(report.cells_floored, 1);
    }

    #[test]
    fn test_total_floor_regression() {
        let df = CleaningPipeline::new().clean(&raw_df()).unwrap();
        let total = df
            .column(schema::TOTAL_EXC_SUB)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .clone();
        assert_eq!(total.get(2), Some(0));
        assert!(total.into_iter().flatten().all(|v| v >= 0));
    }

    #[test]
    fn test_rerun_on_cleaned_frame_is_noop() {
        let pipeline = CleaningPipeline::new();
        let once = pipeline.clean(&raw_df()).unwrap();
        let outcome = pipeline.run(&once).unwrap();

        assert!(once.equals_missing(&outcome.df));
        assert_eq!(outcome.report.sentinels_replaced, 0);
        assert_eq!(outcome.report.corrections_applied, 0);
        assert_eq!(outcome.report.cells_floored, 0);
    }

    #[test]
    fn test_floor_can_be_disabled() {
        let config = CleaningConfig::default().with_floor_total(false);
        let df = CleaningPipeline::with_config(config).clean(&raw_df()).unwrap();

        let total = df
            .column(schema::TOTAL_EXC_SUB)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .clone();
        assert_eq!(total.get(2), Some(-1));
    }
}
