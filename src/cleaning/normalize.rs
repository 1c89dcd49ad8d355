//! Schema normalization: label/cell trimming, weekday validation and
//! day-first date parsing.

use crate::error::Result;
use crate::schema::{self, Weekday};
use polars::prelude::*;
use tracing::debug;

/// Normalizes the raw frame into a well-labelled, date-typed table.
///
/// - strips leading/trailing whitespace from every column label and
///   every string cell
/// - validates the `Day` column against the Mon..Sun domain
/// - parses the `Date` column with a day-first pattern
///
/// Both validation failures raise; there is no quarantine path for a
/// single-file extract.
#[derive(Debug, Clone)]
pub struct SchemaNormalizer {
    date_format: String,
}

impl SchemaNormalizer {
    /// Create a normalizer for the given date pattern.
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Apply normalization, returning a new frame.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut df = Self::trim_labels(df)?;
        df = Self::trim_cells(&df)?;
        self.validate_weekdays(&df)?;
        df = self.parse_dates(&df)?;
        Ok(df)
    }

    fn trim_labels(df: &DataFrame) -> Result<DataFrame> {
        let mut df = df.clone();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        for name in names {
            let trimmed = name.trim();
            if trimmed != name {
                debug!("renaming column '{name}' -> '{trimmed}'");
                df.rename(&name, trimmed.into())?;
                // polars 0.46's rename leaves a stale cached schema behind;
                // clear it so the lazy engine sees the new labels
                df.clear_schema();
            }
        }
        Ok(df)
    }

    fn trim_cells(df: &DataFrame) -> Result<DataFrame> {
        let exprs: Vec<Expr> = df
            .get_columns()
            .iter()
            .filter(|c| c.dtype() == &DataType::String)
            .map(|c| {
                let name = c.name().to_string();
                col(name.as_str()).str().strip_chars(lit(NULL)).alias(name.as_str())
            })
            .collect();

        if exprs.is_empty() {
            return Ok(df.clone());
        }
        Ok(df.clone().lazy().with_columns(exprs).collect()?)
    }

    fn validate_weekdays(&self, df: &DataFrame) -> Result<()> {
        let Ok(column) = df.column(schema::DAY) else {
            return Ok(());
        };
        let series = column.as_materialized_series();
        if series.dtype() != &DataType::String {
            return Ok(());
        }
        for value in series.str()?.unique()?.into_iter().flatten() {
            value.parse::<Weekday>()?;
        }
        Ok(())
    }

    fn parse_dates(&self, df: &DataFrame) -> Result<DataFrame> {
        let Ok(column) = df.column(schema::DATE) else {
            return Ok(df.clone());
        };
        // Already parsed on a re-run
        if column.dtype() != &DataType::String {
            return Ok(df.clone());
        }

        let options = StrptimeOptions {
            format: Some(self.date_format.as_str().into()),
            ..Default::default()
        };
        Ok(df
            .clone()
            .lazy()
            .with_columns([col(schema::DATE).str().to_date(options).alias(schema::DATE)])
            .collect()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParkstatError;
    use chrono::NaiveDate;

    fn days_since_epoch(y: i32, m: u32, d: u32) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        (NaiveDate::from_ymd_opt(y, m, d).unwrap() - epoch).num_days() as i32
    }

    fn raw_df() -> DataFrame {
        df!(
            " Date " => &["01/04/2015", "31/12/2022"],
            "Day" => &[" Wed", "Sat "],
            " Up to 1 hr" => &["12", " 7 "],
        )
        .unwrap()
    }

    #[test]
    fn test_trims_labels_and_cells() {
        let df = SchemaNormalizer::new("%d/%m/%Y").apply(&raw_df()).unwrap();

        assert!(df.column("Date").is_ok());
        assert!(df.column("Up to 1 hr").is_ok());

        let day = df.column("Day").unwrap().as_materialized_series();
        assert_eq!(day.str().unwrap().get(0), Some("Wed"));
        let bucket = df.column("Up to 1 hr").unwrap().as_materialized_series();
        assert_eq!(bucket.str().unwrap().get(1), Some("7"));
    }

    #[test]
    fn test_date_parse_is_day_first() {
        let df = SchemaNormalizer::new("%d/%m/%Y").apply(&raw_df()).unwrap();

        let date = df.column("Date").unwrap().as_materialized_series();
        assert_eq!(date.dtype(), &DataType::Date);

        let physical = date.cast(&DataType::Int32).unwrap();
        let days = physical.i32().unwrap();
        // 01/04/2015 is April 1st, not January 4th
        assert_eq!(days.get(0), Some(days_since_epoch(2015, 4, 1)));
        assert_eq!(days.get(1), Some(days_since_epoch(2022, 12, 31)));
    }

    #[test]
    fn test_rejects_out_of_domain_weekday() {
        let df = df!(
            "Date" => &["01/04/2015"],
            "Day" => &["Funday"],
        )
        .unwrap();

        let err = SchemaNormalizer::new("%d/%m/%Y").apply(&df).unwrap_err();
        assert!(matches!(err, ParkstatError::UnknownWeekday { .. }));
    }

    #[test]
    fn test_unparseable_date_fails() {
        let df = df!(
            "Date" => &["2015-04-01"],
            "Day" => &["Wed"],
        )
        .unwrap();

        assert!(SchemaNormalizer::new("%d/%m/%Y").apply(&df).is_err());
    }

    #[test]
    fn test_reapply_is_noop() {
        let normalizer = SchemaNormalizer::new("%d/%m/%Y");
        let once = normalizer.apply(&raw_df()).unwrap();
        let twice = normalizer.apply(&once).unwrap();
        assert!(once.equals_missing(&twice));
    }
}
