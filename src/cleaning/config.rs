//! Cleaning configuration

use super::repair::Correction;
use crate::schema;
use serde::{Deserialize, Serialize};

/// Configuration for the cleaning pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Placeholder token meaning zero / "not recorded"
    pub sentinel: String,

    /// strftime pattern for the date column (day before month)
    pub date_format: String,

    /// Count columns coerced from text to integer
    pub count_columns: Vec<String>,

    /// Known corrections applied before coercion, exact cell match only.
    /// Future anomalies are added here as data, not as code edits.
    pub corrections: Vec<Correction>,

    /// Whether to floor the aggregate total at zero
    pub floor_total: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            sentinel: "-".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            count_columns: schema::count_columns(),
            corrections: vec![
                // Thousands-separator artifact from a transcription typo;
                // a point fix, not a general comma-number parser.
                Correction::for_column("Up to 1 hr", "1,678", "167"),
            ],
            floor_total: true,
        }
    }
}

impl CleaningConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sentinel token
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Set the date format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Add a correction to the table
    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.corrections.push(correction);
        self
    }

    /// Replace the corrections table
    pub fn with_corrections(mut self, corrections: Vec<Correction>) -> Self {
        self.corrections = corrections;
        self
    }

    /// Enable or disable the non-negative floor on the total column
    pub fn with_floor_total(mut self, floor: bool) -> Self {
        self.floor_total = floor;
        self
    }
}
