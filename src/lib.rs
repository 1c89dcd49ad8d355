//! parkstat - car-park occupancy log cleaning and analysis
//!
//! This crate loads a multi-year daily car-park occupancy CSV, repairs
//! the inconsistent textual encodings of its numeric fields, and produces
//! descriptive statistics contrasting subscriber and non-subscriber usage
//! by day of week and by calendar year.
//!
//! # Modules
//!
//! - [`loader`] - CSV loading with raw tokens preserved
//! - [`cleaning`] - normalization, value repair, anomaly correction
//! - [`stats`] - descriptive statistics and weekday profiles
//! - [`yearly`] - per-calendar-year slicing and comparison
//! - [`cli`] - command-line interface

pub mod error;

pub mod cleaning;
pub mod loader;
pub mod schema;
pub mod stats;
pub mod yearly;

pub mod cli;

pub use error::{ParkstatError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cleaning::{
        CleaningConfig, CleaningOutcome, CleaningPipeline, CleaningReport, Correction,
        NegativeFloor, SchemaNormalizer, ValueRepairer,
    };
    pub use crate::error::{ParkstatError, Result};
    pub use crate::loader::{DataLoader, DataSaver, FileInfo};
    pub use crate::schema::Weekday;
    pub use crate::stats::{describe, weekday_profile, ColumnSummary, DescriptiveStats};
    pub use crate::yearly::{analyse_year, compare_years, YearPartitioner, YearSummary};
}
