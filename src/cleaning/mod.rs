//! Cleaning pipeline for the raw occupancy extract
//!
//! The raw CSV encodes numeric fields as text, with a `-` sentinel for
//! zero, stray whitespace in labels and cells, one known transcription
//! typo, and a `"0"` placeholder in the comments column. The pipeline
//! repairs all of that as an explicit sequence of pure DataFrame
//! transformations:
//! - schema normalization (label/cell trimming, weekday validation,
//!   day-first date parsing)
//! - value repair (declarative corrections, sentinel substitution,
//!   integer coercion, comment nulling)
//! - anomaly correction (non-negative floor on the aggregate total)

mod anomaly;
mod config;
mod normalize;
mod pipeline;
mod repair;
mod validate;

pub use anomaly::NegativeFloor;
pub use config::CleaningConfig;
pub use normalize::SchemaNormalizer;
pub use pipeline::{CleaningOutcome, CleaningPipeline, CleaningReport};
pub use repair::{Correction, RepairCounts, ValueRepairer};
pub use validate::{validate, ValidationIssue};
