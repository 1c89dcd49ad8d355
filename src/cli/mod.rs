//! parkstat CLI
//!
//! Command-line interface for cleaning the occupancy extract and
//! printing descriptive summaries.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use crate::cleaning::{validate, CleaningConfig, CleaningPipeline, Correction};
use crate::error::Result;
use crate::loader::{DataLoader, DataSaver};
use crate::schema;
use crate::stats::{self, DescriptiveStats};
use crate::yearly;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}
fn warn(s: &str) -> ColoredString {
    s.truecolor(230, 180, 80)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn kv(key: &str, val: &str) {
    println!("  {} {}", dim(&format!("{key:<18}")), val.white());
}

fn stats_row(label: &str, stats: &DescriptiveStats) {
    println!(
        "  {}  n={:<5} mean={:<9.1} std={:<8.1} min={:<7.0} q1={:<7.1} med={:<7.1} q3={:<7.1} max={:.0}",
        dim(&format!("{label:<16}")),
        stats.count,
        stats.mean,
        stats.std_dev,
        stats.min,
        stats.q1,
        stats.median,
        stats.q3,
        stats.max,
    );
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "parkstat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Car-park occupancy log cleaning and descriptive analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a raw occupancy CSV and write the repaired table
    Clean {
        /// Raw input CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Output CSV for the cleaned table
        #[arg(short, long)]
        output: PathBuf,

        /// JSON file with extra corrections, merged over the defaults
        #[arg(long)]
        corrections: Option<PathBuf>,
    },

    /// Probe a source file: header labels and row count
    Info {
        /// Input CSV
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Clean in memory and print descriptive statistics
    Stats {
        /// Raw input CSV
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Summarize a single calendar year
    Year {
        /// Raw input CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Calendar year, e.g. 2020
        year: i32,
    },

    /// Compare two calendar years
    Compare {
        /// Raw input CSV
        #[arg(short, long)]
        data: PathBuf,

        /// First calendar year
        year_a: i32,

        /// Second calendar year
        year_b: i32,
    },
}

fn pipeline_with_corrections(corrections: Option<&Path>) -> Result<CleaningPipeline> {
    let mut config = CleaningConfig::default();
    if let Some(path) = corrections {
        let json = std::fs::read_to_string(path)?;
        let extra: Vec<Correction> = serde_json::from_str(&json)?;
        for correction in extra {
            config = config.with_correction(correction);
        }
    }
    Ok(CleaningPipeline::with_config(config))
}

/// `clean` command: load, repair, report, write.
pub fn cmd_clean(data: &Path, output: &Path, corrections: Option<&Path>) -> Result<()> {
    section("clean");
    let pipeline = pipeline_with_corrections(corrections)?;
    let outcome = pipeline.run_path(data)?;

    let report = outcome.report;
    step_ok(&format!("{} rows cleaned", report.rows));
    kv("sentinels", &report.sentinels_replaced.to_string());
    kv("corrections", &report.corrections_applied.to_string());
    kv("comments nulled", &report.comments_nulled.to_string());
    kv("cells floored", &report.cells_floored.to_string());

    let issues = validate(&outcome.df)?;
    if issues.is_empty() {
        step_ok("invariants hold");
    } else {
        for issue in &issues {
            println!("  {} {:?}", warn("!"), issue);
        }
    }

    let mut df = outcome.df;
    DataSaver::save_csv(&mut df, output)?;
    step_ok(&format!("written to {}", output.display()));
    Ok(())
}

/// `info` command: cheap file probe.
pub fn cmd_info(data: &Path) -> Result<()> {
    section("info");
    let info = DataLoader::new().file_info(data)?;
    kv("path", &info.path);
    kv("size", &format!("{} bytes", info.file_size));
    kv("rows", &info.n_rows.to_string());
    kv("columns", &info.n_cols.to_string());
    for name in &info.columns {
        println!("    {}", dim(name));
    }
    Ok(())
}

/// `stats` command: descriptive statistics and weekday profiles.
pub fn cmd_stats(data: &Path) -> Result<()> {
    let df = CleaningPipeline::new().run_path(data)?.df;

    section("columns");
    for summary in stats::describe(&df)? {
        stats_row(&summary.column, &summary.stats);
    }

    for column in [schema::TOTAL_EXC_SUB, schema::SUBSCRIBERS] {
        section(&format!("{column} by weekday"));
        for row in stats::weekday_profile(&df, column)? {
            stats_row(row.weekday.as_str(), &row.stats);
        }
    }
    Ok(())
}

/// `year` command: single-year summary.
pub fn cmd_year(data: &Path, year: i32) -> Result<()> {
    let df = CleaningPipeline::new().run_path(data)?.df;
    let summary = yearly::analyse_year(&df, year)?;

    section(&format!("year {year}"));
    kv("days", &summary.days.to_string());
    kv("span", &format!("{} .. {}", summary.first_date, summary.last_date));
    stats_row("total exc sub", &summary.total_exc_sub);
    stats_row("subscribers", &summary.subscribers);
    if let Some(day) = summary.busiest_weekday {
        kv("busiest weekday", day.as_str());
    }
    Ok(())
}

/// `compare` command: two-year comparison.
pub fn cmd_compare(data: &Path, year_a: i32, year_b: i32) -> Result<()> {
    let df = CleaningPipeline::new().run_path(data)?.df;
    let comparison = yearly::compare_years(&df, year_a, year_b)?;

    section(&format!("{year_a} vs {year_b}"));
    stats_row(&format!("total {year_a}"), &comparison.year_a.total_exc_sub);
    stats_row(&format!("total {year_b}"), &comparison.year_b.total_exc_sub);
    kv("total Δ mean", &format!("{:+.1}", comparison.total_mean_delta));
    stats_row(&format!("subs {year_a}"), &comparison.year_a.subscribers);
    stats_row(&format!("subs {year_b}"), &comparison.year_b.subscribers);
    kv("subs Δ mean", &format!("{:+.1}", comparison.subscribers_mean_delta));
    Ok(())
}
