//! Cleaning demo
//!
//! Builds a tiny raw extract in memory, runs the cleaning pipeline and
//! prints the repaired table with its weekday profile.

use parkstat::prelude::*;
use polars::prelude::*;

fn main() -> anyhow::Result<()> {
    let raw = df!(
        " Date" => &["30/12/2019", "31/12/2019", "01/01/2020"],
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
    )?;

    println!("Raw extract:");
    println!("{raw}");

    let outcome = CleaningPipeline::new().run(&raw)?;
    println!("\nCleaned:");
    println!("{}", outcome.df);
    println!("\nReport: {:?}", outcome.report);

    println!("\nTotal Exc Sub by weekday:");
    for row in weekday_profile(&outcome.df, "Total Exc Sub")? {
        println!(
            "  {}  n={} mean={:.1}",
            row.weekday, row.stats.count, row.stats.mean
        );
    }

    Ok(())
}
