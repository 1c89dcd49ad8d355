//! Integration test: cleaning pipeline end-to-end from a CSV file

use parkstat::cleaning::{validate, CleaningPipeline};
use parkstat::loader::DataLoader;
use parkstat::schema;
use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

// The typo token contains a comma, so it is quoted in the CSV.
fn sample_rows() -> [&'static str; 4] {
    [
        "30/12/2019,Mon,\"1,678\",3,0,0,-,1,2,0,173,40,0",
        "31/12/2019, Tue ,12,-,1,0,-,0,2,0,15,-, roadworks ",
        "01/01/2020,Wed,-,5,2,0,-,0,2,1,-1,44,0",
        "02/01/2020,Thu,8,2,0,0,-,0,1,0,11,44,0",
    ]
}

/// A small extract with every raw-data quirk the pipeline repairs:
/// padded labels and cells, `-` sentinels, the `1,678` typo, a negative
/// aggregate total and `"0"` comment placeholders.
fn write_sample_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        " Date ,Day,Up to 1 hr,1 to 2 hrs,2 to 3 hrs,3 to 4 hrs,4 to 5 hrs,5 to 6 hrs,6 to <24 hours,24 hours +,Total Exc Sub,Subscribers,Comments"
    )
    .unwrap();
    for row in sample_rows() {
        writeln!(file, "{row}").unwrap();
    }
    file
}

#[test]
fn test_run_path_produces_typed_columns() {
    let file = write_sample_csv();
    let outcome = CleaningPipeline::new().run_path(file.path()).unwrap();
    let df = outcome.df;

    assert_eq!(df.height(), 4);
    assert_eq!(df.column(schema::DATE).unwrap().dtype(), &DataType::Date);
    for name in schema::count_columns() {
        let column = df.column(&name).unwrap();
        assert_eq!(column.dtype(), &DataType::Int64, "{name}");
        let negatives = column
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .filter(|v| *v < 0)
            .count();
        assert_eq!(negatives, 0, "{name} should be non-negative");
    }
}

#[test]
fn test_replacement_laws() {
    let file = write_sample_csv();
    let df = CleaningPipeline::new().run_path(file.path()).unwrap().df;

    // 1,678 in "Up to 1 hr" becomes 167
    let bucket = df.column("Up to 1 hr").unwrap().as_materialized_series();
    assert_eq!(bucket.i64().unwrap().get(0), Some(167));

    // every "-" sentinel became 0
    let subs = df.column(schema::SUBSCRIBERS).unwrap().as_materialized_series();
    assert_eq!(subs.i64().unwrap().get(1), Some(0));

    // "0" comments are null, real comments preserved verbatim
    let comments = df.column(schema::COMMENTS).unwrap().as_materialized_series();
    let ca = comments.str().unwrap();
    assert_eq!(ca.get(0), None);
    assert_eq!(ca.get(1), Some("roadworks"));
}

#[test]
fn test_total_floored_and_validated() {
    let file = write_sample_csv();
    let outcome = CleaningPipeline::new().run_path(file.path()).unwrap();

    let total = outcome
        .df
        .column(schema::TOTAL_EXC_SUB)
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .clone();
    // raw -1 on 01/01/2020 becomes 0
    assert_eq!(total.get(2), Some(0));
    assert_eq!(outcome.report.cells_floored, 1);

    assert!(validate(&outcome.df).unwrap().is_empty());
}

#[test]
fn test_cleaning_is_idempotent() {
    let file = write_sample_csv();
    let pipeline = CleaningPipeline::new();
    let once = pipeline.run_path(file.path()).unwrap().df;
    let again = pipeline.run(&once).unwrap();

    assert!(once.equals_missing(&again.df));
    assert_eq!(again.report.sentinels_replaced, 0);
    assert_eq!(again.report.corrections_applied, 0);
    assert_eq!(again.report.comments_nulled, 0);
    assert_eq!(again.report.cells_floored, 0);
}

#[test]
fn test_loader_keeps_raw_tokens() {
    let file = write_sample_csv();
    let df = DataLoader::new().load_csv(file.path()).unwrap();

    for column in df.get_columns() {
        assert_eq!(column.dtype(), &DataType::String);
    }
    let bucket = df.column("Up to 1 hr").unwrap().as_materialized_series();
    assert_eq!(bucket.str().unwrap().get(0), Some("1,678"));
}

#[test]
fn test_day_first_date_parse() {
    let file = write_sample_csv();
    let df = CleaningPipeline::new().run_path(file.path()).unwrap().df;

    let physical = df
        .column(schema::DATE)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Int32)
        .unwrap();
    let days = physical.i32().unwrap().clone();

    let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let expected = chrono::NaiveDate::from_ymd_opt(2019, 12, 30).unwrap();
    assert_eq!(days.get(0), Some((expected - epoch).num_days() as i32));
}
