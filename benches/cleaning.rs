use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parkstat::cleaning::CleaningPipeline;
use polars::prelude::*;

fn create_raw_data(n_rows: usize) -> DataFrame {
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    let dates: Vec<String> = (0..n_rows)
        .map(|i| format!("{:02}/{:02}/{}", 1 + i % 28, 1 + (i / 28) % 12, 2018 + (i / 336) % 5))
        .collect();
    let day_col: Vec<&str> = (0..n_rows).map(|i| days[i % 7]).collect();
    // sprinkle sentinels through the counts
    let counts: Vec<String> = (0..n_rows)
        .map(|i| {
            if i % 11 == 0 {
                "-".to_string()
            } else {
                (i % 200).to_string()
            }
        })
        .collect();
    let totals: Vec<String> = (0..n_rows)
        .map(|i| if i % 97 == 0 { "-1".to_string() } else { (i % 400).to_string() })
        .collect();
    let comments: Vec<&str> = (0..n_rows)
        .map(|i| if i % 5 == 0 { "market day" } else { "0" })
        .collect();

    let mut columns = vec![
        Column::new("Date".into(), dates),
        Column::new("Day".into(), day_col),
    ];
    for name in [
        "Up to 1 hr",
        "1 to 2 hrs",
        "2 to 3 hrs",
        "3 to 4 hrs",
        "4 to 5 hrs",
        "5 to 6 hrs",
        "6 to <24 hours",
        "24 hours +",
    ] {
        columns.push(Column::new(name.into(), counts.clone()));
    }
    columns.push(Column::new("Total Exc Sub".into(), totals));
    columns.push(Column::new("Subscribers".into(), counts.clone()));
    columns.push(Column::new("Comments".into(), comments));

    DataFrame::new(columns).unwrap()
}

fn bench_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleaning");

    for n_rows in [365, 1825].iter() {
        let df = create_raw_data(*n_rows);

        group.bench_with_input(BenchmarkId::new("run", n_rows), &df, |b, df| {
            b.iter(|| {
                let pipeline = CleaningPipeline::new();
                pipeline.run(black_box(df)).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cleaning);
criterion_main!(benches);
