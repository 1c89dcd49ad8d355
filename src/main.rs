//! parkstat - main entry point

use clap::Parser;
use parkstat::cli::{cmd_clean, cmd_compare, cmd_info, cmd_stats, cmd_year, Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkstat=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            data,
            output,
            corrections,
        } => cmd_clean(&data, &output, corrections.as_deref())?,
        Commands::Info { data } => cmd_info(&data)?,
        Commands::Stats { data } => cmd_stats(&data)?,
        Commands::Year { data, year } => cmd_year(&data, year)?,
        Commands::Compare { data, year_a, year_b } => cmd_compare(&data, year_a, year_b)?,
    }

    Ok(())
}
