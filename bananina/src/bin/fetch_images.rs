use std::{sync::Arc, time::Instant};

use bananina::{config::FetchConfig, images::fetch_all, setup_logging, AppError};
use clap::Parser;

/// Download the images referenced by every `*_bags.csv` table and record their local paths.
#[derive(Parser)]
#[command(version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_logging();
    let _cli = Cli::parse();

    let started = Instant::now();
    let summary = fetch_all(Arc::new(FetchConfig::default())).await?;

    if summary.successful + summary.failed == 0 {
        println!("No CSV files found!");
        return Ok(());
    }

    println!("\n{}", "=".repeat(50));
    println!(
        "Processing completed in {:.2} seconds!",
        started.elapsed().as_secs_f64()
    );
    println!("Successfully processed: {} files", summary.successful);
    println!("Failed to process: {} files", summary.failed);
    println!("{}", "=".repeat(50));

    Ok(())
}
