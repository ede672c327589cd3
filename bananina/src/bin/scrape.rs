use std::sync::Arc;

use bananina::{catalog::scrape_all, config::ScrapeConfig, setup_logging, AppError};
use clap::Parser;

/// Scrape every Bananina bag category into `{category}_bags.csv`.
///
/// Needs a WebDriver endpoint (chromedriver) listening on localhost:9515.
#[derive(Parser)]
#[command(version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_logging();
    let _cli = Cli::parse();

    let config = Arc::new(ScrapeConfig::default());
    let summary = scrape_all(config).await;

    println!("\n{}", "=".repeat(50));
    println!("Scraping completed!");
    println!("Successfully scraped: {} categories", summary.successful);
    println!("Failed to scrape: {} categories", summary.failed);
    println!("{}", "=".repeat(50));

    Ok(())
}
