use std::{
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    sync::Arc,
};

use futures::{FutureExt, StreamExt};
use shopcrawl::{FromHTML, PageRenderer, Paginator, StopReason, WorkerPool};
use tokio::time::sleep;

use crate::{
    config::{CategorySpec, ScrapeConfig},
    error::AppError,
    record::{DetailFields, ItemSummary, ProductRecord},
    table::ProductTableWriter,
};

use super::{fetch_details, BrowserSession, CatalogListing, ChromeSession, ProductFragment};

/// What one category produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: String,
    pub rows: usize,
    pub pages_visited: u32,
    pub stop: StopReason,
    pub table: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub successful: usize,
    pub failed: usize,
}

/// Paginates one category, then extracts and stores every collected item.
///
/// # Arguments
///
/// * `renderer` - The category's own session, used for listing and detail pages.
/// * `category` - Name and listing URL.
/// * `config` - Paginator settings, detail timeouts and output directory.
///
/// # Returns
///
/// A report once the table is written, or [`AppError::EmptyListing`] when
/// pagination collected nothing.
///
pub async fn run_category<R>(
    renderer: &R,
    category: &CategorySpec,
    config: &ScrapeConfig,
) -> Result<CategoryReport, AppError>
where
    R: PageRenderer + ?Sized,
{
    log::info!("starting to scrape {} bags from {}", category.name, category.listing_url);

    let paginator = Paginator::new(config.paginator.clone());
    let pagination = paginator
        .paginate::<R, CatalogListing, ProductFragment>(renderer, &category.listing_url)
        .await;

    log::info!(
        "total products found for {} across {} pages: {}",
        category.name,
        pagination.pages_visited,
        pagination.items.len()
    );
    if pagination.items.is_empty() {
        return Err(AppError::EmptyListing(category.name.clone()));
    }

    let table = config.table_path(category);
    let mut writer = ProductTableWriter::create(&table)?;

    if let Err(err) = renderer.set_navigation_timeout(config.detail_timeout).await {
        log::warn!("could not shorten navigation timeout: {}", err);
    }

    let total = pagination.items.len();
    for (index, fragment) in pagination.items.iter().enumerate() {
        if index > 0 {
            sleep(config.item_pause).await;
        }

        let summary = ItemSummary::from_html(fragment.html()).unwrap_or_else(|never| match never {});
        let details = match summary.product_link.value() {
            Some(link) => {
                log::debug!("getting details for product {}", index + 1);
                fetch_details(renderer, link, config).await
            }
            None => DetailFields::unavailable(),
        };

        writer.write(&ProductRecord::new(summary, details))?;
        log::info!("{}: processed {}/{} products", category.name, index + 1, total);
    }

    let rows = writer.finish()?;

    Ok(CategoryReport {
        category: category.name.clone(),
        rows,
        pages_visited: pagination.pages_visited,
        stop: pagination.stop,
        table,
    })
}

/// Runs one category in `session` and closes it afterwards, even when the run panics.
///
/// A panic is re-raised once the session is closed, so the worker pool still
/// reports it.
pub async fn run_in_session<S: BrowserSession>(
    session: S,
    category: &CategorySpec,
    config: &ScrapeConfig,
) -> Result<CategoryReport, AppError> {
    let outcome = AssertUnwindSafe(run_category(&session, category, config))
        .catch_unwind()
        .await;

    if let Err(err) = session.close().await {
        log::warn!("failed to close browser for {}: {}", category.name, err);
    }

    match outcome {
        Ok(result) => result,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Runs one category in a fresh browser session.
pub async fn scrape_category(
    category: &CategorySpec,
    config: &ScrapeConfig,
) -> Result<CategoryReport, AppError> {
    let session = ChromeSession::new(config).await?;
    run_in_session(session, category, config).await
}

/// Scrapes every configured category on a pool of `category_workers` sessions.
pub async fn scrape_all(config: Arc<ScrapeConfig>) -> ScrapeSummary {
    let pool = WorkerPool::new(config.category_workers);
    let jobs = config.categories.clone();
    log::info!(
        "scraping {} categories with {} browser sessions",
        jobs.len(),
        pool.concurrency()
    );

    let worker_config = config.clone();
    let mut results = pool.run(jobs, move |category: CategorySpec| {
        let config = worker_config.clone();
        async move {
            let outcome = scrape_category(&category, &config).await;
            (category, outcome)
        }
    });

    let mut summary = ScrapeSummary::default();
    while let Some(result) = results.next().await {
        match result {
            Ok((category, Ok(report))) => {
                log::info!(
                    "data for {} has been saved to {} ({} rows)",
                    category.name,
                    report.table.display(),
                    report.rows
                );
                summary.successful += 1;
            }
            Ok((category, Err(err))) => {
                log::error!("failed to scrape {} bags: {}", category.name, err);
                summary.failed += 1;
            }
            Err(err) => {
                log::error!("category worker failed: {}", err);
                summary.failed += 1;
            }
        }
    }

    summary
}
