use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::StreamExt;
use shopcrawl::WorkerPool;

use crate::{
    config::FetchConfig,
    error::AppError,
    record::NOT_AVAILABLE,
    table::{Table, NAME_COLUMN},
};

use super::download::{image_file_name, parse_image_url, ImageDownloader, ImageSlot};

/// Local files obtained for one row; `None` marks a slot with no image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowImages {
    pub primary: Option<PathBuf>,
    pub hover: Option<PathBuf>,
}

impl RowImages {
    pub fn get(&self, slot: ImageSlot) -> Option<&PathBuf> {
        match slot {
            ImageSlot::Primary => self.primary.as_ref(),
            ImageSlot::Hover => self.hover.as_ref(),
        }
    }

    fn set(&mut self, slot: ImageSlot, path: PathBuf) {
        match slot {
            ImageSlot::Primary => self.primary = Some(path),
            ImageSlot::Hover => self.hover = Some(path),
        }
    }
}

/// Outcome of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub category: String,
    pub rows: usize,
    pub primary_saved: usize,
    pub hover_saved: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub successful: usize,
    pub failed: usize,
}

struct RowJob {
    index: usize,
    name: String,
    urls: [(ImageSlot, String); 2],
}

/// `backpacks_bags.csv` → `backpacks`.
pub fn category_from_table(path: &Path, suffix: &str) -> Result<String, AppError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(suffix))
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidTableName(path.to_path_buf()))
}

/// Category tables in `dir`, sorted by file name.
pub fn find_tables(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, AppError> {
    let mut tables = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && category_from_table(&path, suffix).is_ok() {
            tables.push(path);
        }
    }
    tables.sort();
    Ok(tables)
}

/// Downloads the images of every row of one table, then rewrites the table
/// with the local path columns.
///
/// # Arguments
///
/// * `downloader` - Shared HTTP client.
/// * `path` - A `{category}_bags.csv` table.
/// * `config` - Destination root, worker count and fallback extension.
///
/// # Remarks
///
/// Individual download failures leave an empty cell for that slot; only an
/// unreadable or unwritable table fails the whole file.
///
pub async fn process_table(
    downloader: &ImageDownloader,
    path: &Path,
    config: &Arc<FetchConfig>,
) -> Result<FileReport, AppError> {
    let category = category_from_table(path, &config.table_suffix)?;
    log::info!("processing {} category", category);

    let mut table = Table::read(path)?;
    let name_column = table.require_column(NAME_COLUMN, path)?;
    let primary_column = table.require_column(ImageSlot::Primary.url_column(), path)?;
    let hover_column = table.require_column(ImageSlot::Hover.url_column(), path)?;

    let total = table.len();
    log::info!("found {} products", total);

    let jobs: Vec<RowJob> = (0..total)
        .map(|index| RowJob {
            index,
            name: table.cell(index, name_column).to_string(),
            urls: [
                (ImageSlot::Primary, table.cell(index, primary_column).to_string()),
                (ImageSlot::Hover, table.cell(index, hover_column).to_string()),
            ],
        })
        .collect();

    let pool = WorkerPool::new(config.download_workers);
    let worker_downloader = downloader.clone();
    let worker_config = config.clone();
    let worker_category = category.clone();
    let mut results = pool.run(jobs, move |job: RowJob| {
        let downloader = worker_downloader.clone();
        let config = worker_config.clone();
        let category = worker_category.clone();
        async move {
            let images = download_row(&downloader, &config, &category, &job).await;
            (job.index, images)
        }
    });

    let mut images = vec![RowImages::default(); total];
    let mut processed = 0;
    while let Some(result) = results.next().await {
        processed += 1;
        match result {
            Ok((index, row)) => {
                if let Some(entry) = images.get_mut(index) {
                    *entry = row;
                }
            }
            Err(err) => log::error!("error processing row: {}", err),
        }
        log::debug!("{}: processed {}/{} products", category, processed, total);
    }

    for slot in ImageSlot::ALL {
        let paths = images
            .iter()
            .map(|row| {
                row.get(slot)
                    .map(|path| path.display().to_string())
                    .unwrap_or_default()
            })
            .collect();
        table.set_column(slot.path_column(), paths);
    }
    table.write(path)?;

    let saved = |slot| images.iter().filter(|row| row.get(slot).is_some()).count();
    let report = FileReport {
        category,
        rows: total,
        primary_saved: saved(ImageSlot::Primary),
        hover_saved: saved(ImageSlot::Hover),
    };
    log::info!(
        "completed {} category: {} primary and {} hover images for {} products",
        report.category,
        report.primary_saved,
        report.hover_saved,
        report.rows
    );

    Ok(report)
}

async fn download_row(
    downloader: &ImageDownloader,
    config: &FetchConfig,
    category: &str,
    job: &RowJob,
) -> RowImages {
    let mut images = RowImages::default();

    for (slot, raw_url) in &job.urls {
        if raw_url.is_empty() || raw_url == NOT_AVAILABLE {
            continue;
        }

        let url = match parse_image_url(raw_url) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("skipping image {}: {}", raw_url, err);
                continue;
            }
        };

        let destination = config
            .image_root
            .join(category)
            .join(slot.dir_name())
            .join(image_file_name(&job.name, *slot, &url, &config.fallback_extension));

        match downloader.download(&url, &destination).await {
            Ok(path) => images.set(*slot, path),
            Err(err) => log::error!("error downloading image {}: {}", raw_url, err),
        }
    }

    images
}

/// Processes every category table in `config.table_dir`, one file at a time.
pub async fn fetch_all(config: Arc<FetchConfig>) -> Result<FetchSummary, AppError> {
    let tables = find_tables(&config.table_dir, &config.table_suffix)?;
    let mut summary = FetchSummary::default();

    if tables.is_empty() {
        log::warn!("no CSV files found in {}", config.table_dir.display());
        return Ok(summary);
    }

    log::info!("found {} CSV files to process", tables.len());
    let downloader = ImageDownloader::new(&config)?;

    for path in tables {
        log::info!("processing {}", path.display());
        match process_table(&downloader, &path, &config).await {
            Ok(_) => summary.successful += 1,
            Err(err) => {
                log::error!("error processing CSV file {}: {}", path.display(), err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
