use std::{path::PathBuf, time::Duration};

use shopcrawl::{PaginatorBuilder, PaginatorConfig};

pub mod headers;

/// Suffix shared by every per-category table; the fetcher relies on it to find them.
pub const TABLE_SUFFIX: &str = "_bags.csv";

/// One catalog category and the first page of its listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub listing_url: String,
}

impl CategorySpec {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, listing_url: U) -> Self {
        Self {
            name: name.into(),
            listing_url: listing_url.into(),
        }
    }

    pub fn table_file_name(&self) -> String {
        format!("{}{}", self.name, TABLE_SUFFIX)
    }
}

pub fn default_categories() -> Vec<CategorySpec> {
    [
        ("backpacks", "backpacks"),
        ("clutches", "clutches"),
        ("crossbody", "crossbody-bags"),
        ("laptop", "laptop-bags"),
        ("satchels", "satchels"),
        ("shoulder", "shoulder-bags"),
        ("totes", "totes"),
        ("travel", "travel-bags"),
    ]
    .into_iter()
    .map(|(name, slug)| {
        CategorySpec::new(name, format!("https://www.banananina.co.id/bags/{}.html", slug))
    })
    .collect()
}

/// Settings for the catalog scraper.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub categories: Vec<CategorySpec>,

    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    pub headless: bool,

    /// Where `{category}_bags.csv` files are written.
    pub output_dir: PathBuf,

    /// Categories scraped at the same time, each with its own browser session.
    pub category_workers: usize,

    pub paginator: PaginatorConfig,

    pub detail_timeout: Duration,
    pub detail_ready_selector: String,
    pub detail_ready_timeout: Duration,

    /// Pause between two consecutive items of a category.
    pub item_pause: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            output_dir: PathBuf::from("."),
            category_workers: 2,
            paginator: PaginatorBuilder::new()
                .ready_selector(".category-products")
                .page_param("p")
                .ready_timeout(Duration::from_secs(60))
                .settle_interval(Duration::from_millis(750))
                .stable_observations(2)
                .max_settle_cycles(10)
                .build(),
            detail_timeout: Duration::from_secs(15),
            detail_ready_selector: ".product-description".to_string(),
            detail_ready_timeout: Duration::from_secs(5),
            item_pause: Duration::from_millis(100),
        }
    }
}

impl ScrapeConfig {
    pub fn table_path(&self, category: &CategorySpec) -> PathBuf {
        self.output_dir.join(category.table_file_name())
    }
}

/// Settings for the image fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory scanned for `*_bags.csv` tables.
    pub table_dir: PathBuf,
    pub table_suffix: String,

    /// Images land in `{image_root}/{category}/{slot}/`.
    pub image_root: PathBuf,

    pub download_workers: usize,
    pub download_timeout: Duration,

    /// Used when the image URL path has no extension.
    pub fallback_extension: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            table_dir: PathBuf::from("."),
            table_suffix: TABLE_SUFFIX.to_string(),
            image_root: PathBuf::from("images"),
            download_workers: 10,
            download_timeout: Duration::from_secs(10),
            fallback_extension: ".jpg".to_string(),
        }
    }
}
