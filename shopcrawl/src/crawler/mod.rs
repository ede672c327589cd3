use std::fmt::Display;

use tokio::time::sleep;

use crate::{FromHTML, PageRenderer};

mod config;
pub use config::PaginatorConfig;

mod listing;
pub use listing::{ListingPage, PageControls, StopReason};

mod paginator_builder;
pub use paginator_builder::PaginatorBuilder;

mod pool;
pub use pool::WorkerPool;

/// Everything collected from one listing, plus why the walk ended.
#[derive(Debug)]
pub struct Pagination<T> {
    pub items: Vec<T>,

    /// Number of pages requested, including the one that ended the walk.
    pub pages_visited: u32,

    pub stop: StopReason,
}

/// Appends the page number query parameter to a listing URL.
pub fn page_url(base_url: &str, page_param: &str, page: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, page_param, page)
}

/// Walks a paginated listing page by page through a [`PageRenderer`].
pub struct Paginator {
    /// Selector, timeouts and settle policy applied to every page.
    config: PaginatorConfig,
}

impl Paginator {
    pub fn new(config: PaginatorConfig) -> Self {
        Self { config }
    }

    /// Collects listing items from page 1 onwards until a stop condition hits.
    ///
    /// # Arguments
    ///
    /// * `renderer` - The session used for every page; it stays open afterwards.
    /// * `base_url` - The listing URL without the page parameter.
    ///
    /// # Returns
    ///
    /// The accumulated items. A failing page ends the walk with
    /// [`StopReason::PageError`] but keeps the items of earlier pages.
    ///
    /// # Remarks
    ///
    /// Pages are requested strictly in increasing order; once a page comes
    /// back empty the next one is never requested.
    ///
    pub async fn paginate<R, L, T>(&self, renderer: &R, base_url: &str) -> Pagination<T>
    where
        R: PageRenderer + ?Sized,
        L: FromHTML<Output = ListingPage<T>>,
        L::Error: Display,
    {
        let mut items = Vec::new();
        let mut page_number = 1;

        loop {
            let url = page_url(base_url, self.config.page_param(), page_number);
            log::info!("scraping page {}: {}", page_number, url);

            let page = match self.load_page::<R, L, T>(renderer, &url).await {
                Ok(page) => page,
                Err(err) => {
                    log::error!("error processing page {}: {}", page_number, err);
                    return Pagination {
                        items,
                        pages_visited: page_number,
                        stop: StopReason::PageError(err),
                    };
                }
            };

            let stop = page.stop_reason(page_number);
            if !page.items.is_empty() {
                log::info!("found {} items on page {}", page.items.len(), page_number);
                items.extend(page.items);
            }

            if let Some(stop) = stop {
                log::info!("stopping at page {}: {}", page_number, stop);
                return Pagination {
                    items,
                    pages_visited: page_number,
                    stop,
                };
            }

            page_number += 1;
        }
    }

    /// Loads one page and scrolls until the item count stops changing.
    async fn load_page<R, L, T>(&self, renderer: &R, url: &str) -> Result<ListingPage<T>, String>
    where
        R: PageRenderer + ?Sized,
        L: FromHTML<Output = ListingPage<T>>,
        L::Error: Display,
    {
        renderer.goto(url).await.map_err(|err| err.to_string())?;
        renderer
            .wait_for_visible(self.config.ready_selector(), self.config.ready_timeout())
            .await
            .map_err(|err| err.to_string())?;

        let mut latest = None;
        let mut last_count = None;
        let mut stable = 0;

        for cycle in 0..self.config.max_settle_cycles() {
            renderer
                .scroll_to_bottom()
                .await
                .map_err(|err| err.to_string())?;
            sleep(self.config.settle_interval()).await;

            let html = renderer.source().await.map_err(|err| err.to_string())?;
            let page = L::from_html(&html).map_err(|err| err.to_string())?;
            let count = page.items.len();

            if last_count == Some(count) {
                stable += 1;
            } else {
                stable = 0;
            }
            last_count = Some(count);
            latest = Some(page);

            if stable >= self.config.stable_observations() {
                log::debug!("{} settled at {} items after {} scrolls", url, count, cycle + 1);
                break;
            }
        }

        latest.ok_or_else(|| format!("no observation of {}", url))
    }
}
