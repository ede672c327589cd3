mod crawler;
mod traits;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use crawler::{
    page_url, ListingPage, PageControls, Pagination, Paginator, PaginatorBuilder, PaginatorConfig,
    StopReason, WorkerPool,
};
pub use traits::{FromHTML, PageRenderer};
