//! Second stage: fetch the images referenced by the scraped tables.

mod download;
pub use download::{image_file_name, parse_image_url, sanitize_name, ImageDownloader, ImageSlot};

mod pipeline;
pub use pipeline::{
    category_from_table, fetch_all, find_tables, process_table, FetchSummary, FileReport, RowImages,
};
