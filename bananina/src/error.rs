use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("WebDriver Error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL Error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing column {column:?} in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Not a category table: {}", .0.display())]
    InvalidTableName(PathBuf),

    #[error("No items collected for {0}")]
    EmptyListing(String),
}
