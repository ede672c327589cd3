use log::LevelFilter;

pub mod catalog;
pub mod config;
pub mod error;
pub mod images;
pub mod record;
pub mod table;

pub use error::AppError;

/// Info-level logging to stderr; `RUST_LOG` overrides the default.
pub fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
