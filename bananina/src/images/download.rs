use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use reqwest::Client;
use tokio::{fs, io::AsyncWriteExt};
use url::Url;

use crate::{
    config::{headers::image_headers, FetchConfig},
    error::AppError,
};

/// Which of the two tile images a download belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Primary,
    Hover,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::Primary, ImageSlot::Hover];

    pub fn dir_name(self) -> &'static str {
        match self {
            ImageSlot::Primary => "primary",
            ImageSlot::Hover => "hover",
        }
    }

    pub fn url_column(self) -> &'static str {
        match self {
            ImageSlot::Primary => "Primary Image",
            ImageSlot::Hover => "Hover Image",
        }
    }

    pub fn path_column(self) -> &'static str {
        match self {
            ImageSlot::Primary => "Primary Image Local Path",
            ImageSlot::Hover => "Hover Image Local Path",
        }
    }
}

/// Keeps alphanumerics, spaces, hyphens and underscores, then drops trailing whitespace.
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end().to_string()
}

/// `{sanitized name}_{slot}{ext}`, with the extension taken from the URL path.
pub fn image_file_name(name: &str, slot: ImageSlot, url: &Url, fallback_extension: &str) -> String {
    let extension = Path::new(url.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or_else(|| fallback_extension.to_string(), |ext| format!(".{}", ext));

    format!("{}_{}{}", sanitize_name(name), slot.dir_name(), extension)
}

/// Accepts absolute http(s) URLs only.
pub fn parse_image_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::UnsupportedScheme(other.to_string())),
    }
}

static PART_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A sibling of `destination` private to one transfer: `{file}.{n}.part`.
fn part_path(destination: &Path) -> PathBuf {
    let sequence = PART_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut name = destination
        .file_name()
        .map_or_else(OsString::new, OsString::from);
    name.push(format!(".{}.part", sequence));
    destination.with_file_name(name)
}

/// HTTP client preconfigured with the image headers and timeout.
#[derive(Clone)]
pub struct ImageDownloader {
    client: Client,
}

impl ImageDownloader {
    pub fn new(config: &FetchConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(image_headers())
            .timeout(config.download_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Saves `url` at `destination` unless a file is already there.
    ///
    /// An existing file is trusted as is and no request is made. The body goes
    /// into a `.part` sibling private to this call, renamed into place once
    /// complete; a failed transfer removes only that sibling.
    pub async fn download(&self, url: &Url, destination: &Path) -> Result<PathBuf, AppError> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }

        if fs::try_exists(destination).await? {
            log::info!("image already exists: {}", destination.display());
            return Ok(destination.to_path_buf());
        }

        let part = part_path(destination);
        let transfer = match self.stream_to_file(url, &part).await {
            Ok(()) => fs::rename(&part, destination).await.map_err(AppError::from),
            Err(err) => Err(err),
        };

        if let Err(err) = transfer {
            if fs::remove_file(&part).await.is_ok() {
                log::debug!("removed partial file {}", part.display());
            }
            return Err(err);
        }

        log::info!("downloaded: {}", destination.display());
        Ok(destination.to_path_buf())
    }

    async fn stream_to_file(&self, url: &Url, destination: &Path) -> Result<(), AppError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;

        let mut file = fs::File::create(destination).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
