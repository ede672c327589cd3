use std::{fmt::Display, time::Duration};

use async_trait::async_trait;

/// A browser-like engine able to load a URL and hand back the rendered markup.
///
/// One renderer is one session: callers never share it across concurrent jobs.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    type Error: Display + Send;

    /// Bounds every following navigation.
    async fn set_navigation_timeout(&self, timeout: Duration) -> Result<(), Self::Error>;

    async fn goto(&self, url: &str) -> Result<(), Self::Error>;

    /// Resolves once an element matching `selector` is displayed, or fails after `timeout`.
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<(), Self::Error>;

    async fn scroll_to_bottom(&self) -> Result<(), Self::Error>;

    async fn source(&self) -> Result<String, Self::Error>;
}
