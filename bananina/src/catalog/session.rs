use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use shopcrawl::PageRenderer;
use thirtyfour::prelude::*;

use crate::{
    config::{
        headers::{CHROME_ARGS, CHROME_USER_AGENT, WINDOW_SIZE},
        ScrapeConfig,
    },
    error::AppError,
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// One Chrome session behind a WebDriver endpoint, owned by a single category job.
pub struct ChromeSession {
    driver: WebDriver,
}

impl ChromeSession {
    pub async fn new(config: &ScrapeConfig) -> Result<Self, AppError> {
        let mut caps = DesiredCapabilities::chrome();

        if config.headless {
            caps.add_chrome_arg("--headless")?;
        }

        for arg in CHROME_ARGS {
            caps.add_chrome_arg(arg)?;
        }
        caps.add_chrome_arg(&format!("--user-agent={}", CHROME_USER_AGENT))?;
        caps.add_chrome_arg(&format!("--window-size={},{}", WINDOW_SIZE.0, WINDOW_SIZE.1))?;

        caps.add_chrome_option(
            "prefs",
            json!({
                "profile.default_content_settings": {
                    "images": 2 // Do not load images.
                },
                "profile.managed_default_content_settings": {
                    "images": 2 // Do not load images.
                }
            }),
        )?;

        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        driver
            .set_page_load_timeout(config.paginator.ready_timeout())
            .await?;

        Ok(Self { driver })
    }
}

/// A renderer backed by a browser process that must be shut down explicitly.
#[async_trait]
pub trait BrowserSession: PageRenderer + Sized {
    async fn close(self) -> Result<(), Self::Error>;
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn close(self) -> Result<(), AppError> {
        self.driver.quit().await?;
        Ok(())
    }
}

#[async_trait]
impl PageRenderer for ChromeSession {
    type Error = AppError;

    async fn set_navigation_timeout(&self, timeout: Duration) -> Result<(), AppError> {
        self.driver.set_page_load_timeout(timeout).await?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<(), AppError> {
        log::debug!("visiting: {}", url);
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<(), AppError> {
        self.driver
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .and_displayed()
            .first()
            .await?;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<(), AppError> {
        self.driver.execute(SCROLL_TO_BOTTOM, Vec::new()).await?;
        Ok(())
    }

    async fn source(&self) -> Result<String, AppError> {
        Ok(self.driver.source().await?)
    }
}
