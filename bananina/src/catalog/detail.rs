use std::convert::Infallible;

use scraper::Html;
use shopcrawl::{FromHTML, PageRenderer};

use crate::{
    config::ScrapeConfig,
    record::{DetailFields, Field},
};

use super::{list_items, selector, text_of};

/// Boilerplate bullet present on every details list.
pub const MEASUREMENT_NOTE: &str = "Product size is measured based on BANANANINA";

pub const LIST_DELIMITER: &str = " | ";

pub const COMPLETENESS_LABEL: &str = "Completeness";

impl FromHTML for DetailFields {
    type Error = Infallible;
    type Output = Self;

    fn from_html(html: &str) -> Result<Self::Output, Self::Error> {
        let document = Html::parse_document(html);
        let by_id = |id: &str| document.select(&selector(&format!("div#{}", id))).next();
        let joined = |items: Vec<String>| items.join(LIST_DELIMITER);

        let details: Field = by_id("product-details")
            .map(|details| {
                let items = list_items(details)
                    .into_iter()
                    .filter(|item| !item.contains(MEASUREMENT_NOTE))
                    .collect();
                joined(items)
            })
            .into();

        let mut condition: Field = by_id("product-condition")
            .map(|condition| joined(list_items(condition)))
            .into();

        if let Some(completeness) = by_id("product-completeness") {
            condition = Field::Value(format!(
                "{}{}{}: {}",
                condition,
                LIST_DELIMITER,
                COMPLETENESS_LABEL,
                joined(list_items(completeness))
            ));
        }

        Ok(Self {
            quality: by_id("product-quality").map(text_of).into(),
            description: by_id("product-description").map(text_of).into(),
            details,
            condition,
        })
    }
}

/// Visits a product page and reads its secondary fields.
///
/// Never fails: navigation or parsing problems yield [`DetailFields::unavailable`].
/// The navigation timeout is expected to be set on the renderer beforehand.
pub async fn fetch_details<R>(renderer: &R, url: &str, config: &ScrapeConfig) -> DetailFields
where
    R: PageRenderer + ?Sized,
{
    match load(renderer, url, config).await {
        Ok(html) => DetailFields::from_html(&html).unwrap_or_else(|never| match never {}),
        Err(err) => {
            log::warn!("error getting product details from {}: {}", url, err);
            DetailFields::unavailable()
        }
    }
}

async fn load<R>(renderer: &R, url: &str, config: &ScrapeConfig) -> Result<String, R::Error>
where
    R: PageRenderer + ?Sized,
{
    renderer.goto(url).await?;

    if let Err(err) = renderer
        .wait_for_visible(&config.detail_ready_selector, config.detail_ready_timeout)
        .await
    {
        log::debug!("{} not ready, reading it anyway: {}", url, err);
    }

    renderer.source().await
}
