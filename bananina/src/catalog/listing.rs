use std::convert::Infallible;

use scraper::Html;
use shopcrawl::{FromHTML, ListingPage, PageControls};

use super::{first, selector, text_of};

/// Outer HTML of one `div.product-box` tile, kept as an owned string so it can
/// cross task boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFragment(String);

impl ProductFragment {
    pub fn new<S: Into<String>>(html: S) -> Self {
        Self(html.into())
    }

    pub fn html(&self) -> &str {
        &self.0
    }
}

/// A rendered category listing page.
pub struct CatalogListing;

impl FromHTML for CatalogListing {
    type Error = Infallible;
    type Output = ListingPage<ProductFragment>;

    fn from_html(html: &str) -> Result<Self::Output, Self::Error> {
        let document = Html::parse_document(html);

        let items = document
            .select(&selector("div.product-box"))
            .map(|tile| ProductFragment::new(tile.html()))
            .collect();

        let controls = document
            .select(&selector("div.pages"))
            .next()
            .map(|pages| PageControls {
                has_next: first(pages, "a.next").is_some(),
                has_current_marker: first(pages, "span.current").is_some(),
                max_page: pages
                    .select(&selector("a, span"))
                    .filter_map(|label| text_of(label).parse::<u32>().ok())
                    .max(),
            });

        Ok(ListingPage { items, controls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ListingPage<ProductFragment> {
        CatalogListing::from_html(html).unwrap()
    }

    #[test]
    fn collects_product_boxes_and_controls() {
        let page = parse(
            r#"<div class="category-products">
                 <div class="product-box"><p class="name">One</p></div>
                 <div class="product-box"><p class="name">Two</p></div>
               </div>
               <div class="pages">
                 <span class="current">1</span>
                 <a href="?p=2">2</a>
                 <a href="?p=3"> 3 </a>
                 <a class="next" href="?p=2">Next</a>
               </div>"#,
        );

        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].html().contains("One"));
        assert_eq!(
            page.controls,
            Some(PageControls {
                has_next: true,
                has_current_marker: true,
                max_page: Some(3),
            })
        );
    }

    #[test]
    fn missing_pagination_block() {
        let page = parse(r#"<div class="product-box"></div>"#);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.controls, None);
    }

    #[test]
    fn last_page_has_no_next_link() {
        let page = parse(
            r#"<div class="product-box"></div>
               <div class="pages"><a href="?p=1">1</a><span class="current">2</span></div>"#,
        );
        let controls = page.controls.unwrap();
        assert!(!controls.has_next);
        assert_eq!(controls.max_page, Some(2));
    }
}
