use std::convert::Infallible;

use scraper::{ElementRef, Html};
use shopcrawl::FromHTML;

use crate::record::{Field, ItemSummary, NO_DISCOUNT};

use super::{first, text_of};

/// Lazy-loaded tiles point their `src` at this file until the real image is swapped in.
pub const PLACEHOLDER_IMAGE: &str = "blank.jpg";

pub const MEDIA_BASE_URL: &str = "https://media.banananina.id/catalog/product/";

impl FromHTML for ItemSummary {
    type Error = Infallible;
    type Output = Self;

    /// Reads a single `div.product-box` fragment. Missing markup only ever
    /// blanks the field it belongs to.
    fn from_html(html: &str) -> Result<Self::Output, Self::Error> {
        let fragment = Html::parse_fragment(html);
        let tile = fragment.root_element();

        let (price, original_price, discount) = prices(tile);

        let product_link: Field = tile
            .select(&super::selector("a[href]"))
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string)
            .into();

        let images = first(tile, "div.images");
        let image = |css: &str| {
            images
                .and_then(|images| first(images, css))
                .map_or(Field::Unavailable, image_url)
        };

        Ok(Self {
            brand: first_text(tile, "p.brand"),
            name: first_text(tile, "p.name"),
            price,
            original_price,
            discount,
            sku: sku_from_link(&product_link),
            product_link,
            primary_image: image("img.img-primary"),
            hover_image: image("img.img-secondary"),
        })
    }
}

fn first_text(scope: ElementRef<'_>, css: &str) -> Field {
    first(scope, css).map(text_of).into()
}

/// Price, original price and discount label.
///
/// A `special-price` block means the item is on sale; otherwise only the
/// regular price is known and the original price stays unavailable.
fn prices(tile: ElementRef<'_>) -> (Field, Field, String) {
    let mut discount = NO_DISCOUNT.to_string();

    let Some(price_box) = first(tile, "div.price-box") else {
        return (Field::Unavailable, Field::Unavailable, discount);
    };

    let Some(special) = first(price_box, "p.special-price") else {
        let price = first(price_box, "span.regular-price")
            .map_or(Field::Unavailable, |regular| first_text(regular, "span.price"));
        return (price, Field::Unavailable, discount);
    };

    let price = first_text(special, "span.price");
    let original_price = first(price_box, "p.old-price")
        .map_or(Field::Unavailable, |old| first_text(old, "span.price"));

    if let Some(saving) = first(price_box, "p.yoursaving").and_then(|s| first(s, "span.price")) {
        discount = text_of(saving);
    }

    (price, original_price, discount)
}

fn image_url(img: ElementRef<'_>) -> Field {
    let element = img.value();
    let url = element
        .attr("data-src")
        .filter(|src| !src.is_empty())
        .or_else(|| element.attr("src"));

    match url {
        Some(url) if url.contains(PLACEHOLDER_IMAGE) => match element.attr("realfile") {
            Some(real) if !real.is_empty() => Field::Value(format!("{}{}", MEDIA_BASE_URL, real)),
            _ => Field::from(url),
        },
        Some(url) => Field::from(url),
        None => Field::Unavailable,
    }
}

/// Last path segment of the product link, cut at its first dot.
fn sku_from_link(link: &Field) -> Field {
    link.value()
        .and_then(|link| link.rsplit('/').next())
        .and_then(|segment| segment.split('.').next())
        .filter(|sku| !sku.is_empty())
        .map(str::to_string)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_TILE: &str = r#"
        <div class="product-box">
          <a href="https://www.banananina.co.id/coach-tabby-26.html">
            <div class="images">
              <img class="img-primary" data-src="https://media.banananina.id/catalog/product/c/t/tabby.jpg" src="/skin/blank.jpg">
              <img class="img-secondary" src="https://cdn.test/blank.jpg" realfile="c/t/tabby-hover.jpg">
            </div>
          </a>
          <p class="brand"> Coach </p>
          <p class="name">Tabby <b>26</b></p>
          <div class="price-box">
            <p class="old-price"><span class="price">Rp 9.000.000</span></p>
            <p class="special-price"><span class="price">Rp 7.200.000</span></p>
            <p class="yoursaving"><span class="price">20%</span></p>
          </div>
        </div>"#;

    fn summary(html: &str) -> ItemSummary {
        ItemSummary::from_html(html).unwrap()
    }

    #[test]
    fn extracts_every_field_of_a_sale_tile() {
        let item = summary(FULL_TILE);

        assert_eq!(item.brand, Field::from("Coach"));
        assert_eq!(item.name, Field::from("Tabby26"));
        assert_eq!(item.price, Field::from("Rp 7.200.000"));
        assert_eq!(item.original_price, Field::from("Rp 9.000.000"));
        assert_eq!(item.discount, "20%");
        assert_eq!(
            item.product_link,
            Field::from("https://www.banananina.co.id/coach-tabby-26.html")
        );
        assert_eq!(
            item.primary_image,
            Field::from("https://media.banananina.id/catalog/product/c/t/tabby.jpg")
        );
        assert_eq!(item.sku, Field::from("coach-tabby-26"));
    }

    #[test]
    fn placeholder_with_realfile_resolves_to_cdn() {
        let item = summary(FULL_TILE);
        assert_eq!(
            item.hover_image,
            Field::from("https://media.banananina.id/catalog/product/c/t/tabby-hover.jpg")
        );
    }

    #[test]
    fn placeholder_without_realfile_is_kept() {
        let item = summary(
            r#"<div class="images"><img class="img-primary" src="/skin/blank.jpg"></div>"#,
        );
        assert_eq!(item.primary_image, Field::from("/skin/blank.jpg"));
        assert_eq!(item.hover_image, Field::Unavailable);
    }

    #[test]
    fn empty_data_src_falls_back_to_src() {
        let item = summary(
            r#"<div class="images"><img class="img-primary" data-src="" src="https://cdn.test/a.png"></div>"#,
        );
        assert_eq!(item.primary_image, Field::from("https://cdn.test/a.png"));
    }

    #[test]
    fn regular_price_leaves_original_unavailable() {
        let item = summary(
            r#"<div class="price-box">
                 <span class="regular-price"><span class="price">Rp 1.500.000</span></span>
               </div>"#,
        );
        assert_eq!(item.price, Field::from("Rp 1.500.000"));
        assert_eq!(item.original_price, Field::Unavailable);
        assert_eq!(item.discount, NO_DISCOUNT);
    }

    #[test]
    fn missing_saving_label_keeps_default_discount() {
        let item = summary(
            r#"<div class="price-box">
                 <p class="special-price"><span class="price">Rp 5</span></p>
               </div>"#,
        );
        assert_eq!(item.price, Field::from("Rp 5"));
        assert_eq!(item.original_price, Field::Unavailable);
        assert_eq!(item.discount, NO_DISCOUNT);
    }

    /// Drops the first `start`..`end` span (inclusive) from `html`.
    fn without(html: &str, start: &str, end: &str) -> String {
        let from = html.find(start).unwrap();
        let to = from + html[from..].find(end).unwrap() + end.len();
        format!("{}{}", &html[..from], &html[to..])
    }

    #[test]
    fn missing_node_only_blanks_its_own_fields() {
        let cases: [(&str, &str, &str, fn(&mut ItemSummary)); 6] = [
            ("brand", r#"<p class="brand">"#, "</p>", |item| item.brand = Field::Unavailable),
            ("name", r#"<p class="name">"#, "</p>", |item| item.name = Field::Unavailable),
            ("price box", r#"<div class="price-box">"#, "</div>", |item| {
                item.price = Field::Unavailable;
                item.original_price = Field::Unavailable;
                item.discount = NO_DISCOUNT.to_string();
            }),
            ("images", r#"<div class="images">"#, "</div>", |item| {
                item.primary_image = Field::Unavailable;
                item.hover_image = Field::Unavailable;
            }),
            ("hover image", r#"<img class="img-secondary""#, ">", |item| {
                item.hover_image = Field::Unavailable
            }),
            ("saving", r#"<p class="yoursaving">"#, "</p>", |item| {
                item.discount = NO_DISCOUNT.to_string()
            }),
        ];

        let full = summary(FULL_TILE);
        for (label, start, end, blank) in cases {
            let mut expected = full.clone();
            blank(&mut expected);

            let item = summary(&without(FULL_TILE, start, end));
            assert_eq!(item, expected, "removing {}", label);
        }
    }

    #[test]
    fn missing_link_blanks_link_and_sku_only() {
        let item = summary(r#"<p class="brand">Prada</p><p class="name">Re-Edition</p>"#);

        assert_eq!(item.product_link, Field::Unavailable);
        assert_eq!(item.sku, Field::Unavailable);
        assert_eq!(item.brand, Field::from("Prada"));
        assert_eq!(item.name, Field::from("Re-Edition"));
        assert_eq!(item.price, Field::Unavailable);
    }

    #[test]
    fn sku_ignores_extension_and_path() {
        assert_eq!(
            sku_from_link(&Field::from("https://x.test/bags/lv-speedy.30.html")),
            Field::from("lv-speedy")
        );
        assert_eq!(sku_from_link(&Field::from("https://x.test/bags/")), Field::Unavailable);
    }
}
