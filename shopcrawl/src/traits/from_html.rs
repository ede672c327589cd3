/// Builds a typed value out of a raw HTML document.
///
/// Implementors own their selectors; the input is always the full markup
/// returned by a renderer or an HTTP response.
pub trait FromHTML {
    type Error;
    type Output;

    fn from_html(html: &str) -> Result<Self::Output, Self::Error>
    where
        Self: Sized;
}
