use std::fmt;

/// Parsed view of one rendered listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage<T> {
    pub items: Vec<T>,

    /// `None` when the page carries no pagination block at all.
    pub controls: Option<PageControls>,
}

/// What the pagination block of a listing page exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageControls {
    pub has_next: bool,
    pub has_current_marker: bool,

    /// Largest numeric label among the block's links and spans.
    pub max_page: Option<u32>,
}

/// Why a pagination run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    NoItems,
    NoPagination,
    NoNextLink,
    LastPage(u32),
    MissingPageLabels,
    PageError(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::NoItems => write!(f, "no items on page"),
            StopReason::NoPagination => write!(f, "no pagination found"),
            StopReason::NoNextLink => write!(f, "no next page link found"),
            StopReason::LastPage(total) => write!(f, "reached last page ({})", total),
            StopReason::MissingPageLabels => write!(f, "no numeric page labels"),
            StopReason::PageError(err) => write!(f, "page error: {}", err),
        }
    }
}

impl<T> ListingPage<T> {
    /// Decides whether pagination stops after `page_number`.
    ///
    /// The conditions are checked independently, first match wins. An empty
    /// page stops before its controls are even considered.
    pub fn stop_reason(&self, page_number: u32) -> Option<StopReason> {
        if self.items.is_empty() {
            return Some(StopReason::NoItems);
        }

        let Some(controls) = &self.controls else {
            return Some(StopReason::NoPagination);
        };

        if !controls.has_next {
            return Some(StopReason::NoNextLink);
        }

        if controls.has_current_marker {
            match controls.max_page {
                Some(total) if page_number >= total => return Some(StopReason::LastPage(total)),
                Some(_) => {}
                None => return Some(StopReason::MissingPageLabels),
            }
        }

        None
    }
}
