//! In-memory renderer for exercising pagination and pipelines without a browser.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;

use crate::PageRenderer;

#[derive(Default)]
struct State {
    current: Option<String>,
    reads: HashMap<String, usize>,
    visited: Vec<String>,
    navigation_timeout: Option<Duration>,
}

/// Serves canned markup per URL and records every navigation.
///
/// A URL registered with several documents returns them one per `source`
/// call and then keeps returning the last one. Unknown URLs fail to load.
#[derive(Default)]
pub struct StaticRenderer {
    pages: HashMap<String, Vec<String>>,
    state: Mutex<State>,
}

impl StaticRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page<U: Into<String>, H: Into<String>>(mut self, url: U, html: H) -> Self {
        self.pages.insert(url.into(), vec![html.into()]);
        self
    }

    pub fn page_sequence<U: Into<String>>(mut self, url: U, htmls: Vec<&str>) -> Self {
        self.pages
            .insert(url.into(), htmls.into_iter().map(String::from).collect());
        self
    }

    /// URLs passed to `goto`, in call order.
    pub fn visited(&self) -> Vec<String> {
        self.state().visited.clone()
    }

    pub fn navigation_timeout(&self) -> Option<Duration> {
        self.state().navigation_timeout
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PageRenderer for StaticRenderer {
    type Error = String;

    async fn set_navigation_timeout(&self, timeout: Duration) -> Result<(), Self::Error> {
        self.state().navigation_timeout = Some(timeout);
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<(), Self::Error> {
        let mut state = self.state();
        state.visited.push(url.to_string());

        if self.pages.contains_key(url) {
            state.current = Some(url.to_string());
            Ok(())
        } else {
            state.current = None;
            Err(format!("navigation to {} failed", url))
        }
    }

    async fn wait_for_visible(&self, selector: &str, _timeout: Duration) -> Result<(), Self::Error> {
        match self.state().current {
            Some(_) => Ok(()),
            None => Err(format!("{} never became visible", selector)),
        }
    }

    async fn scroll_to_bottom(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn source(&self) -> Result<String, Self::Error> {
        let mut state = self.state();
        let url = state.current.clone().ok_or("no page loaded")?;
        let documents = self.pages.get(&url).ok_or("no page loaded")?;

        let read = state.reads.entry(url).or_insert(0);
        let index = (*read).min(documents.len().saturating_sub(1));
        *read += 1;

        documents
            .get(index)
            .cloned()
            .ok_or_else(|| "empty document sequence".to_string())
    }
}
