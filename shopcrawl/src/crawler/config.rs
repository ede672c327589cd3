use std::time::Duration;

/// Knobs for walking a paginated listing. Build one through [`crate::PaginatorBuilder`].
#[derive(Clone, Debug)]
pub struct PaginatorConfig {
    ready_selector: String,
    page_param: String,
    ready_timeout: Duration,
    settle_interval: Duration,
    stable_observations: usize,
    max_settle_cycles: usize,
}

impl PaginatorConfig {
    pub fn new(
        ready_selector: String,
        page_param: String,
        ready_timeout: Duration,
        settle_interval: Duration,
        stable_observations: usize,
        max_settle_cycles: usize,
    ) -> Self {
        Self {
            ready_selector,
            page_param,
            ready_timeout,
            settle_interval,
            stable_observations: stable_observations.max(1),
            max_settle_cycles: max_settle_cycles.max(1),
        }
    }

    pub fn ready_selector(&self) -> &str {
        &self.ready_selector
    }

    pub fn page_param(&self) -> &str {
        &self.page_param
    }

    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    pub fn settle_interval(&self) -> Duration {
        self.settle_interval
    }

    /// Consecutive scrolls that must leave the item count unchanged.
    pub fn stable_observations(&self) -> usize {
        self.stable_observations
    }

    pub fn max_settle_cycles(&self) -> usize {
        self.max_settle_cycles
    }
}
