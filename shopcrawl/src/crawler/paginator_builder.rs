use std::time::Duration;

use super::config::PaginatorConfig;

pub struct PaginatorBuilder {
    ready_selector: String,
    page_param: String,
    ready_timeout: Duration,
    settle_interval: Duration,
    stable_observations: usize,
    max_settle_cycles: usize,
}

impl Default for PaginatorBuilder {
    fn default() -> Self {
        Self {
            ready_selector: "body".to_string(),
            page_param: "p".to_string(),
            ready_timeout: Duration::from_secs(60),
            settle_interval: Duration::from_millis(500),
            stable_observations: 2,
            max_settle_cycles: 10,
        }
    }
}

impl PaginatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready_selector<S: Into<String>>(mut self, ready_selector: S) -> Self {
        self.ready_selector = ready_selector.into();
        self
    }

    pub fn page_param<S: Into<String>>(mut self, page_param: S) -> Self {
        self.page_param = page_param.into();
        self
    }

    pub fn ready_timeout(mut self, ready_timeout: Duration) -> Self {
        self.ready_timeout = ready_timeout;
        self
    }

    pub fn settle_interval(mut self, settle_interval: Duration) -> Self {
        self.settle_interval = settle_interval;
        self
    }

    pub fn stable_observations(mut self, stable_observations: usize) -> Self {
        self.stable_observations = stable_observations;
        self
    }

    pub fn max_settle_cycles(mut self, max_settle_cycles: usize) -> Self {
        self.max_settle_cycles = max_settle_cycles;
        self
    }

    pub fn build(self) -> PaginatorConfig {
        PaginatorConfig::new(
            self.ready_selector,
            self.page_param,
            self.ready_timeout,
            self.settle_interval,
            self.stable_observations,
            self.max_settle_cycles,
        )
    }
}
