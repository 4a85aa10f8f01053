//! Shared application state.
//!
//! The page registry lives here for the lifetime of the process: built once
//! in `AppState::new` at startup, dropped with the last router clone at
//! shutdown. Handlers reach it only through the registry's operations.

use std::sync::Arc;

use pagehits_core::PageRegistry;

use crate::config::AppConfig;
use crate::obs::metrics::ApiMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    registry: PageRegistry,
    metrics: ApiMetrics,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry: PageRegistry::new(),
                metrics: ApiMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> &ApiMetrics {
        &self.inner.metrics
    }

    /// Prometheus exposition of every metric, sampled now.
    pub fn render_metrics(&self) -> String {
        self.inner.metrics.render(self.inner.registry.len())
    }
}
