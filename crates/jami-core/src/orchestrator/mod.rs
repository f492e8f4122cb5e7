//! Chart request orchestration: form submit to cached chart or user-facing notice.

mod host;

pub use host::{HostBridge, NoopHost};

use crate::cache::ChartCache;
use crate::error::ChartError;
use crate::normalize::{normalize, BirthDefaults, RawBirthFields};
use crate::shared::{BirthInput, ChartResult};
use host::BusyGuard;
use std::sync::Arc;

/// Title of the notice shown for any failed computation.
pub const ERROR_TITLE: &str = "Error";
/// Generic failure message; status codes and bodies stay in the logs.
pub const ERROR_MESSAGE: &str = "Failed to calculate chart.";

/// Remote chart computation, one call per request.
#[async_trait::async_trait]
pub trait ChartService: Send + Sync {
    async fn analyze_birth(&self, input: &BirthInput) -> Result<ChartResult, ChartError>;
}

/// Coordinates a user-triggered chart request.
///
/// Overlapping submissions are not serialized: whichever response completes
/// last owns the cache. In-flight requests are never cancelled.
pub struct ChartOrchestrator {
    service: Arc<dyn ChartService>,
    cache: ChartCache,
    host: Arc<dyn HostBridge>,
    defaults: BirthDefaults,
}

impl ChartOrchestrator {
    pub fn new(service: Arc<dyn ChartService>, cache: ChartCache) -> Self {
        Self {
            service,
            cache,
            host: Arc::new(NoopHost),
            defaults: BirthDefaults::default(),
        }
    }

    pub fn with_host(mut self, host: Arc<dyn HostBridge>) -> Self {
        self.host = host;
        self
    }

    pub fn with_defaults(mut self, defaults: BirthDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    /// Normalizes `raw`, calls the service, and either caches the chart and
    /// navigates to results, or shows the generic error notice.
    ///
    /// The busy indicator is hidden exactly once on every path, including when
    /// the returned future is dropped mid-request. The error is returned for
    /// the caller's bookkeeping only; it has already been surfaced to the host.
    pub async fn submit(&self, raw: &RawBirthFields) -> Result<Arc<ChartResult>, ChartError> {
        let input = normalize(raw, &self.defaults);
        tracing::info!(
            target: "jami::orchestrator",
            year = input.year,
            month = input.month,
            day = input.day,
            hour = input.hour,
            is_lunar = input.is_lunar,
            gender = input.gender.as_str(),
            "Chart request submitted"
        );

        let busy = BusyGuard::engage(self.host.as_ref());
        let outcome = self.service.analyze_birth(&input).await;
        busy.release();

        match outcome {
            Ok(chart) => {
                let chart = self.cache.set(chart);
                tracing::info!(
                    target: "jami::orchestrator",
                    palaces = chart.palace_layout.len(),
                    ming_gong = chart.ming_gong,
                    "Chart computed"
                );
                self.host.navigate_to_results();
                Ok(chart)
            }
            Err(e) => {
                tracing::warn!(target: "jami::orchestrator", error = %e, "Chart request failed");
                self.host.show_error(ERROR_TITLE, ERROR_MESSAGE);
                Err(e)
            }
        }
    }
}
