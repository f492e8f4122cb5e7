//! Single-slot chart store shared by the orchestrator and the renderer.
//!
//! The slot holds a complete chart or nothing. `set` replaces wholesale
//! (last writer wins), `clear` empties it. Nothing is persisted.

use crate::shared::ChartResult;
use std::sync::{Arc, RwLock};

/// Cloneable handle to one chart slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct ChartCache {
    slot: Arc<RwLock<Option<Arc<ChartResult>>>>,
}

impl ChartCache {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current chart and returns the stored snapshot.
    pub fn set(&self, chart: ChartResult) -> Arc<ChartResult> {
        let chart = Arc::new(chart);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        let replaced = slot.replace(Arc::clone(&chart)).is_some();
        tracing::debug!(
            target: "jami::cache",
            palaces = chart.palace_layout.len(),
            replaced,
            "Chart cached"
        );
        chart
    }

    /// Current chart, if any. Cheap: the snapshot is shared, not copied.
    pub fn get(&self) -> Option<Arc<ChartResult>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            tracing::debug!(target: "jami::cache", "Chart cache cleared");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).is_none()
    }
}
