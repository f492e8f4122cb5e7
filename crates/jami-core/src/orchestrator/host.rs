//! Presentation capabilities supplied by the host environment.

/// Fire-and-forget capabilities of the host UI.
///
/// Every method defaults to a no-op so hosts implement only what they have.
/// Implementations must not fail or block.
pub trait HostBridge: Send + Sync {
    fn show_busy(&self) {}

    fn hide_busy(&self) {}

    /// Switch to the results view; it reads the chart from the cache.
    fn navigate_to_results(&self) {}

    /// Show a user-facing notice.
    fn show_error(&self, _title: &str, _message: &str) {}
}

/// Host with no capabilities at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl HostBridge for NoopHost {}

/// Keeps the busy indicator up until released or dropped. Hides it exactly once.
pub(crate) struct BusyGuard<'a> {
    host: Option<&'a dyn HostBridge>,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn engage(host: &'a dyn HostBridge) -> Self {
        host.show_busy();
        Self { host: Some(host) }
    }

    pub(crate) fn release(mut self) {
        self.hide();
    }

    fn hide(&mut self) {
        if let Some(host) = self.host.take() {
            host.hide_busy();
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.hide();
    }
}
