//! HTTP client for the remote chart computation service.

pub use jami_core::{ChartError, ChartService};

mod chart_client;

pub use chart_client::{ChartClient, HealthStatus, API_KEY_HEADER};
