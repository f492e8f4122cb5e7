//! jami-core: Jami Dusu chart client core (data model, input normalization, chart cache,
//! request orchestration, chart projection).
//!
//! The chart itself is computed by a remote service; the HTTP implementation of
//! [`ChartService`] lives in `jami-client`.

mod cache;
mod error;
mod normalize;
mod orchestrator;
mod render;
mod shared;

pub use shared::{
    api_base, init_api_base, resolve_api_base, BirthInput, ChartResult, ClientConfig, Gender, LunarDate, Palace,
    PalaceMeta, StarMeta, StarPlacement, ANALYZE_PATH, DEFAULT_API_BASE, ENV_API_URL, HEALTH_PATH,
};

pub use cache::ChartCache;
pub use error::ChartError;
pub use normalize::{normalize, parse_number, BirthDefaults, RawBirthFields};

pub use orchestrator::{ChartOrchestrator, ChartService, HostBridge, NoopHost, ERROR_MESSAGE, ERROR_TITLE};

pub use render::{project, ChartView, PalaceView, SummaryRow, NO_CHART, NO_STARS};
