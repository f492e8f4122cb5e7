//! Shared types used across the Jami crates: the wire request, the chart aggregate, and client configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Fixed endpoint path of the chart computation call.
pub const ANALYZE_PATH: &str = "/api/v1/birth/analyze";
/// Health endpoint of the computation service.
pub const HEALTH_PATH: &str = "/health";
/// Used when neither an explicit override nor `API_URL` is set.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Environment-style default for the service base address.
pub const ENV_API_URL: &str = "API_URL";

const ENV_CONFIG_PATH: &str = "JAMI_CONFIG";

/// Gender selection sent to the service as `"M"` / `"F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    M,
    F,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::M),
            "F" | "f" => Ok(Gender::F),
            other => Err(format!("gender must be M or F, got {:?}", other)),
        }
    }
}

/// Normalized birth data, serialized verbatim as the analyze request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub is_lunar: bool,
    /// Leap-month flag; only present for lunar input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_intercalation: Option<bool>,
    pub gender: Gender,
}

/// One of the 12 palaces, in the order the service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palace {
    pub index: u8,
    pub name: String,
    pub stars: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarPlacement {
    pub star: String,
    pub palace_index: u8,
}

/// Descriptive metadata for a star. Fields the client does not know are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarMeta {
    pub star: String,
    #[serde(default)]
    pub offset: Option<i32>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Descriptive metadata for a palace, keyed by palace index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalaceMeta {
    pub index: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Birth date as converted to the lunar calendar by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    #[serde(default)]
    pub is_intercalation: bool,
}

/// Computed natal chart returned by the analyze endpoint.
///
/// Immutable once decoded: the cache replaces it wholesale, never edits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub ming_gong: u8,
    pub guo_shu: i32,
    pub jami_position: i32,
    #[serde(default)]
    pub jami_direction: String,
    #[serde(default)]
    pub hour_branch: i32,
    #[serde(default)]
    pub hour_branch_name: String,
    pub palace_layout: Vec<Palace>,
    pub stars_data: Vec<StarPlacement>,
    #[serde(default)]
    pub stars_meta: Vec<StarMeta>,
    #[serde(default)]
    pub palace_meta: Vec<PalaceMeta>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub lunar_date: Option<LunarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<i64>,
}

impl ChartResult {
    pub fn palace(&self, index: u8) -> Option<&Palace> {
        self.palace_layout.iter().find(|p| p.index == index)
    }

    /// The Life Palace (`ming_gong`), if the layout contains it.
    pub fn ming_palace(&self) -> Option<&Palace> {
        self.palace(self.ming_gong)
    }

    pub fn star_meta(&self, star: &str) -> Option<&StarMeta> {
        self.stars_meta.iter().find(|m| m.star == star)
    }

    pub fn palace_meta(&self, index: u8) -> Option<&PalaceMeta> {
        self.palace_meta.iter().find(|m| m.index == index)
    }

    /// Palace hosting `star`, resolved through `stars_data`.
    pub fn palace_of_star(&self, star: &str) -> Option<&Palace> {
        self.stars_data
            .iter()
            .find(|p| p.star == star)
            .and_then(|p| self.palace(p.palace_index))
    }
}

/// Client configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Explicit base address override. Takes precedence over `API_URL`.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Sent as `X-API-Key` when the service is configured to require one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load config from file and environment. Precedence: `JAMI_*` env > `JAMI_CONFIG` path (or `config/jami.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| "config/jami.toml".to_string());
        let builder = config::Config::builder().set_default("timeout_secs", 30_i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("JAMI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        built.try_deserialize()
    }

    /// Process-wide configuration, loaded on first use and stable afterwards.
    pub fn global() -> &'static ClientConfig {
        static GLOBAL: OnceLock<ClientConfig> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                tracing::warn!(target: "jami::config", error = %e, "Config load failed, using defaults");
                Self::default()
            })
        })
    }

    /// Service base address: `api_url` > `API_URL` env > [`DEFAULT_API_BASE`].
    pub fn api_base(&self) -> String {
        let env_value = std::env::var(ENV_API_URL).ok();
        resolve_api_base(self.api_url.as_deref(), env_value.as_deref())
    }
}

static API_BASE: OnceLock<String> = OnceLock::new();

/// Base address for this process, resolved from [`ClientConfig::global`] on first use.
pub fn api_base() -> &'static str {
    init_api_base(None)
}

/// Resolves the process base address once: `explicit` > config `api_url` > `API_URL` env > default.
///
/// Only the first call decides; later overrides are ignored and the stored value is returned.
pub fn init_api_base(explicit: Option<&str>) -> &'static str {
    API_BASE.get_or_init(|| {
        let config = ClientConfig::global();
        let explicit = explicit
            .into_iter()
            .chain(config.api_url.as_deref())
            .find(|s| !s.trim().is_empty());
        let env_value = std::env::var(ENV_API_URL).ok();
        resolve_api_base(explicit, env_value.as_deref())
    })
}

/// Picks the first non-blank candidate and trims trailing slashes.
pub fn resolve_api_base(explicit: Option<&str>, env_value: Option<&str>) -> String {
    let chosen = [explicit, env_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE);
    chosen.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chart_json() -> serde_json::Value {
        serde_json::json!({
            "ming_gong": 2,
            "guo_shu": 3,
            "jami_position": 5,
            "jami_direction": "순행",
            "hour_branch": 7,
            "hour_branch_name": "오",
            "palace_layout": [
                { "index": 1, "name": "명궁", "stars": [] },
                { "index": 2, "name": "형제궁", "stars": ["자미", "천기"] }
            ],
            "stars_data": [
                { "star": "자미", "palace_index": 2 },
                { "star": "천기", "palace_index": 2 }
            ],
            "stars_meta": [
                { "star": "자미", "offset": 0, "keywords": ["리더십"], "meaning": "제왕성", "element": "토" }
            ],
            "palace_meta": [
                { "index": 2, "name": "형제궁", "theme": "형제와 동료" }
            ],
            "summary": "요약",
            "lunar_date": { "year": 1990, "month": 5, "day": 2, "is_intercalation": false }
        })
    }

    #[test]
    fn solar_input_omits_intercalation() {
        let input = BirthInput {
            year: 1990,
            month: 6,
            day: 24,
            hour: 12,
            is_lunar: false,
            is_intercalation: None,
            gender: Gender::M,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "year": 1990, "month": 6, "day": 24, "hour": 12,
                "is_lunar": false, "gender": "M"
            })
        );
    }

    #[test]
    fn lunar_input_carries_intercalation() {
        let input = BirthInput {
            year: 1984,
            month: 4,
            day: 1,
            hour: 0,
            is_lunar: true,
            is_intercalation: Some(true),
            gender: Gender::F,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["is_intercalation"], true);
        assert_eq!(json["gender"], "F");
    }

    #[test]
    fn chart_decodes_full_shape_and_lookups_work() {
        let chart: ChartResult = serde_json::from_value(sample_chart_json()).unwrap();
        assert_eq!(chart.ming_palace().map(|p| p.name.as_str()), Some("형제궁"));
        assert_eq!(chart.palace_of_star("천기").map(|p| p.index), Some(2));
        assert!(chart.palace_of_star("파군").is_none());
        let meta = chart.star_meta("자미").unwrap();
        assert_eq!(meta.keywords, vec!["리더십".to_string()]);
        assert_eq!(meta.extra.get("element"), Some(&serde_json::json!("토")));
        assert_eq!(chart.palace_meta(2).and_then(|m| m.theme.as_deref()), Some("형제와 동료"));
        assert_eq!(chart.lunar_date.map(|d| d.month), Some(5));
        assert_eq!(chart.chart_id, None);
    }

    #[test]
    fn chart_decodes_minimal_shape() {
        let chart: ChartResult = serde_json::from_value(serde_json::json!({
            "ming_gong": 1,
            "guo_shu": 5,
            "jami_position": 3,
            "palace_layout": [],
            "stars_data": []
        }))
        .unwrap();
        assert!(chart.summary.is_empty());
        assert!(chart.lunar_date.is_none());
        assert!(chart.stars_meta.is_empty());
    }

    #[test]
    fn chart_missing_layout_is_rejected() {
        let result: Result<ChartResult, _> = serde_json::from_value(serde_json::json!({
            "ming_gong": 1,
            "guo_shu": 5,
            "jami_position": 3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn api_base_precedence() {
        assert_eq!(resolve_api_base(Some("http://a:1"), Some("http://b:2")), "http://a:1");
        assert_eq!(resolve_api_base(None, Some("http://b:2/")), "http://b:2");
        assert_eq!(resolve_api_base(Some("  "), None), DEFAULT_API_BASE);
        assert_eq!(resolve_api_base(None, None), "http://localhost:8000");
    }

    #[test]
    fn process_base_address_is_resolved_once() {
        let first = init_api_base(Some("http://first:1/"));
        let second = init_api_base(Some("http://second:2"));
        assert_eq!(first, "http://first:1");
        assert_eq!(second, first);
        assert_eq!(api_base(), first);
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::F);
        assert_eq!(" M ".parse::<Gender>().unwrap(), Gender::M);
        assert!("X".parse::<Gender>().is_err());
    }
}
