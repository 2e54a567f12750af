//! Client settings, read from the JSON document bundled with the page.
//!
//! Every field has a default, so a partial or missing document still yields
//! a usable configuration.

use serde::Deserialize;

use crate::components::point_form::{DEFAULT_ICON_DIR, DEFAULT_POINT_TYPE};

pub const BUNDLED_CONFIG: &str = include_str!("../static/config.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Container the trip summary is rendered into.
    pub trip_main_selector: String,
    /// Container the point form is rendered into.
    pub events_selector: String,
    pub icon_dir: String,
    pub default_point_type: String,
    /// Maximum log level, as accepted by `log::LevelFilter`'s `FromStr`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trip_main_selector: ".trip-main".to_string(),
            events_selector: ".trip-events__list".to_string(),
            icon_dir: DEFAULT_ICON_DIR.to_string(),
            default_point_type: DEFAULT_POINT_TYPE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The bundled configuration, or the defaults if it does not parse.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CONFIG).unwrap_or_else(|err| {
            log::warn!("bundled config is invalid, using defaults: {err}");
            Self::default()
        })
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
