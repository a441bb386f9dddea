use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::{Coordinates, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
        }
    }
}

fn default_result_limit() -> usize { crate::core::DEFAULT_RESULT_LIMIT }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_availability_points")]
    pub availability: u32,
    #[serde(default = "default_service_points")]
    pub service: u32,
    #[serde(default = "default_special_needs_points")]
    pub special_needs: u32,
    /// Let the booking flag stand in for a missing services list
    #[serde(default = "default_true")]
    pub flag_implies_service: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            availability: default_availability_points(),
            service: default_service_points(),
            special_needs: default_special_needs_points(),
            flag_implies_service: default_true(),
        }
    }
}

impl ScoringSettings {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            availability: self.availability,
            service: self.service,
            special_needs: self.special_needs,
            flag_implies_service: self.flag_implies_service,
        }
    }
}

fn default_availability_points() -> u32 { 40 }
fn default_service_points() -> u32 { 20 }
fn default_special_needs_points() -> u32 { 20 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSettings {
    /// CSV roster; the built-in sample roster is used when unset
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    /// Remote postal-code lookup; static table only when unset
    pub endpoint: Option<String>,
    #[serde(default = "default_geocode_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_geocode_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
    /// Additional postal codes: `"60601" = [41.8858, -87.6181]`
    #[serde(default)]
    pub extra: HashMap<String, [f64; 2]>,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_geocode_timeout(),
            cache_size: default_geocode_cache_size(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            extra: HashMap::new(),
        }
    }
}

impl GeocodingSettings {
    pub fn fallback(&self) -> Coordinates {
        Coordinates::new(self.fallback_latitude, self.fallback_longitude)
    }

    pub fn extra_coordinates(&self) -> HashMap<String, Coordinates> {
        self.extra
            .iter()
            .map(|(zip, [lat, lon])| (zip.clone(), Coordinates::new(*lat, *lon)))
            .collect()
    }
}

fn default_geocode_timeout() -> u64 { 5 }
fn default_geocode_cache_size() -> u64 { 1000 }
fn default_fallback_latitude() -> f64 { crate::services::DEFAULT_FALLBACK.latitude }
fn default_fallback_longitude() -> f64 { crate::services::DEFAULT_FALLBACK.longitude }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SITTER__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SITTER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SITTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_platform_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SITTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honor the unprefixed variables hosting platforms set
/// (`PORT`, `ROSTER_CSV`)
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()) {
        builder = builder.set_override("server.port", port)?;
    }
    if let Ok(path) = env::var("ROSTER_CSV") {
        builder = builder.set_override("roster.csv_path", path)?;
    }

    builder.build()
}
