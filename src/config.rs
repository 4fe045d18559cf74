use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use crate::models::{LegacyWeights, ScoringStrategy, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: UpstreamSettings,
    pub profiles: UpstreamSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Location of a sibling service
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(10))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub max_entries: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub strategy: ScoringStrategy,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub legacy_weights: LegacyWeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_gpa_weight")]
    pub gpa: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_goals_weight")]
    pub goals: f64,
    #[serde(default = "default_strengths_weight")]
    pub strengths: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            gpa: default_gpa_weight(),
            interests: default_interests_weight(),
            goals: default_goals_weight(),
            strengths: default_strengths_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            skills: config.skills,
            gpa: config.gpa,
            interests: config.interests,
            goals: config.goals,
            strengths: config.strengths,
        }
    }
}

fn default_skills_weight() -> f64 { 0.30 }
fn default_gpa_weight() -> f64 { 0.20 }
fn default_interests_weight() -> f64 { 0.20 }
fn default_goals_weight() -> f64 { 0.15 }
fn default_strengths_weight() -> f64 { 0.15 }

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyWeightsConfig {
    #[serde(default = "default_legacy_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_legacy_gpa_weight")]
    pub gpa: f64,
    #[serde(default = "default_legacy_location_weight")]
    pub location: f64,
    #[serde(default = "default_legacy_research_weight")]
    pub research: f64,
}

impl Default for LegacyWeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_legacy_skills_weight(),
            gpa: default_legacy_gpa_weight(),
            location: default_legacy_location_weight(),
            research: default_legacy_research_weight(),
        }
    }
}

impl From<&LegacyWeightsConfig> for LegacyWeights {
    fn from(config: &LegacyWeightsConfig) -> Self {
        Self {
            skills: config.skills,
            gpa: config.gpa,
            location: config.location,
            research: config.research,
        }
    }
}

fn default_legacy_skills_weight() -> f64 { 0.5 }
fn default_legacy_gpa_weight() -> f64 { 0.2 }
fn default_legacy_location_weight() -> f64 { 0.1 }
fn default_legacy_research_weight() -> f64 { 0.2 }

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
    /// Load configuration from defaults, files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SCHOLAR__)
    /// 5. PROVIDER_SERVICE_URL / USER_SERVICE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SCHOLAR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        substitute_service_urls(settings)?.try_deserialize()
    }

    /// Configured weight sets, validated when the matcher is built
    pub fn weights(&self) -> (ScoringWeights, LegacyWeights) {
        (
            ScoringWeights::from(&self.scoring.weights),
            LegacyWeights::from(&self.scoring.legacy_weights),
        )
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("SCHOLAR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8007)?
        .set_default("provider.base_url", "http://provider-service:8006")?
        .set_default("profiles.base_url", "http://user-service:8002")?
        .set_default("cache.ttl_secs", 30)?
        .set_default("cache.max_entries", 16)
}

/// Apply the plain service URL variables shared with the other services
fn substitute_service_urls(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("PROVIDER_SERVICE_URL") {
        builder = builder.set_override("provider.base_url", url)?;
    }
    if let Ok(url) = env::var("USER_SERVICE_URL") {
        builder = builder.set_override("profiles.base_url", url)?;
    }

    builder.build()
}
