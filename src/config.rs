use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{MatchScorer, Matcher, MatcherOptions, BATCH_THRESHOLD, EMPLOYER_THRESHOLD};
use crate::models::FactorWeights;

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
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_batch_threshold")]
    pub batch_threshold: u8,
    #[serde(default = "default_employer_threshold")]
    pub employer_threshold: u8,
    /// City names counted as shared location evidence
    #[serde(default)]
    pub home_city_anchors: Vec<String>,
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
    #[serde(default)]
    pub require_catchment: bool,
    #[serde(default)]
    pub drop_absent_factors: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            batch_threshold: default_batch_threshold(),
            employer_threshold: default_employer_threshold(),
            home_city_anchors: Vec::new(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
            require_catchment: false,
            drop_absent_factors: false,
        }
    }
}

fn default_batch_threshold() -> u8 { BATCH_THRESHOLD }
fn default_employer_threshold() -> u8 { EMPLOYER_THRESHOLD }
fn default_top_n() -> usize { 10 }
fn default_max_top_n() -> usize { 100 }

impl From<&MatchingSettings> for MatcherOptions {
    fn from(settings: &MatchingSettings) -> Self {
        MatcherOptions {
            employer_threshold: settings.employer_threshold.min(100),
            batch_threshold: settings.batch_threshold.min(100),
            default_top_n: settings.default_top_n.max(1),
            max_top_n: settings.max_top_n.max(1),
            require_catchment: settings.require_catchment,
            drop_absent_factors: settings.drop_absent_factors,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Maximum points per factor; 0 disables a factor
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_title_weight")]
    pub title: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
    #[serde(default = "default_salary_weight")]
    pub salary: u32,
    #[serde(default = "default_skills_weight")]
    pub skills: u32,
    #[serde(default = "default_experience_weight")]
    pub experience: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            location: default_location_weight(),
            salary: default_salary_weight(),
            skills: default_skills_weight(),
            experience: default_experience_weight(),
        }
    }
}

fn default_title_weight() -> u32 { 30 }
fn default_location_weight() -> u32 { 20 }
fn default_salary_weight() -> u32 { 20 }
fn default_skills_weight() -> u32 { 20 }
fn default_experience_weight() -> u32 { 10 }

impl From<&WeightsConfig> for FactorWeights {
    fn from(config: &WeightsConfig) -> Self {
        FactorWeights {
            title: config.title,
            location: config.location,
            salary: config.salary,
            skills: config.skills,
            experience: config.experience,
        }
        .capped()
    }
}

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

fn environment() -> Environment {
    // e.g., JOBZ__MATCHING__BATCH_THRESHOLD -> matching.batch_threshold
    Environment::with_prefix("JOBZ")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("matching.home_city_anchors")
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBZ__)
    /// 5. A bare `PORT` variable, as set by most hosting platforms
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        apply_platform_port(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Build the matcher these settings describe
    pub fn matcher(&self) -> Matcher {
        let scorer = MatchScorer::new(self.matching.batch_threshold)
            .with_weights(FactorWeights::from(&self.scoring.weights))
            .with_anchors(&self.matching.home_city_anchors);

        Matcher::new(scorer, MatcherOptions::from(&self.matching))
    }
}

fn apply_platform_port(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("PORT").ok().and_then(|port| port.parse::<u16>().ok()) {
        Some(port) => Config::builder()
            .add_source(settings)
            .set_override("server.port", i64::from(port))?
            .build(),
        None => Ok(settings),
    }
}
