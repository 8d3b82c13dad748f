use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{CandidateMatchWeights, JobMatchWeights, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
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

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

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

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub jobs: JobWeightsConfig,
    #[serde(default)]
    pub candidates: CandidateWeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobWeightsConfig {
    #[serde(default = "default_job_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_job_experience_weight")]
    pub experience: f64,
    #[serde(default = "default_job_recency_weight")]
    pub recency: f64,
}

impl Default for JobWeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_job_skills_weight(),
            experience: default_job_experience_weight(),
            recency: default_job_recency_weight(),
        }
    }
}

fn default_job_skills_weight() -> f64 { 0.5 }
fn default_job_experience_weight() -> f64 { 0.3 }
fn default_job_recency_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateWeightsConfig {
    #[serde(default = "default_candidate_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_candidate_experience_weight")]
    pub experience: f64,
}

impl Default for CandidateWeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_candidate_skills_weight(),
            experience: default_candidate_experience_weight(),
        }
    }
}

fn default_candidate_skills_weight() -> f64 { 0.7 }
fn default_candidate_experience_weight() -> f64 { 0.3 }

impl ScoringSettings {
    /// Convert to engine weights, rejecting sets that could leave 0-100
    pub fn weights(&self) -> Result<ScoringWeights, ConfigError> {
        check_weights("scoring.jobs", &[self.jobs.skills, self.jobs.experience, self.jobs.recency])?;
        check_weights(
            "scoring.candidates",
            &[self.candidates.skills, self.candidates.experience],
        )?;

        Ok(ScoringWeights {
            jobs: JobMatchWeights {
                skills: self.jobs.skills,
                experience: self.jobs.experience,
                recency: self.jobs.recency,
            },
            candidates: CandidateMatchWeights {
                skills: self.candidates.skills,
                experience: self.candidates.experience,
            },
        })
    }
}

fn check_weights(section: &str, weights: &[f64]) -> Result<(), ConfigError> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ConfigError::Message(format!(
            "{} weights must be non-negative",
            section
        )));
    }

    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-6 {
        return Err(ConfigError::Message(format!(
            "{} weights must sum to 1.0, got {}",
            section, sum
        )));
    }

    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Pretty,
    Compact,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBMATCH__)
    /// 5. DATABASE_URL, JWT_SECRET, LOG_LEVEL and LOG_FORMAT
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JOBMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("JOBMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: Settings = apply_env_overrides(builder)?.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("JOBMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.result_limit == 0 {
            return Err(ConfigError::Message(
                "matching.result_limit must be at least 1".to_string(),
            ));
        }
        self.scoring.weights().map(|_| ())
    }
}

/// Well-known environment variables that take precedence over everything else
fn apply_env_overrides(
    mut builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    use std::env;

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format.to_lowercase())?;
    }

    Ok(builder)
}
