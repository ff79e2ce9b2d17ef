//! Optional TOML settings file and environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lane_model::{
    ClassifierOptions, DEFAULT_COUNTRY_COLUMN_THRESHOLD, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_LANE_ID_THRESHOLD, DEFAULT_ORACLE_PACING_MS, ResolutionOptions,
};

use crate::error::{Result, StandardsError};

/// Settings file looked up in the working directory when none is given.
pub const SETTINGS_FILE: &str = "lane.toml";
pub const MODEL_ENV_VAR: &str = "MISTRAL_MODEL";

pub const DEFAULT_ORACLE_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_ORACLE_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub resolution: ResolutionSettings,
    pub classifier: ClassifierSettings,
    pub oracle: OracleSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionSettings {
    pub fuzzy_threshold: f64,
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierSettings {
    pub country_threshold: f64,
    pub lane_id_threshold: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            country_threshold: DEFAULT_COUNTRY_COLUMN_THRESHOLD,
            lane_id_threshold: DEFAULT_LANE_ID_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleSettings {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub pacing_ms: u64,
    /// Prompt template override; the reference directory's copy otherwise.
    pub prompt_path: Option<PathBuf>,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ORACLE_ENDPOINT.to_string(),
            model: DEFAULT_ORACLE_MODEL.to_string(),
            timeout_secs: DEFAULT_ORACLE_TIMEOUT_SECS,
            pacing_ms: DEFAULT_ORACLE_PACING_MS,
            prompt_path: None,
        }
    }
}

impl OracleSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl Settings {
    /// Reads and validates a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Loads `explicit` when given, else `lane.toml` from the working
    /// directory when it exists, else the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(SETTINGS_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let settings: Settings = toml::from_str(text).map_err(|source| StandardsError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("resolution.fuzzy_threshold", self.resolution.fuzzy_threshold)?;
        check_unit("classifier.country_threshold", self.classifier.country_threshold)?;
        check_unit("classifier.lane_id_threshold", self.classifier.lane_id_threshold)?;
        if self.oracle.endpoint.trim().is_empty() {
            return Err(StandardsError::InvalidSetting {
                key: "oracle.endpoint",
                message: "must not be empty".to_string(),
            });
        }
        if self.oracle.timeout_secs == 0 {
            return Err(StandardsError::InvalidSetting {
                key: "oracle.timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Applies `MISTRAL_MODEL` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_model_override(std::env::var(MODEL_ENV_VAR).ok());
    }

    pub fn apply_model_override(&mut self, model: Option<String>) {
        if let Some(model) = model.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
            self.oracle.model = model;
        }
    }

    pub fn resolution_options(&self) -> ResolutionOptions {
        ResolutionOptions::new()
            .with_fuzzy_threshold(self.resolution.fuzzy_threshold)
            .with_oracle(self.oracle.enabled)
            .with_oracle_pacing(self.oracle.pacing())
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            country_threshold: self.classifier.country_threshold,
            lane_id_threshold: self.classifier.lane_id_threshold,
        }
    }
}

fn check_unit(key: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StandardsError::InvalidSetting {
            key,
            message: format!("{value} is outside [0, 1]"),
        })
    }
}
