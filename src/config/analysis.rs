//! Response analysis and questionnaire tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::AuthenticityFormula;
use crate::domain::session::DEFAULT_COMPLETION_THRESHOLD;

/// Analysis and questionnaire configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Answers required before a session can complete
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: usize,

    /// Which authenticity formula the analyzer uses
    #[serde(default)]
    pub authenticity_formula: AuthenticityFormula,

    /// Directory for the degraded-mode answer cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.completion_threshold == 0 {
            return Err(ValidationError::InvalidCompletionThreshold);
        }
        if self.cache_dir.trim().is_empty() {
            return Err(ValidationError::InvalidCacheDir);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            completion_threshold: default_completion_threshold(),
            authenticity_formula: AuthenticityFormula::default(),
            cache_dir: default_cache_dir(),
        }
    }
}

fn default_completion_threshold() -> usize {
    DEFAULT_COMPLETION_THRESHOLD
}

fn default_cache_dir() -> String {
    "./data/cache".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.completion_threshold, DEFAULT_COMPLETION_THRESHOLD);
        assert_eq!(
            config.authenticity_formula,
            AuthenticityFormula::Composite
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_threshold_fails_validation() {
        let config = AnalysisConfig {
            completion_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
