//! Analysis settings, loadable from a TOML file
//!
//! ```toml
//! [kasiski]
//! max_shift = 20
//!
//! [ic]
//! max_key_length = 10
//! prefer_shorter_within = 0.05
//!
//! [substitution]
//! case_policy = "sensitive"
//!
//! [vigenere]
//! key_length_strategy = "kasiski"
//! shift_method = "most_frequent"
//! ```
//!
//! Every section and field is optional; missing values keep their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CryptanalysisError, Result};
use crate::frequency::{CasePolicy, FrequencyAnalyzer};
use crate::key_length::{
    EnglishIcStrategy, IcStrategy, KasiskiStrategy, KeyLengthEstimator,
    DEFAULT_ENGLISH_MAX_KEY_LENGTH, DEFAULT_MAX_KEY_LENGTH, DEFAULT_MAX_SHIFT,
};
use crate::shift::{ChiSquaredSolver, MostFrequentSolver, ShiftSolver};
use crate::statistics::LetterStatistics;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLengthMethod {
    #[default]
    Ic,
    Kasiski,
    EnglishIc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMethod {
    #[default]
    ChiSquared,
    MostFrequent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KasiskiSettings {
    pub max_shift: usize,
}

impl Default for KasiskiSettings {
    fn default() -> Self {
        Self {
            max_shift: DEFAULT_MAX_SHIFT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IcSettings {
    pub max_key_length: usize,
    pub prefer_shorter_within: Option<f64>,
}

impl Default for IcSettings {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            prefer_shorter_within: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnglishIcSettings {
    pub max_key_length: usize,
    pub target: f64,
}

impl Default for EnglishIcSettings {
    fn default() -> Self {
        Self {
            max_key_length: DEFAULT_ENGLISH_MAX_KEY_LENGTH,
            target: LetterStatistics::english().coincidence(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstitutionSettings {
    pub case_policy: CasePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VigenereSettings {
    pub key_length_strategy: KeyLengthMethod,
    pub shift_method: ShiftMethod,
}

/// All tunable analysis settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub kasiski: KasiskiSettings,
    pub ic: IcSettings,
    pub english_ic: EnglishIcSettings,
    pub substitution: SubstitutionSettings,
    pub vigenere: VigenereSettings,
}

impl AnalysisConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| CryptanalysisError::InputUnavailable {
                source_name: path.display().to_string(),
                source,
            })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded analysis configuration");
        Ok(config)
    }

    /// Rejects settings no analyzer can work with.
    pub fn validate(&self) -> Result<()> {
        if self.kasiski.max_shift < 2 {
            return Err(CryptanalysisError::InvalidConfig(
                "kasiski.max_shift must be at least 2".to_string(),
            ));
        }
        if self.ic.max_key_length == 0 {
            return Err(CryptanalysisError::InvalidConfig(
                "ic.max_key_length must be at least 1".to_string(),
            ));
        }
        if self.english_ic.max_key_length == 0 {
            return Err(CryptanalysisError::InvalidConfig(
                "english_ic.max_key_length must be at least 1".to_string(),
            ));
        }
        if let Some(tolerance) = self.ic.prefer_shorter_within {
            if !(0.0..1.0).contains(&tolerance) {
                return Err(CryptanalysisError::InvalidConfig(format!(
                    "ic.prefer_shorter_within must lie in [0, 1), got {}",
                    tolerance
                )));
            }
        }
        if !(self.english_ic.target > 0.0 && self.english_ic.target <= 1.0) {
            return Err(CryptanalysisError::InvalidConfig(format!(
                "english_ic.target must lie in (0, 1], got {}",
                self.english_ic.target
            )));
        }
        Ok(())
    }

    /// The key length strategy selected by `vigenere.key_length_strategy`.
    pub fn key_length_estimator(&self) -> Box<dyn KeyLengthEstimator> {
        self.estimator_for(self.vigenere.key_length_strategy)
    }

    /// A key length strategy configured from the matching section.
    pub fn estimator_for(&self, method: KeyLengthMethod) -> Box<dyn KeyLengthEstimator> {
        match method {
            KeyLengthMethod::Kasiski => Box::new(KasiskiStrategy::new(self.kasiski.max_shift)),
            KeyLengthMethod::Ic => {
                let strategy = IcStrategy::new(self.ic.max_key_length);
                match self.ic.prefer_shorter_within {
                    Some(tolerance) => Box::new(strategy.with_tolerance(tolerance)),
                    None => Box::new(strategy),
                }
            }
            KeyLengthMethod::EnglishIc => Box::new(EnglishIcStrategy {
                max_key_length: self.english_ic.max_key_length,
                target: self.english_ic.target,
            }),
        }
    }

    /// The per-column solver selected by `vigenere.shift_method`.
    pub fn shift_solver(&self) -> Box<dyn ShiftSolver> {
        match self.vigenere.shift_method {
            ShiftMethod::ChiSquared => Box::new(ChiSquaredSolver::default()),
            ShiftMethod::MostFrequent => Box::new(MostFrequentSolver::default()),
        }
    }

    pub fn frequency_analyzer(&self) -> FrequencyAnalyzer {
        FrequencyAnalyzer::new(self.substitution.case_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.kasiski.max_shift, 20);
        assert_eq!(config.ic.max_key_length, 10);
        assert_eq!(config.english_ic.max_key_length, 20);
        assert_eq!(config.substitution.case_policy, CasePolicy::Normalized);
        assert_eq!(config.vigenere.key_length_strategy, KeyLengthMethod::Ic);
        assert_eq!(config.vigenere.shift_method, ShiftMethod::ChiSquared);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AnalysisConfig::from_toml_str("").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [ic]
            prefer_shorter_within = 0.05

            [substitution]
            case_policy = "sensitive"

            [vigenere]
            key_length_strategy = "english_ic"
            shift_method = "most_frequent"
            "#,
        )
        .unwrap();

        assert_eq!(config.ic.max_key_length, 10);
        assert_eq!(config.ic.prefer_shorter_within, Some(0.05));
        assert_eq!(config.substitution.case_policy, CasePolicy::Sensitive);
        assert_eq!(config.vigenere.key_length_strategy, KeyLengthMethod::EnglishIc);
        assert_eq!(config.key_length_estimator().name(), "closest-to-english-ic");
        assert_eq!(config.shift_solver().name(), "most-frequent");
        assert_eq!(config.frequency_analyzer().policy(), CasePolicy::Sensitive);
    }

    #[test]
    fn test_malformed_document() {
        let result = AnalysisConfig::from_toml_str("[kasiski\nmax_shift = ");
        assert!(matches!(result, Err(CryptanalysisError::ConfigParse(_))));

        let result = AnalysisConfig::from_toml_str("[kasiski]\nmax_shfit = 4");
        assert!(matches!(result, Err(CryptanalysisError::ConfigParse(_))));

        let result = AnalysisConfig::from_toml_str("[vigenere]\nshift_method = \"guess\"");
        assert!(matches!(result, Err(CryptanalysisError::ConfigParse(_))));
    }

    #[test]
    fn test_invalid_bounds() {
        let result = AnalysisConfig::from_toml_str("[ic]\nmax_key_length = 0");
        assert!(matches!(result, Err(CryptanalysisError::InvalidConfig(_))));

        let result = AnalysisConfig::from_toml_str("[kasiski]\nmax_shift = 1");
        assert!(matches!(result, Err(CryptanalysisError::InvalidConfig(_))));

        let result = AnalysisConfig::from_toml_str("[ic]\nprefer_shorter_within = 1.5");
        assert!(matches!(result, Err(CryptanalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_estimator_for_each_method() {
        let config = AnalysisConfig::default();
        assert_eq!(config.estimator_for(KeyLengthMethod::Kasiski).name(), "kasiski");
        assert_eq!(config.estimator_for(KeyLengthMethod::Ic).name(), "index-of-coincidence");
        assert_eq!(config.shift_solver().name(), "chi-squared");
    }

    #[test]
    fn test_missing_file() {
        let result = AnalysisConfig::load(Path::new("/nonexistent/analysis.toml"));
        assert!(matches!(result, Err(CryptanalysisError::InputUnavailable { .. })));
    }
}
