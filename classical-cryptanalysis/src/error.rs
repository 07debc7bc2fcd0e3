//! Error types for cryptanalysis operations

use thiserror::Error;

/// Failures surfaced to callers.
///
/// Analysis itself never fails: empty or letter-free ciphertext yields an
/// empty mapping or a key length of zero, and weak statistics only lower
/// the quality of the guess. Only reading input and configuration, and
/// writing results, can go wrong.
#[derive(Error, Debug)]
pub enum CryptanalysisError {
    #[error("Input unavailable: could not read {source_name}")]
    InputUnavailable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output unavailable: could not write {target}")]
    OutputUnavailable {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed configuration file")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
}

pub type Result<T> = std::result::Result<T, CryptanalysisError>;
