//! # Classical Cryptanalysis Library
//!
//! Recovers plaintext from classical ciphers without the key, using letter
//! frequency statistics.
//!
//! ## Supported Ciphers
//!
//! - **Monoalphabetic substitution** - frequency rank alignment against the
//!   English letter order, optionally refined with known plaintext
//! - **Vigenère** - key length estimation (autocorrelation, index of
//!   coincidence), per-column chi-squared shift recovery, decryption
//!
//! ## Usage
//!
//! ```rust
//! use classical_cryptanalysis::Cryptanalysis;
//!
//! let ciphertext = "RIJVS";
//! let key = "KEY";
//! assert_eq!(Cryptanalysis::decrypt_vigenere(ciphertext, key), "HELLO");
//!
//! let (mapping, plaintext) = Cryptanalysis::analyze_substitution("xxXX yyy zz w");
//! assert_eq!(mapping.get('X'), Some('E'));
//! assert_eq!(plaintext, "EEEE TTT AA O");
//! ```
//!
//! Everything here is a heuristic: short or unusual texts produce a wrong but
//! well-defined answer rather than an error.

// Public modules
pub mod coincidence;
pub mod config;
pub mod diff;
pub mod error;
pub mod frequency;
pub mod key_length;
pub mod shift;
pub mod source;
pub mod statistics;
pub mod substitution;
pub mod text;
pub mod vigenere;

// Re-exports for easy access
pub use coincidence::index_of_coincidence;
pub use config::{AnalysisConfig, KeyLengthMethod, ShiftMethod};
pub use diff::extract_inserted;
pub use error::{CryptanalysisError, Result};
pub use frequency::{CasePolicy, FrequencyAnalyzer, LetterFrequencyTable};
pub use key_length::{
    EnglishIcStrategy, IcStrategy, KasiskiStrategy, KeyLengthCandidate, KeyLengthEstimator,
};
pub use shift::{ChiSquaredSolver, MostFrequentSolver, ShiftSolver};
pub use source::TextSource;
pub use statistics::{LetterStatistics, ENGLISH};
pub use substitution::{refine_mapping, SubstitutionMapping};
pub use vigenere::VigenereKey;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry points with the default analyzer settings.
///
/// Each function is pure; build the analyzers directly (or through
/// [`AnalysisConfig`]) to change bounds, case policy or solver.
pub struct Cryptanalysis;

impl Cryptanalysis {
    /// Frequency analysis of a substitution ciphertext, case folded.
    /// Returns the derived mapping and the text it decrypts to.
    pub fn analyze_substitution(ciphertext: &str) -> (SubstitutionMapping, String) {
        let mapping = FrequencyAnalyzer::default().analyze(ciphertext);
        let plaintext = substitution::decrypt(ciphertext, &mapping);
        (mapping, plaintext)
    }

    pub fn decrypt_substitution(ciphertext: &str, mapping: &SubstitutionMapping) -> String {
        substitution::decrypt(ciphertext, mapping)
    }

    /// Autocorrelation estimate over shifts below 20.
    pub fn estimate_key_length_kasiski(ciphertext: &str) -> usize {
        KasiskiStrategy::default().estimate(ciphertext)
    }

    /// Average-IC estimate over lengths up to 10.
    pub fn estimate_key_length_by_ic(ciphertext: &str) -> usize {
        IcStrategy::default().estimate(ciphertext)
    }

    /// Chi-squared recovery of each key letter.
    pub fn recover_vigenere_key(ciphertext: &str, key_length: usize) -> VigenereKey {
        vigenere::recover_key(ciphertext, key_length, &ChiSquaredSolver::default())
    }

    /// Decrypts with the letters of `key`; a key without letters leaves the
    /// text unchanged.
    pub fn decrypt_vigenere(ciphertext: &str, key: &str) -> String {
        vigenere::decrypt(ciphertext, &VigenereKey::from_letters(key))
    }

    pub fn extract_inserted(decrypted: &str, reference: &str) -> String {
        diff::extract_inserted(decrypted, reference)
    }

    /// Get version information
    pub fn version() -> &'static str {
        VERSION
    }

    /// List all key length strategies
    pub fn supported_strategies() -> Vec<&'static str> {
        vec!["kasiski", "index-of-coincidence", "closest-to-english-ic"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_vigenere() {
        let ciphertext = "WMCEEIKLGRPIFVMEUGXQPWQVIOIAVEYXUEKFKBTALVXTGAFXYEVKPAGY";
        let key_length = Cryptanalysis::estimate_key_length_by_ic(ciphertext);
        assert!((1..=10).contains(&key_length));

        let key = Cryptanalysis::recover_vigenere_key(ciphertext, key_length);
        assert_eq!(key.len(), key_length);

        let plaintext = Cryptanalysis::decrypt_vigenere(ciphertext, key.as_str());
        assert_eq!(plaintext.len(), ciphertext.len());
        assert!(plaintext.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_facade_degenerate_inputs() {
        assert_eq!(Cryptanalysis::estimate_key_length_by_ic(""), 0);
        assert_eq!(Cryptanalysis::estimate_key_length_kasiski(""), 0);
        assert!(Cryptanalysis::recover_vigenere_key("", 0).is_empty());
        let (mapping, plaintext) = Cryptanalysis::analyze_substitution("... !!!");
        assert!(mapping.is_empty());
        assert_eq!(plaintext, "... !!!");
    }

    #[test]
    fn test_strategy_names_match_estimators() {
        let names = Cryptanalysis::supported_strategies();
        assert!(names.contains(&KasiskiStrategy::default().name()));
        assert!(names.contains(&IcStrategy::default().name()));
        assert!(names.contains(&EnglishIcStrategy::default().name()));
        assert!(!Cryptanalysis::version().is_empty());
    }

    #[test]
    fn test_facade_substitution_round_trip() {
        let (mapping, plaintext) = Cryptanalysis::analyze_substitution("UIF RVJDL CSPXO GPy OFX BOTX");
        let inverse = mapping.inverse().unwrap();
        assert_eq!(
            Cryptanalysis::decrypt_substitution(&plaintext, &inverse),
            "UIF RVJDL CSPXO GPY OFX BOTX"
        );
    }
}
