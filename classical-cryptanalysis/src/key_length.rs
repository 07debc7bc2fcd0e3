//! Vigenère key length estimation
//!
//! Three independent heuristics, each scoring a bounded range of candidate
//! lengths:
//!
//! - [`KasiskiStrategy`] counts raw character coincidences between the
//!   ciphertext and itself shifted by each candidate length.
//! - [`IcStrategy`] splits the letters into columns and keeps the length with
//!   the highest mean index of coincidence.
//! - [`EnglishIcStrategy`] keeps the length whose mean column IC lands closest
//!   to that of plain English.
//!
//! The strategies use different probe bounds (20 for Kasiski, 10 for IC) and
//! look at different views of the text; they are deliberately kept apart.

use crate::coincidence::average_column_ic;
use crate::statistics::LetterStatistics;
use crate::text::clean_text;

/// Default shift bound of the autocorrelation strategy.
pub const DEFAULT_MAX_SHIFT: usize = 20;

/// Default probe bound of the average-IC strategy.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 10;

/// Default probe bound of the closest-to-English strategy.
pub const DEFAULT_ENGLISH_MAX_KEY_LENGTH: usize = 20;

/// A candidate key length together with the score its strategy assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLengthCandidate {
    pub length: usize,
    pub score: f64,
}

/// Trait for a key length heuristic.
pub trait KeyLengthEstimator {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Every probed length with its score, in increasing length order.
    fn candidates(&self, ciphertext: &str) -> Vec<KeyLengthCandidate>;

    /// Best-guess key length, or 0 when the ciphertext carries no signal
    /// at all.
    fn estimate(&self, ciphertext: &str) -> usize;

    /// Candidates sorted from most to least likely.
    fn ranked(&self, ciphertext: &str) -> Vec<KeyLengthCandidate> {
        let mut candidates = self.candidates(ciphertext);
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.length.cmp(&b.length)));
        candidates
    }
}

/// Autocorrelation by shift.
///
/// For each shift `s` in `1..min(len, max_shift)` counts the positions where
/// `ciphertext[i] == ciphertext[i + s]`, comparing raw bytes (case and
/// non-letters included). The shift with the largest count wins, the
/// smallest shift on ties. If no shift produces a single coincidence the
/// estimate is 0.
#[derive(Debug, Clone, Copy)]
pub struct KasiskiStrategy {
    pub max_shift: usize,
}

impl KasiskiStrategy {
    pub fn new(max_shift: usize) -> Self {
        Self { max_shift }
    }
}

impl Default for KasiskiStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SHIFT)
    }
}

impl KeyLengthEstimator for KasiskiStrategy {
    fn name(&self) -> &'static str {
        "kasiski"
    }

    fn candidates(&self, ciphertext: &str) -> Vec<KeyLengthCandidate> {
        let bytes = ciphertext.as_bytes();
        let limit = bytes.len().min(self.max_shift);

        (1..limit)
            .map(|shift| {
                let coincidences = bytes
                    .iter()
                    .zip(&bytes[shift..])
                    .filter(|(a, b)| a == b)
                    .count();
                KeyLengthCandidate {
                    length: shift,
                    score: coincidences as f64,
                }
            })
            .collect()
    }

    fn estimate(&self, ciphertext: &str) -> usize {
        let mut best = KeyLengthCandidate {
            length: 0,
            score: 0.0,
        };

        for candidate in self.candidates(ciphertext) {
            tracing::trace!(shift = candidate.length, coincidences = candidate.score);
            if candidate.score > best.score {
                best = candidate;
            }
        }

        tracing::debug!(key_length = best.length, coincidences = best.score, "kasiski estimate");
        best.length
    }
}

/// Highest average index of coincidence over the columns.
///
/// Probes lengths `1..=min(max_key_length, letters)`. With the correct
/// length every column is a plain Caesar shift of English and its IC rises
/// to about 0.066; wrong lengths mix alphabets and sit near 0.04.
#[derive(Debug, Clone, Copy)]
pub struct IcStrategy {
    pub max_key_length: usize,
    /// When set, the shortest length scoring within this relative distance
    /// of the best is preferred over the best itself. Multiples of the true
    /// length score just as well, so this guards against picking them.
    pub prefer_shorter_within: Option<f64>,
}

impl IcStrategy {
    pub fn new(max_key_length: usize) -> Self {
        Self {
            max_key_length,
            prefer_shorter_within: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.prefer_shorter_within = Some(tolerance);
        self
    }
}

impl Default for IcStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEY_LENGTH)
    }
}

fn column_ic_candidates(ciphertext: &str, max_key_length: usize) -> Vec<KeyLengthCandidate> {
    let filtered = clean_text(ciphertext);
    let limit = filtered.len().min(max_key_length);

    (1..=limit)
        .map(|length| KeyLengthCandidate {
            length,
            score: average_column_ic(&filtered, length),
        })
        .collect()
}

impl KeyLengthEstimator for IcStrategy {
    fn name(&self) -> &'static str {
        "index-of-coincidence"
    }

    fn candidates(&self, ciphertext: &str) -> Vec<KeyLengthCandidate> {
        column_ic_candidates(ciphertext, self.max_key_length)
    }

    fn estimate(&self, ciphertext: &str) -> usize {
        let candidates = self.candidates(ciphertext);
        if candidates.is_empty() {
            return 0;
        }

        let mut best_length = 1;
        let mut best_ic = 0.0;
        for candidate in &candidates {
            tracing::trace!(key_length = candidate.length, average_ic = candidate.score);
            if candidate.score > best_ic {
                best_ic = candidate.score;
                best_length = candidate.length;
            }
        }

        if let Some(tolerance) = self.prefer_shorter_within {
            let threshold = best_ic * (1.0 - tolerance);
            if let Some(shorter) = candidates
                .iter()
                .find(|c| c.length < best_length && c.score >= threshold)
            {
                tracing::debug!(
                    best = best_length,
                    preferred = shorter.length,
                    "preferring shorter key length within tolerance"
                );
                best_length = shorter.length;
            }
        }

        tracing::debug!(key_length = best_length, average_ic = best_ic, "ic estimate");
        best_length
    }
}

/// Average column IC closest to the IC of the plaintext language.
///
/// Ties go to the shorter length.
#[derive(Debug, Clone, Copy)]
pub struct EnglishIcStrategy {
    pub max_key_length: usize,
    pub target: f64,
}

impl EnglishIcStrategy {
    pub fn new(max_key_length: usize, statistics: &LetterStatistics) -> Self {
        Self {
            max_key_length,
            target: statistics.coincidence(),
        }
    }
}

impl Default for EnglishIcStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_ENGLISH_MAX_KEY_LENGTH, &LetterStatistics::english())
    }
}

impl KeyLengthEstimator for EnglishIcStrategy {
    fn name(&self) -> &'static str {
        "closest-to-english-ic"
    }

    fn candidates(&self, ciphertext: &str) -> Vec<KeyLengthCandidate> {
        column_ic_candidates(ciphertext, self.max_key_length)
    }

    fn estimate(&self, ciphertext: &str) -> usize {
        let mut best: Option<(usize, f64)> = None;

        for candidate in self.candidates(ciphertext) {
            let distance = (candidate.score - self.target).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate.length, distance));
            }
        }

        let length = best.map_or(0, |(length, _)| length);
        tracing::debug!(key_length = length, target = self.target, "english ic estimate");
        length
    }

    fn ranked(&self, ciphertext: &str) -> Vec<KeyLengthCandidate> {
        let mut candidates = self.candidates(ciphertext);
        candidates.sort_by(|a, b| {
            let da = (a.score - self.target).abs();
            let db = (b.score - self.target).abs();
            da.total_cmp(&db).then(a.length.cmp(&b.length))
        });
        candidates
    }
}
