//! Per-column Caesar shift recovery

use crate::statistics::LetterStatistics;
use crate::text::{count_letters, ALPHABET_LEN};

/// Added to every expected count so empty buckets never divide by zero.
pub const CHI_SQUARED_EPSILON: f64 = 1e-6;

/// Trait for recovering the Caesar shift applied to one column of a
/// Vigenère ciphertext.
pub trait ShiftSolver {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns the shift in `0..26` that most plausibly produced `column`.
    ///
    /// Non-letters in the column are ignored and case is folded. An empty
    /// column yields 0.
    fn solve(&self, column: &str) -> u8;
}

/// Chi-squared statistic of observed letter counts against the expected
/// distribution for a sample of `total` letters.
pub fn chi_squared(counts: &[u32; ALPHABET_LEN], total: u32, statistics: &LetterStatistics) -> f64 {
    counts
        .iter()
        .enumerate()
        .map(|(i, &observed)| {
            let expected = statistics.expected_count(i, total);
            let diff = observed as f64 - expected;
            diff * diff / (expected + CHI_SQUARED_EPSILON)
        })
        .sum()
}

/// Picks the shift whose decryption best fits the expected letter
/// distribution under the chi-squared statistic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChiSquaredSolver {
    statistics: LetterStatistics,
}

impl ChiSquaredSolver {
    pub fn new(statistics: LetterStatistics) -> Self {
        Self { statistics }
    }
}

impl ShiftSolver for ChiSquaredSolver {
    fn name(&self) -> &'static str {
        "chi-squared"
    }

    fn solve(&self, column: &str) -> u8 {
        let counts = count_letters(column);
        let total: u32 = counts.iter().sum();
        if total == 0 {
            return 0;
        }

        let mut best_shift = 0u8;
        let mut best_chi = f64::INFINITY;

        for shift in 0..ALPHABET_LEN {
            // bucket (letter - shift) receives the count of `letter`
            let mut shifted = [0u32; ALPHABET_LEN];
            for (letter, &count) in counts.iter().enumerate() {
                shifted[(letter + ALPHABET_LEN - shift) % ALPHABET_LEN] += count;
            }

            let chi = chi_squared(&shifted, total, &self.statistics);
            if chi < best_chi {
                best_chi = chi;
                best_shift = shift as u8;
            }
        }

        tracing::trace!(shift = best_shift, chi = best_chi, "chi-squared column fit");
        best_shift
    }
}

/// Assumes the most frequent ciphertext letter encrypts the most frequent
/// plaintext letter (`E` for English).
///
/// Ties go to the alphabetically first ciphertext letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostFrequentSolver {
    statistics: LetterStatistics,
}

impl MostFrequentSolver {
    pub fn new(statistics: LetterStatistics) -> Self {
        Self { statistics }
    }
}

impl ShiftSolver for MostFrequentSolver {
    fn name(&self) -> &'static str {
        "most-frequent"
    }

    fn solve(&self, column: &str) -> u8 {
        let counts = count_letters(column);

        let mut most_frequent = 0usize;
        for (index, &count) in counts.iter().enumerate() {
            if count > counts[most_frequent] {
                most_frequent = index;
            }
        }
        if counts[most_frequent] == 0 {
            return 0;
        }

        let anchor = (self.statistics.most_frequent() - b'A') as usize;
        ((most_frequent + ALPHABET_LEN - anchor) % ALPHABET_LEN) as u8
    }
}
