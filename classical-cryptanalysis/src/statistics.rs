//! Reference letter statistics for the language of the plaintext

use crate::text::ALPHABET_LEN;

/// Letter statistics of a plaintext language.
///
/// Every analyzer is constructed with one of these instead of reaching for
/// global tables, so a different language can be plugged in without touching
/// the algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterStatistics {
    frequency_order: [u8; ALPHABET_LEN],
    percentages: [f64; ALPHABET_LEN],
    coincidence: f64,
}

/// Standard English statistics.
pub const ENGLISH: LetterStatistics = LetterStatistics {
    frequency_order: *b"ETAOINSHRDLCUMWFGYPBVKJXQZ",
    percentages: [
        8.167, 1.492, 2.782, 4.253, 12.702, 2.228,
        2.015, 6.094, 6.966, 0.153, 0.772, 4.025,
        2.406, 6.749, 7.507, 1.929, 0.095, 5.987,
        6.327, 9.056, 2.758, 0.978, 2.360, 0.150,
        1.974, 0.074,
    ],
    coincidence: 0.068,
};

impl LetterStatistics {
    /// Builds a statistics table.
    ///
    /// # Arguments
    ///
    /// * `frequency_order` - Uppercase letters from most to least frequent.
    /// * `percentages` - Expected share of each letter A-Z, in percent.
    /// * `coincidence` - Index of coincidence of typical plaintext.
    pub const fn new(
        frequency_order: [u8; ALPHABET_LEN],
        percentages: [f64; ALPHABET_LEN],
        coincidence: f64,
    ) -> Self {
        Self {
            frequency_order,
            percentages,
            coincidence,
        }
    }

    pub const fn english() -> Self {
        ENGLISH
    }

    /// Letters ordered from most to least frequent.
    pub fn frequency_order(&self) -> &[u8; ALPHABET_LEN] {
        &self.frequency_order
    }

    /// The most frequent plaintext letter.
    pub fn most_frequent(&self) -> u8 {
        self.frequency_order[0]
    }

    /// Expected percentage of each letter A-Z.
    pub fn percentages(&self) -> &[f64; ALPHABET_LEN] {
        &self.percentages
    }

    /// Expected number of occurrences of the letter at `index` in a sample
    /// of `total` letters.
    pub fn expected_count(&self, index: usize, total: u32) -> f64 {
        total as f64 * (self.percentages[index] / 100.0)
    }

    /// Index of coincidence of typical plaintext.
    pub fn coincidence(&self) -> f64 {
        self.coincidence
    }
}

impl Default for LetterStatistics {
    fn default() -> Self {
        ENGLISH
    }
}
