//! Index of coincidence

use crate::text::{count_letters, split_into_columns};

/// Calculates the Index of Coincidence (IC) for the given text.
///
/// IC = Σ nᵢ(nᵢ - 1) / (N(N - 1)), the probability that two letters drawn
/// without replacement are equal. Non-letters are ignored and case is folded.
///
/// # Returns
///
/// A value in [0, 1]; 0.0 if the text has fewer than two letters.
pub fn index_of_coincidence(text: &str) -> f64 {
    let counts = count_letters(text);
    let total: u64 = counts.iter().map(|&c| c as u64).sum();

    if total <= 1 {
        return 0.0;
    }

    let numerator: u64 = counts
        .iter()
        .map(|&c| c as u64 * (c as u64).saturating_sub(1))
        .sum();

    numerator as f64 / (total * (total - 1)) as f64
}

/// Mean IC over the `key_length` columns of already-filtered text.
pub fn average_column_ic(filtered: &str, key_length: usize) -> f64 {
    if key_length == 0 {
        return 0.0;
    }

    let total: f64 = split_into_columns(filtered, key_length)
        .iter()
        .map(|column| index_of_coincidence(column))
        .sum();

    total / key_length as f64
}
