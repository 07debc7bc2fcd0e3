//! Letter filtering and column partitioning shared by the analyzers

/// Size of the Latin alphabet every analyzer works over.
pub const ALPHABET_LEN: usize = 26;

/// Position of an ASCII letter in the alphabet (A=0, B=1, ...), ignoring case.
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Uppercase letter for an alphabet position; wraps modulo 26.
pub fn letter_at(index: usize) -> char {
    (b'A' + (index % ALPHABET_LEN) as u8) as char
}

/// Keeps only ASCII letters, converted to uppercase.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Splits text into `key_length` columns; column `i` holds every character at
/// a position congruent to `i` modulo `key_length`.
///
/// A key length of zero yields no columns.
pub fn split_into_columns(text: &str, key_length: usize) -> Vec<String> {
    let mut columns = vec![String::new(); key_length];
    if key_length == 0 {
        return columns;
    }

    for (i, c) in text.chars().enumerate() {
        columns[i % key_length].push(c);
    }

    columns
}

/// Counts the occurrences of each letter A-Z, case-insensitively.
/// Everything that is not an ASCII letter is skipped.
pub fn count_letters(text: &str) -> [u32; ALPHABET_LEN] {
    let mut counts = [0u32; ALPHABET_LEN];

    for index in text.chars().filter_map(letter_index) {
        counts[index] += 1;
    }

    counts
}
