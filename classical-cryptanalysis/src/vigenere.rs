//! Vigenère key recovery and decryption

use std::fmt;

use crate::error::{CryptanalysisError, Result};
use crate::shift::ShiftSolver;
use crate::text::{clean_text, letter_at, split_into_columns, ALPHABET_LEN};

/// A Vigenère key: uppercase letters, each standing for the shift `A=0 ... Z=25`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VigenereKey {
    letters: String,
}

impl VigenereKey {
    /// Builds a key from its shifts; values wrap modulo 26.
    pub fn from_shifts<I: IntoIterator<Item = u8>>(shifts: I) -> Self {
        Self {
            letters: shifts
                .into_iter()
                .map(|shift| letter_at(shift as usize))
                .collect(),
        }
    }

    /// Keeps the letters of `key`, uppercased, dropping everything else.
    /// The result may be empty.
    pub fn from_letters(key: &str) -> Self {
        Self {
            letters: clean_text(key),
        }
    }

    /// Like [`VigenereKey::from_letters`] but rejects keys without a single letter.
    pub fn parse(key: &str) -> Result<Self> {
        let parsed = Self::from_letters(key);
        if parsed.is_empty() {
            return Err(CryptanalysisError::InvalidKey(format!(
                "'{}' contains no letters",
                key
            )));
        }
        Ok(parsed)
    }

    pub fn as_str(&self) -> &str {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Shift values of the key letters, in order.
    pub fn shifts(&self) -> Vec<u8> {
        self.letters.bytes().map(|b| b - b'A').collect()
    }
}

impl fmt::Display for VigenereKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters)
    }
}

/// Reconstructs a key of `key_length` letters.
///
/// The letters of the ciphertext (case folded, everything else dropped) are
/// split into one column per key position and `solver` picks each column's
/// shift independently. A key length of zero gives an empty key.
///
/// The key never grows past the number of letters in the ciphertext: key
/// positions beyond that would never be used to decrypt anything.
pub fn recover_key<S: ShiftSolver + ?Sized>(
    ciphertext: &str,
    key_length: usize,
    solver: &S,
) -> VigenereKey {
    let filtered = clean_text(ciphertext);
    let columns = key_length.min(filtered.len());
    if columns < key_length {
        tracing::debug!(key_length, letters = filtered.len(), "key length capped at letter count");
    }

    let key = VigenereKey::from_shifts(
        split_into_columns(&filtered, columns)
            .iter()
            .map(|column| solver.solve(column)),
    );

    tracing::debug!(key = %key, solver = solver.name(), "recovered vigenère key");
    key
}

/// Decrypts Vigenère ciphertext with the given key.
///
/// Only ASCII letters advance the key position; everything else is copied
/// through in place. Letters keep their case. An empty key leaves the text
/// unchanged.
pub fn decrypt(ciphertext: &str, key: &VigenereKey) -> String {
    if key.is_empty() {
        return ciphertext.to_string();
    }

    let shifts = key.shifts();
    let mut key_index: usize = 0;

    ciphertext
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let base = if c.is_ascii_lowercase() { b'a' } else { b'A' };
                let shift = shifts[key_index % shifts.len()];
                key_index += 1;

                let value = (c as u8 - base + ALPHABET_LEN as u8 - shift) % ALPHABET_LEN as u8;
                (value + base) as char
            } else {
                c
            }
        })
        .collect()
}
