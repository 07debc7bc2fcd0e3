//! Monoalphabetic substitution mappings and decryption

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{CryptanalysisError, Result};
use crate::frequency::CasePolicy;

/// A partial mapping from ciphertext letters to plaintext letters.
///
/// Under [`CasePolicy::Normalized`] keys are stored uppercase and lookups
/// fold case; under [`CasePolicy::Sensitive`] `a` and `A` are separate
/// symbols. Each ciphertext symbol maps to at most one plaintext letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMapping {
    pairs: BTreeMap<char, char>,
    policy: CasePolicy,
}

impl SubstitutionMapping {
    pub fn new(policy: CasePolicy) -> Self {
        Self {
            pairs: BTreeMap::new(),
            policy,
        }
    }

    /// Builds a mapping from explicit `(ciphertext, plaintext)` pairs.
    ///
    /// Both sides must be ASCII letters, and a ciphertext symbol may only be
    /// given one plaintext letter.
    pub fn from_pairs<I>(policy: CasePolicy, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut mapping = Self::new(policy);

        for (cipher, plain) in pairs {
            if !cipher.is_ascii_alphabetic() || !plain.is_ascii_alphabetic() {
                return Err(CryptanalysisError::InvalidMapping(format!(
                    "'{}' -> '{}' is not a letter pair",
                    cipher, plain
                )));
            }
            if let Some(existing) = mapping.get(cipher) {
                if existing != plain {
                    return Err(CryptanalysisError::InvalidMapping(format!(
                        "'{}' maps to both '{}' and '{}'",
                        cipher, existing, plain
                    )));
                }
            }
            mapping.bind(cipher, plain);
        }

        Ok(mapping)
    }

    pub(crate) fn bind(&mut self, cipher: char, plain: char) {
        self.pairs.insert(self.policy.symbol(cipher), plain);
    }

    /// Plaintext letter for a ciphertext character, if one is mapped.
    pub fn get(&self, cipher: char) -> Option<char> {
        self.pairs.get(&self.policy.symbol(cipher)).copied()
    }

    pub fn policy(&self) -> CasePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in ciphertext symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.pairs.iter().map(|(&c, &p)| (c, p))
    }

    /// True when no two ciphertext symbols share a plaintext letter.
    pub fn is_bijective(&self) -> bool {
        let targets: BTreeSet<char> = self.pairs.values().copied().collect();
        targets.len() == self.pairs.len()
    }

    /// The reverse mapping, or `None` if this one is not bijective.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_bijective() {
            return None;
        }
        Some(Self {
            pairs: self.pairs.iter().map(|(&c, &p)| (p, c)).collect(),
            policy: self.policy,
        })
    }

    /// Shorthand for [`decrypt`].
    pub fn apply(&self, ciphertext: &str) -> String {
        decrypt(ciphertext, self)
    }
}

impl fmt::Display for SubstitutionMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cipher: String = self.pairs.keys().collect();
        let plain: String = self.pairs.values().collect();
        writeln!(f, "cipher: {}", cipher)?;
        write!(f, "plain:  {}", plain)
    }
}

/// Applies a substitution mapping.
///
/// Letters with a mapping are replaced; unmapped letters and every other
/// character are copied unchanged.
pub fn decrypt(ciphertext: &str, mapping: &SubstitutionMapping) -> String {
    ciphertext
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                mapping.get(c).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Extends `mapping` by aligning a known plaintext against the ciphertext.
///
/// Both texts are walked together. An unmapped ciphertext letter opposite a
/// plaintext letter is bound to it and both sides advance; a mapped letter
/// whose mapping agrees with the plaintext advances both sides; anything else
/// skips the ciphertext symbol only. Non-letters count as mapping to
/// themselves. Existing pairs are never overwritten.
pub fn refine_mapping(
    mapping: &SubstitutionMapping,
    known_plaintext: &str,
    ciphertext: &str,
) -> SubstitutionMapping {
    let mut refined = mapping.clone();
    let plain: Vec<char> = known_plaintext.chars().collect();
    let cipher: Vec<char> = ciphertext.chars().collect();

    let (mut p, mut c) = (0, 0);
    let mut added = 0usize;

    while p < plain.len() && c < cipher.len() {
        let (pc, cc) = (plain[p], cipher[c]);

        if !cc.is_ascii_alphabetic() {
            if pc == cc {
                p += 1;
            }
            c += 1;
            continue;
        }

        let expected = refined.policy.target(pc);
        match refined.get(cc) {
            None if pc.is_ascii_alphabetic() => {
                refined.bind(cc, expected);
                added += 1;
                p += 1;
            }
            Some(existing) if existing == expected => p += 1,
            _ => {}
        }
        c += 1;
    }

    tracing::debug!(added, total = refined.len(), "refined mapping from known plaintext");
    refined
}
