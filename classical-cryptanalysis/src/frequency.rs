//! Letter frequency analysis for substitution ciphers

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::statistics::LetterStatistics;
use crate::substitution::SubstitutionMapping;

/// How letter case is treated when counting and mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// `a` and `A` are the same symbol; mapped letters come out uppercase.
    #[default]
    Normalized,
    /// `a` and `A` are counted and mapped as distinct symbols; mapped letters
    /// come out lowercase.
    Sensitive,
}

impl CasePolicy {
    /// The symbol a ciphertext letter is counted and looked up under.
    pub fn symbol(self, c: char) -> char {
        match self {
            CasePolicy::Normalized => c.to_ascii_uppercase(),
            CasePolicy::Sensitive => c,
        }
    }

    /// A given plaintext letter as this policy stores it.
    pub fn target(self, c: char) -> char {
        match self {
            CasePolicy::Normalized => c.to_ascii_uppercase(),
            CasePolicy::Sensitive => c,
        }
    }

    /// A reference-table letter (uppercase) as this policy emits it.
    fn reference_letter(self, letter: u8) -> char {
        match self {
            CasePolicy::Normalized => letter.to_ascii_uppercase() as char,
            CasePolicy::Sensitive => letter.to_ascii_lowercase() as char,
        }
    }
}

/// Occurrence counts of every letter symbol seen in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterFrequencyTable {
    counts: BTreeMap<char, usize>,
    policy: CasePolicy,
}

impl LetterFrequencyTable {
    /// Counts the ASCII letters of `text`; everything else is ignored.
    pub fn from_text(text: &str, policy: CasePolicy) -> Self {
        let mut counts = BTreeMap::new();

        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            *counts.entry(policy.symbol(c)).or_insert(0) += 1;
        }

        Self { counts, policy }
    }

    pub fn count(&self, c: char) -> usize {
        self.counts
            .get(&self.policy.symbol(c))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct symbols seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of letters counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Symbols from most to least frequent.
    ///
    /// Equal counts are ordered by symbol value, so `A` precedes `B` and under
    /// the case-sensitive policy every uppercase letter precedes every
    /// lowercase one.
    pub fn rank(&self) -> Vec<char> {
        let mut ranked: Vec<(char, usize)> = self.iter().collect();
        // stable, so ties keep BTreeMap order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(c, _)| c).collect()
    }
}

/// Derives a substitution mapping by lining up observed letter frequencies
/// with the reference frequency order.
///
/// The i-th most frequent ciphertext symbol is mapped to the i-th letter of
/// the reference order. Symbols beyond the 26th get no mapping. This is a
/// heuristic: real text seldom follows the reference order exactly, so the
/// output is only an approximation to correct by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyAnalyzer {
    statistics: LetterStatistics,
    policy: CasePolicy,
}

impl FrequencyAnalyzer {
    pub fn new(policy: CasePolicy) -> Self {
        Self {
            statistics: LetterStatistics::english(),
            policy,
        }
    }

    pub fn with_statistics(statistics: LetterStatistics, policy: CasePolicy) -> Self {
        Self { statistics, policy }
    }

    pub fn policy(&self) -> CasePolicy {
        self.policy
    }

    pub fn frequencies(&self, ciphertext: &str) -> LetterFrequencyTable {
        LetterFrequencyTable::from_text(ciphertext, self.policy)
    }

    pub fn analyze(&self, ciphertext: &str) -> SubstitutionMapping {
        let table = self.frequencies(ciphertext);
        let ranked = table.rank();
        tracing::debug!(
            distinct = table.len(),
            total = table.total(),
            rank = %ranked.iter().collect::<String>(),
            "letter frequency rank"
        );

        let mut mapping = SubstitutionMapping::new(self.policy);
        for (&symbol, &reference) in ranked.iter().zip(self.statistics.frequency_order()) {
            mapping.bind(symbol, self.policy.reference_letter(reference));
        }

        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_by_count_then_symbol() {
        let table = LetterFrequencyTable::from_text("bbb aa cc d", CasePolicy::Normalized);
        assert_eq!(table.rank(), vec!['B', 'A', 'C', 'D']);
        assert_eq!(table.total(), 8);
        assert_eq!(table.count('c'), 2);
    }

    #[test]
    fn test_sensitive_table_keeps_case_apart() {
        let table = LetterFrequencyTable::from_text("XXxx", CasePolicy::Sensitive);
        assert_eq!(table.len(), 2);
        assert_eq!(table.count('X'), 2);
        assert_eq!(table.rank(), vec!['X', 'x']);
    }

    #[test]
    fn test_normalized_analysis() {
        let analyzer = FrequencyAnalyzer::new(CasePolicy::Normalized);
        let mapping = analyzer.analyze("xxXX yyy zz w");

        assert_eq!(mapping.get('X'), Some('E'));
        assert_eq!(mapping.get('Y'), Some('T'));
        assert_eq!(mapping.get('Z'), Some('A'));
        assert_eq!(mapping.get('W'), Some('O'));
        assert_eq!(mapping.apply("xxXX yyy zz w"), "EEEE TTT AA O");
    }

    #[test]
    fn test_sensitive_analysis() {
        let analyzer = FrequencyAnalyzer::new(CasePolicy::Sensitive);
        let mapping = analyzer.analyze("XXxx");

        assert_eq!(mapping.get('X'), Some('e'));
        assert_eq!(mapping.get('x'), Some('t'));
        assert_eq!(mapping.apply("XXxx!"), "eett!");
    }

    #[test]
    fn test_sensitive_analysis_maps_at_most_26_symbols() {
        let text: String = ('a'..='z').chain('A'..='Z').collect();
        let mapping = FrequencyAnalyzer::new(CasePolicy::Sensitive).analyze(&text);

        assert_eq!(mapping.len(), 26);
        // all counts tie, so the uppercase symbols take every slot
        assert!(mapping.iter().all(|(c, _)| c.is_ascii_uppercase()));
        assert_eq!(mapping.apply("q"), "q");
        assert!(mapping.is_bijective());
    }

    #[test]
    fn test_empty_input_gives_empty_mapping() {
        let analyzer = FrequencyAnalyzer::default();
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("123 ,.;").is_empty());
    }

    #[test]
    fn test_caesar_like_example() {
        let ciphertext = "UIF RVJDL CSPXO GPy OFX BOTX";
        let mapping = FrequencyAnalyzer::default().analyze(ciphertext);

        assert!(mapping.is_bijective());
        assert_eq!(mapping.len(), 17);
        // O and X are the most frequent (3 each), O first
        assert_eq!(mapping.get('O'), Some('E'));
        assert_eq!(mapping.get('X'), Some('T'));
        let plaintext = mapping.apply(ciphertext);
        assert_eq!(plaintext.len(), ciphertext.len());
    }
}
