use classical_cryptanalysis::{
    extract_inserted, refine_mapping, vigenere, CasePolicy, ChiSquaredSolver, Cryptanalysis,
    EnglishIcStrategy, FrequencyAnalyzer, IcStrategy, KasiskiStrategy, KeyLengthEstimator,
    SubstitutionMapping, VigenereKey,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PARAGRAPH: &str = "It was the best of times, it was the worst of times, it was the age of \
wisdom, it was the age of foolishness, it was the epoch of belief, it was the epoch of \
incredulity, it was the season of Light, it was the season of Darkness, it was the spring of \
hope, it was the winter of despair, we had everything before us, we had nothing before us, we \
were all going direct to Heaven, we were all going direct the other way. In short, the period \
was so far like the present period, that some of its noisiest authorities insisted on its \
being received, for good or for evil, in the superlative degree of comparison only. There were \
a king with a large jaw and a queen with a plain face, on the throne of England; there were a \
king with a large jaw and a queen with a fair face, on the throne of France. In both countries \
it was clearer than crystal to the lords of the State preserves of loaves and fishes, that \
things in general were settled for ever.";

fn vigenere_encrypt(plaintext: &str, key: &str) -> String {
    let shifts: Vec<u8> = key.bytes().map(|b| b.to_ascii_uppercase() - b'A').collect();
    let mut index = 0;
    plaintext
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let base = if c.is_ascii_lowercase() { b'a' } else { b'A' };
                let shifted = (c as u8 - base + shifts[index % shifts.len()]) % 26 + base;
                index += 1;
                shifted as char
            } else {
                c
            }
        })
        .collect()
}

fn random_substitution(seed: u64) -> SubstitutionMapping {
    let mut targets: Vec<char> = ('A'..='Z').collect();
    targets.shuffle(&mut StdRng::seed_from_u64(seed));
    SubstitutionMapping::from_pairs(CasePolicy::Normalized, ('A'..='Z').zip(targets)).unwrap()
}

#[test]
fn paragraph_is_long_enough() {
    let letters = PARAGRAPH.chars().filter(|c| c.is_ascii_alphabetic()).count();
    assert!(letters > 500, "only {letters} letters");
}

#[test]
fn ic_estimator_finds_key_length_three() {
    let ciphertext = vigenere_encrypt(PARAGRAPH, "KEY");
    assert_eq!(Cryptanalysis::estimate_key_length_by_ic(&ciphertext), 3);
}

#[test]
fn full_vigenere_recovery() {
    let ciphertext = vigenere_encrypt(PARAGRAPH, "KEY");

    let key_length = IcStrategy::default().estimate(&ciphertext);
    let key = vigenere::recover_key(&ciphertext, key_length, &ChiSquaredSolver::default());
    assert_eq!(key.as_str(), "KEY");

    let plaintext = vigenere::decrypt(&ciphertext, &key);
    assert_eq!(plaintext, PARAGRAPH);
}

#[test]
fn decryption_keeps_every_non_letter_in_place() {
    let ciphertext = vigenere_encrypt(PARAGRAPH, "KEY");
    let plaintext = Cryptanalysis::decrypt_vigenere(&ciphertext, "WRONG");

    assert_eq!(plaintext.len(), ciphertext.len());
    for (c, p) in ciphertext.chars().zip(plaintext.chars()) {
        if c.is_ascii_alphabetic() {
            assert!(p.is_ascii_alphabetic());
            assert_eq!(c.is_ascii_uppercase(), p.is_ascii_uppercase());
        } else {
            assert_eq!(c, p);
        }
    }
}

#[test]
fn short_example_decrypts_to_uppercase_letters() {
    let ciphertext = "WMCEEIKLGRPIFVMEUGXQPWQVIOIAVEYXUEKFKBTALVXTGAFXYEVKPAGY";

    let key_length = Cryptanalysis::estimate_key_length_by_ic(ciphertext);
    let key = Cryptanalysis::recover_vigenere_key(ciphertext, key_length);
    let plaintext = vigenere::decrypt(ciphertext, &key);

    assert_eq!(plaintext.len(), ciphertext.len());
    assert!(plaintext.chars().all(|c| c.is_ascii_uppercase()));
}

#[test]
fn separators_survive_short_example() {
    let ciphertext = "WMCE EIKL-GRPI, FVME!";
    let key = Cryptanalysis::recover_vigenere_key(ciphertext, 4);
    let plaintext = vigenere::decrypt(ciphertext, &key);

    assert_eq!(plaintext.len(), ciphertext.len());
    for (c, p) in ciphertext.chars().zip(plaintext.chars()) {
        if c.is_ascii_alphabetic() {
            assert!(p.is_ascii_uppercase());
        } else {
            assert_eq!(c, p);
        }
    }
}

#[test]
fn strategies_on_the_same_ciphertext() {
    let ciphertext = vigenere_encrypt(PARAGRAPH, "KEY");

    // every probed length is reported, ranked best first
    let ranked = IcStrategy::default().ranked(&ciphertext);
    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].length, 3);

    // Kasiski compares raw characters, so spaces dominate its counts
    let kasiski = KasiskiStrategy::default().estimate(&ciphertext);
    assert!((1..20).contains(&kasiski));

    let english = EnglishIcStrategy::default().estimate(&ciphertext);
    assert_eq!(english % 3, 0);
}

#[test]
fn analyzed_mappings_are_bijective() {
    for seed in 0..20 {
        let mapping = random_substitution(seed);
        let ciphertext = mapping.apply(PARAGRAPH);

        for policy in [CasePolicy::Normalized, CasePolicy::Sensitive] {
            let guessed = FrequencyAnalyzer::new(policy).analyze(&ciphertext);
            assert!(guessed.is_bijective(), "seed {seed} {policy:?}");
            assert!(guessed.len() <= 26);
        }
    }
}

#[test]
fn bijective_mapping_round_trips() {
    for seed in 100..110 {
        let mapping = random_substitution(seed);
        let inverse = mapping.inverse().unwrap();
        let ciphertext = mapping.apply(PARAGRAPH);
        assert_eq!(inverse.apply(&ciphertext), PARAGRAPH.to_ascii_uppercase());
    }
}

#[test]
fn known_plaintext_refinement_recovers_the_mapping() {
    let mapping = random_substitution(7);
    let ciphertext = mapping.apply(PARAGRAPH);

    let guessed = FrequencyAnalyzer::default().analyze(&ciphertext);
    let empty = SubstitutionMapping::new(CasePolicy::Normalized);
    let refined = refine_mapping(&empty, PARAGRAPH, &ciphertext);

    assert_eq!(refined.apply(&ciphertext), PARAGRAPH.to_ascii_uppercase());
    // both cover every letter that occurs in the ciphertext
    assert_eq!(guessed.len(), refined.len());
}

#[test]
fn inserted_string_is_found_after_decryption() {
    let reference = "we had everything before us, we had nothing before us";
    let injected = "we had everything before us, ZQXJV we had nothing before us";
    let ciphertext = vigenere_encrypt(injected, "LEMON");

    let plaintext = vigenere::decrypt(&ciphertext, &VigenereKey::from_letters("LEMON"));
    assert_eq!(extract_inserted(&plaintext, reference), "ZQXJV");
}
