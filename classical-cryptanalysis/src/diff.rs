//! Locating an inserted string by aligning against a reference text

/// Collects the letters of `decrypted` that do not line up with `reference`.
///
/// A single cursor moves forward through the reference. Each decrypted
/// character equal to the reference character under the cursor consumes it;
/// any other character is reported if it is a letter. This is a greedy
/// aligner, not a longest-common-subsequence diff: it works when the
/// reference is the plaintext with letters inserted, and misreports
/// reordered or deleted text.
pub fn extract_inserted(decrypted: &str, reference: &str) -> String {
    let reference: Vec<char> = reference.chars().collect();
    let mut position = 0;
    let mut inserted = String::new();

    for c in decrypted.chars() {
        if reference.get(position) == Some(&c) {
            position += 1;
        } else if c.is_ascii_alphabetic() {
            inserted.push(c);
        }
    }

    inserted
}
