//! Canonical ordering of artifact checksums.

use std::collections::BTreeMap;

/// Known algorithms, strongest-preferred first.
const PRIORITY: &[&str] = &["sha256", "sha512", "sha384", "sha224", "sha1", "md5"];

/// Rank of an algorithm name. `SHA-256`, `sha_256` and `SHA256` all rank as
/// `sha256`; unknown algorithms rank after every known one.
fn rank(algorithm: &str) -> usize {
    let normalized: String = algorithm
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    PRIORITY
        .iter()
        .position(|known| *known == normalized)
        .unwrap_or(PRIORITY.len())
}

/// Order checksums by algorithm priority.
///
/// Every input entry appears exactly once in the output. Unknown algorithms
/// keep the map's (lexicographic) order among themselves.
pub fn prioritize(checksums: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut ordered: Vec<(String, String)> = checksums
        .iter()
        .map(|(algo, digest)| (algo.clone(), digest.clone()))
        .collect();
    ordered.sort_by_key(|(algo, _)| rank(algo));
    ordered
}
