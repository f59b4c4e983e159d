//! Fuzzy correction of city names against a fixed gazetteer.

use tracing::debug;

/// Known cities, lowercase canonical form.
pub const GAZETTEER: &[&str] = &[
    "jakarta",
    "bandung",
    "semarang",
    "surabaya",
    "medan",
    "makassar",
    "palembang",
    "denpasar",
    "yogyakarta",
    "malang",
    "kudus",
];

/// Minimum similarity for a gazetteer entry to replace the input.
pub const MATCH_CUTOFF: f64 = 0.7;

/// Lower-cases `candidate` and snaps it to the closest gazetteer entry.
///
/// Returns the lowercased input when nothing reaches [`MATCH_CUTOFF`].
pub fn resolve(candidate: &str) -> String {
    let lower = candidate.to_lowercase();

    match closest(&lower, GAZETTEER) {
        Some((city, score)) => {
            debug!(input = %lower, city, score, "city corrected");
            city.to_string()
        }
        None => {
            debug!(input = %lower, "no gazetteer match, keeping input");
            lower
        }
    }
}

/// Highest-scoring entry at or above [`MATCH_CUTOFF`], ordered by
/// `(score, name)` so equal scores go to the larger name.
fn closest<'a>(input: &str, entries: &[&'a str]) -> Option<(&'a str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for &entry in entries {
        let score = similarity(input, entry);
        if score < MATCH_CUTOFF {
            continue;
        }
        if best.is_none_or(|(name, s)| score > s || (score == s && entry > name)) {
            best = Some((entry, score));
        }
    }
    best
}

/// Matching-characters ratio `2*M / (|a| + |b|)` in `[0, 1]`.
///
/// `M` sums the lengths of the blocks found by taking the longest common
/// substring and recursing on both sides of it.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Earliest longest common substring as `(start_a, start_b, len)`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // prev[j + 1] = length of the common suffix ending at a[i - 1], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut cur = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                cur[j + 1] = prev[j] + 1;
                if cur[j + 1] > best.2 {
                    best = (i + 1 - cur[j + 1], j + 1 - cur[j + 1], cur[j + 1]);
                }
            }
        }
        prev = cur;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gazetteer_entries_are_fixed_points() {
        for city in GAZETTEER {
            assert_eq!(resolve(city), *city);
        }
    }

    #[test]
    fn input_is_lowercased_before_matching() {
        assert_eq!(resolve("Bandung"), "bandung");
        assert_eq!(resolve("SURABAYA"), "surabaya");
    }

    #[test]
    fn unmatched_input_is_not_trimmed() {
        assert_eq!(resolve(" Tokyo "), " tokyo ");
    }

    #[test]
    fn equal_scores_go_to_the_larger_name() {
        // both score 6 / 8
        assert_eq!(closest("abcz", &["abcx", "abcy"]), Some(("abcy", 0.75)));
        assert_eq!(closest("abcz", &["abcy", "abcx"]), Some(("abcy", 0.75)));
        assert_eq!(closest("zzzz", &["abcy", "abcx"]), None);
    }

    #[test]
    fn misspelling_is_corrected() {
        assert_eq!(resolve("jakrta"), "jakarta");
        assert_eq!(resolve("Jogyakarta"), "yogyakarta");
        assert_eq!(resolve("bandun"), "bandung");
    }

    #[test]
    fn unknown_city_is_returned_lowercased() {
        assert_eq!(resolve("Tokyo"), "tokyo");
        assert_eq!(resolve("Pontianak"), "pontianak");
    }

    #[test]
    fn similarity_matches_known_values() {
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-9);
        assert!((similarity("jakarta", "jakarta") - 1.0).abs() < 1e-9);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn below_cutoff_is_not_corrected() {
        // "medon" vs "medan": 8 / 10 = 0.8, accepted
        assert_eq!(resolve("medon"), "medan");
        // "mdx" vs "medan": 2 * 2 / 8 = 0.5, rejected
        assert_eq!(resolve("mdx"), "mdx");
    }
}
