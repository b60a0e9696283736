//! Jaro-Winkler string similarity.

/// Longest common prefix that earns the Winkler bonus.
pub const WINKLER_PREFIX_CAP: usize = 4;
/// Weight of each shared prefix character in the Winkler bonus.
pub const WINKLER_SCALE: f64 = 0.1;

/// Jaro-Winkler similarity of two strings, in `[0, 1]`.
///
/// Identical strings score exactly `1.0`; if either side is empty the score is
/// exactly `0.0`. Characters are compared as Unicode scalar values, so callers
/// wanting case-insensitive comparison should lower-case both sides first.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let jaro = jaro(&a, &b);
    if jaro == 0.0 {
        return 0.0;
    }

    let prefix = a
        .iter()
        .zip(b.iter())
        .take(WINKLER_PREFIX_CAP)
        .take_while(|(x, y)| x == y)
        .count();

    jaro + WINKLER_SCALE * prefix as f64 * (1.0 - jaro)
}

fn jaro(a: &[char], b: &[char]) -> f64 {
    let window = (a.len().max(b.len()) / 2).saturating_sub(1);

    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ch) in a.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(b.len());
        for j in start..end {
            if !b_matched[j] && b[j] == *ch {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched characters in order on each side; mismatched pairs are half-transpositions.
    let a_seq = a.iter().zip(&a_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let b_seq = b.iter().zip(&b_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let half_transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    let t = half_transpositions as f64 / 2.0;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config as ProptestConfig;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("markup of h.r. 1", "markup of h.r. 1"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(similarity("hearing", ""), 0.0);
        assert_eq!(similarity("", "hearing"), 0.0);
    }

    #[test]
    fn no_common_characters_scores_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn textbook_pairs() {
        // MARTHA / MARHTA: m = 6, t = 1, jaro = 0.9444, prefix = 3
        assert!(approx(similarity("martha", "marhta"), 0.961_111_111_111_111));
        // DWAYNE / DUANE: m = 4, t = 0, jaro = 0.8222, prefix = 1
        assert!(approx(similarity("dwayne", "duane"), 0.84));
        // DIXON / DICKSONX: m = 4, t = 0, jaro = 0.7667, prefix = 2
        assert!(approx(similarity("dixon", "dicksonx"), 0.813_333_333_333_333));
    }

    #[test]
    fn prefix_bonus_is_capped_at_four() {
        let jaro_only = jaro(
            &"abcdefgh".chars().collect::<Vec<_>>(),
            &"abcdefxy".chars().collect::<Vec<_>>(),
        );
        let expected = jaro_only + WINKLER_SCALE * 4.0 * (1.0 - jaro_only);
        assert!(approx(similarity("abcdefgh", "abcdefxy"), expected));
    }

    #[test]
    fn short_strings_use_zero_window() {
        // max(len) / 2 - 1 == 0, so only same-position characters match.
        assert_eq!(similarity("ab", "ba"), 0.0);
        assert!(similarity("ab", "ac") > 0.0);
    }

    #[test]
    fn multibyte_characters_count_once() {
        let score = similarity("comité", "comite");
        assert!(score > 0.9 && score < 1.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            failure_persistence: None,
            .. ProptestConfig::default()
        })]

        #[test]
        fn prop_reflexive(s in "\\PC{1,40}") {
            prop_assert_eq!(similarity(&s, &s), 1.0);
        }

        #[test]
        fn prop_empty_is_zero(s in "\\PC{1,40}") {
            prop_assert_eq!(similarity(&s, ""), 0.0);
            prop_assert_eq!(similarity("", &s), 0.0);
        }

        #[test]
        fn prop_symmetric(a in "[a-e ]{0,24}", b in "[a-e ]{0,24}") {
            prop_assert!(approx(similarity(&a, &b), similarity(&b, &a)));
        }

        #[test]
        fn prop_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
