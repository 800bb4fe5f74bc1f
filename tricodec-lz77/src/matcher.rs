//! Brute-force longest-match search.
//!
//! Every position in the window is tried in turn, nearest first. This is
//! O(window × lookahead) per input position; there is no hash chain.

use crate::config::MIN_MATCH;

/// A back-reference candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Distance back from the current position.
    pub distance: usize,
    /// Number of matching bytes.
    pub length: usize,
}

/// Find the longest match for `data[pos..]` starting at most `window` bytes
/// back, limited to `max_len` bytes.
///
/// The match may run into the bytes it is copying (distance < length).
/// Ties go to the nearest candidate. Returns `None` when nothing reaches
/// [`MIN_MATCH`].
pub fn find_longest_match(data: &[u8], pos: usize, window: usize, max_len: usize) -> Option<Match> {
    let max_len = max_len.min(data.len().saturating_sub(pos));
    if max_len < MIN_MATCH {
        return None;
    }

    let mut best = Match {
        distance: 0,
        length: MIN_MATCH - 1,
    };
    for distance in 1..=window.min(pos) {
        let start = pos - distance;
        let length = (0..max_len)
            .take_while(|&k| data[start + k] == data[pos + k])
            .count();
        if length > best.length {
            best = Match { distance, length };
            if length == max_len {
                break;
            }
        }
    }

    (best.distance > 0).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_history() {
        assert_eq!(find_longest_match(b"abcabc", 0, 4096, 255), None);
    }

    #[test]
    fn test_simple_repeat() {
        assert_eq!(
            find_longest_match(b"abcabc", 3, 4096, 255),
            Some(Match {
                distance: 3,
                length: 3
            })
        );
    }

    #[test]
    fn test_overlapping_match() {
        assert_eq!(
            find_longest_match(b"aaaaaaaaaa", 1, 4096, 8),
            Some(Match {
                distance: 1,
                length: 8
            })
        );
    }

    #[test]
    fn test_window_limits_search() {
        let data = b"xyz-----xyz";
        assert!(find_longest_match(data, 8, 8, 3).is_some());
        assert_eq!(find_longest_match(data, 8, 7, 3), None);
    }

    #[test]
    fn test_short_match_ignored() {
        assert_eq!(find_longest_match(b"abxab", 3, 4096, 255), None);
    }

    #[test]
    fn test_nearest_wins_ties() {
        let m = find_longest_match(b"abc_abc_abc", 8, 4096, 3).unwrap();
        assert_eq!(m.distance, 4);
    }
}
