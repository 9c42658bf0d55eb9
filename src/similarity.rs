//! Text similarity ranking
//!
//! Candidate headings that recur with near-identical wording (a chapter-title template
//! repeated across the page) are more likely to be the real title than one-off strings.
//! [`rank`] orders strings by how similar each is to all the others.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Second strings at least this long get the popular-character heuristic
const AUTOJUNK_MIN_LEN: usize = 200;

/// Block-matching similarity of two strings in `[0, 1]`
///
/// `2 * M / (len(a) + len(b))`, where `M` counts the characters in the matching blocks
/// found by recursively taking the longest common block (earliest on ties) and then
/// matching what lies left and right of it. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = BlockMatcher::new(&a, &b).matching_characters();
    2.0 * matches as f64 / total as f64
}

/// Aggregate similarity of each string to every other position in the input
///
/// Identical strings are grouped, so every distinct pair of values is compared once.
pub fn similarity_scores<S: AsRef<str>>(strings: &[S]) -> Vec<f64> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    let mut slots = Vec::with_capacity(strings.len());
    for string in strings {
        let entry = counts.entry(string.as_ref());
        slots.push(entry.index());
        *entry.or_insert(0) += 1;
    }

    let distinct: Vec<(&str, usize)> = counts.into_iter().collect();
    let value_scores: Vec<f64> = distinct
        .iter()
        .map(|&(value, _)| {
            distinct
                .iter()
                .map(|&(other, count)| {
                    if other == value {
                        // ratio of a string with itself is exactly 1
                        (count - 1) as f64
                    } else {
                        count as f64 * ratio(value, other)
                    }
                })
                .sum()
        })
        .collect();

    slots.into_iter().map(|slot| value_scores[slot]).collect()
}

/// Indices of `strings` ordered by descending aggregate similarity
///
/// The most "typical" string comes first; ties keep ascending index order.
pub fn rank<S: AsRef<str>>(strings: &[S]) -> Vec<usize> {
    let scores = similarity_scores(strings);
    let mut order: Vec<usize> = (0..strings.len()).collect();
    order.sort_by(|&x, &y| scores[y].total_cmp(&scores[x]));
    log::trace!("Similarity ranking {:?} from scores {:?}", order, scores);
    order
}

/// Reorder `items` by a ranking produced by [`rank`]
pub fn sorted_by_indices<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&index| items[index].clone()).collect()
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` within the given bounds
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular characters never seed a block but may still extend one
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    fn matching_characters(&self) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_ratio_basics() {
        assert_close(ratio("", ""), 1.0);
        assert_close(ratio("abc", ""), 0.0);
        assert_close(ratio("chapter one", "chapter one"), 1.0);
        assert_close(ratio("abcd", "bcde"), 0.75);
        assert_close(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_ratio_matches_classic_values() {
        // Known values of the classic block-matching algorithm
        assert_close(ratio("abcd", "dcba"), 0.25);
        assert_close(ratio("private Thread currentThread;", "private volatile Thread currentThread;"), 0.8656716417910447);
        assert_close(ratio("qabxcd", "abycdf"), 2.0 * 4.0 / 12.0);
    }

    #[test]
    fn test_ratio_long_strings_with_popular_characters() {
        let a = "a".repeat(250);
        let b = "a".repeat(250);
        assert_close(ratio(&a, &b), 1.0);

        let c = format!("{}x", "ab".repeat(120));
        assert!(ratio(&c, &c.replace('x', "y")) > 0.99);
    }

    #[test]
    fn test_rank_empty_and_single() {
        let empty: [&str; 0] = [];
        assert!(rank(&empty).is_empty());
        assert_eq!(rank(&["only"]), vec![0]);
    }

    #[test]
    fn test_rank_duplicates_first() {
        let order = rank(&["chapter one", "chapter one", "unrelated text"]);
        assert_eq!(order, vec![0, 1, 2]);

        let order = rank(&["zzz", "Chapter 12: The Road", "Chapter 12: The Road", "menu"]);
        assert_eq!(&order[..2], &[1, 2]);
    }

    #[test]
    fn test_rank_ties_keep_index_order() {
        assert_eq!(rank(&["abc", "xyz", "qrs"]), vec![0, 1, 2]);
    }

    #[test]
    fn test_similarity_scores_match_pairwise_sum() {
        let strings = ["Chapter 1", "Chapter 2", "Chapter 1", "Comments"];
        let scores = similarity_scores(&strings);

        for (i, a) in strings.iter().enumerate() {
            let expected: f64 = strings
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, b)| ratio(a, b))
                .sum();
            assert_close(scores[i], expected);
        }
    }

    #[test]
    fn test_sorted_by_indices() {
        let items = vec!["a", "b", "c"];
        assert_eq!(sorted_by_indices(&items, &[2, 0, 1]), vec!["c", "a", "b"]);
    }
}
