//! Fuzzy name matching, so that objects can be found even when their name is misspelled.

use serde::{Deserialize, Serialize};

use crate::id::{Named, ObjectId};

/// Names scoring below this against the query are never considered a match.
pub const DEFAULT_MIN_SCORE: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Lowest [`ratio`] a name may score to be returned by a search.
    pub min_score: u8,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// An object found by a search, along with its index in the searched slice.
#[derive(Debug)]
pub struct Found<'a, T> {
    pub object: &'a T,
    pub index: usize,
}

impl<T> Clone for Found<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Found<'_, T> {}

/// Similarity of two strings, from 0 (nothing in common) to 100 (equal).
///
/// This is the indel ratio: twice the length of the longest common subsequence, over the total
/// length of both strings. Comparison is per character and case-sensitive.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let similarity = (2 * lcs) as f64 / total as f64;
    // Halves go to the even neighbour, so 12.5 scores 12 and 37.5 scores 38.
    (100.0 * similarity).round_ties_even() as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0; b.len() + 1];
    let mut current = vec![0; b.len() + 1];
    for &x in a {
        for (j, &y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Returns every item whose name matches `name` best, provided the best score reaches
/// `min_score`. Ties are all returned, in slice order.
pub fn search_by_name<'a, T: Named>(items: &'a [T], name: &str, min_score: u8) -> Vec<Found<'a, T>> {
    let scores: Vec<u8> = items.iter().map(|item| ratio(item.name(), name)).collect();
    let Some(&best) = scores.iter().max() else {
        return Vec::new();
    };
    if best < min_score {
        return Vec::new();
    }

    items
        .iter()
        .zip(&scores)
        .enumerate()
        .filter(|(_, (_, score))| **score == best)
        .map(|(index, (object, _))| Found { object, index })
        .collect()
}

pub fn search_by_id<T: Named>(items: &[T], id: ObjectId) -> Option<Found<'_, T>> {
    items
        .iter()
        .position(|item| item.id() == id)
        .map(|index| Found {
            object: &items[index],
            index,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(ratio("segment", "segment"), 100);
        assert_eq!(ratio("", ""), 100);
    }

    #[test]
    fn nothing_in_common_scores_0() {
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("abc", ""), 0);
    }

    #[test]
    fn transpositions_still_match() {
        assert_eq!(ratio("this is a schmilblick", "tihs a si schmilblick"), 81);
        assert_eq!(ratio("itsaschmilblick", "isatschlimbickl"), 73);
        assert!(ratio("Object_2", "Nothin in common") < DEFAULT_MIN_SCORE);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(ratio("a", "axxxxxxxxxxxxxx"), 12);
        assert_eq!(ratio("abc", "abcxxxxxxxxxx"), 38);
        assert_eq!(ratio("abcde", "abcdexxxxxx"), 62);
    }

    #[test]
    fn ratio_is_symmetric() {
        assert_eq!(ratio("segment0", "segment"), ratio("segment", "segment0"));
        assert_eq!(ratio("segment", "segment0"), 93);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(ratio("é", "e"), 0);
        assert_eq!(ratio("ébauche", "ébauche"), 100);
    }
}
