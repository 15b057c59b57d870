//! In-memory sorted set
//!
//! Entries are ordered by `(score, member)`, matching Redis: equal scores fall
//! back to byte order of the member. A member map gives O(1) `ZSCORE`.

use crate::connection::{LexRange, Limit, ScoreRange};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tablekv_core::Order;

/// Score with a total order
///
/// NaN is rejected before it gets here, and `-0.0` is folded into `0.0`.
#[derive(Debug, Clone, Copy)]
struct Score(f64);

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Score-ordered set of unique members
#[derive(Debug, Default)]
pub struct SortedSet {
    scores: FxHashMap<String, f64>,
    ordered: BTreeSet<(Score, String)>,
}

impl SortedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or re-score a member, returns whether it is new
    pub fn insert(&mut self, member: &str, score: f64) -> bool {
        let score = score + 0.0;
        let is_new = match self.scores.insert(member.to_string(), score) {
            Some(old) => {
                self.ordered.remove(&(Score(old), member.to_string()));
                false
            }
            None => true,
        };
        self.ordered.insert((Score(score), member.to_string()));
        is_new
    }

    /// Remove a member, returns whether it was present
    pub fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove(member) {
            Some(score) => {
                self.ordered.remove(&(Score(score), member.to_string()));
                true
            }
            None => false,
        }
    }

    /// Score of a member
    pub fn score(&self, member: &str) -> Option<f64> {
        self.scores.get(member).copied()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Members whose score lies in `range`, walked in `order`, windowed by `limit`
    pub fn range_by_score(&self, range: ScoreRange, order: Order, limit: Limit) -> Vec<String> {
        let matching = |(score, _): &&(Score, String)| range.contains(score.0);
        self.walk(order, limit, matching)
    }

    /// Members inside the lexicographic `range`, walked in `order`, windowed by `limit`
    pub fn range_by_lex(&self, range: &LexRange, order: Order, limit: Limit) -> Vec<String> {
        let matching = |(_, member): &&(Score, String)| range.contains(member);
        self.walk(order, limit, matching)
    }

    /// All `(member, score)` pairs in ascending order
    pub fn entries(&self) -> Vec<(String, f64)> {
        self.ordered
            .iter()
            .map(|(score, member)| (member.clone(), score.0))
            .collect()
    }

    fn walk<F>(&self, order: Order, limit: Limit, keep: F) -> Vec<String>
    where
        F: FnMut(&&(Score, String)) -> bool,
    {
        let pick = |(_, member): &(Score, String)| member.clone();
        if order.is_descending() {
            limit
                .apply(self.ordered.iter().rev().filter(keep))
                .map(pick)
                .collect()
        } else {
            limit
                .apply(self.ordered.iter().filter(keep))
                .map(pick)
                .collect()
        }
    }
}
