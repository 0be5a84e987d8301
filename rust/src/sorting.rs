//! Candidate processing order.
//!
//! Candidates with the fewest shortlisted organizations go first; ties are
//! broken by candidate id so the order is fully determined by the input.

use std::cmp::Ordering;

/// Sort key for candidate ordering (lower = scheduled earlier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSortKey<'a> {
    pub shortlist_len: usize,
    pub candidate_id: &'a str,
}

impl Ord for CandidateSortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.shortlist_len
            .cmp(&other.shortlist_len)
            .then_with(|| self.candidate_id.cmp(other.candidate_id))
    }
}

impl PartialOrd for CandidateSortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Return the indices of `candidates` in processing order.
///
/// Each item is `(candidate_id, shortlist_len)`.
pub fn processing_order<'a, I>(candidates: I) -> Vec<usize>
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    let mut keyed: Vec<(CandidateSortKey<'a>, usize)> = candidates
        .into_iter()
        .enumerate()
        .map(|(index, (candidate_id, shortlist_len))| {
            (
                CandidateSortKey {
                    shortlist_len,
                    candidate_id,
                },
                index,
            )
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, index)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewest_organizations_first() {
        let order = processing_order([("a", 3), ("b", 1), ("c", 2)]);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let order = processing_order([("s3", 1), ("s1", 1), ("s10", 1), ("s2", 2)]);
        // Lexicographic, so "s10" sorts before "s3"
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_independent_of_registration_order() {
        let forward = processing_order([("x", 1), ("y", 1)]);
        let reverse = processing_order([("y", 1), ("x", 1)]);
        assert_eq!(forward, vec![0, 1]);
        assert_eq!(reverse, vec![1, 0]);
    }

    #[test]
    fn test_sort_key_ordering() {
        let short = CandidateSortKey {
            shortlist_len: 1,
            candidate_id: "z",
        };
        let long = CandidateSortKey {
            shortlist_len: 2,
            candidate_id: "a",
        };
        assert!(short < long);
    }
}
