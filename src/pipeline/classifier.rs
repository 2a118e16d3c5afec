use serde::Serialize;

use crate::constants::{CRITICALLY_ENDANGERED_CATEGORY, MAMMAL_CLASS};
use crate::types::Species;

/// The two bounded views derived from one species list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub mammals: Vec<Species>,
    pub critically_endangered: Vec<Species>,
}

pub fn is_mammal(species: &Species) -> bool {
    species.class_name == MAMMAL_CLASS
}

pub fn is_critically_endangered(species: &Species) -> bool {
    species.category == CRITICALLY_ENDANGERED_CATEGORY
}

/// Stable filter of `all` into mammals and critically endangered species,
/// each truncated to the first `limit` matches.
pub fn classify(all: &[Species], limit: usize) -> Classification {
    let take = |pred: fn(&Species) -> bool| -> Vec<Species> {
        all.iter().filter(|s| pred(s)).take(limit).cloned().collect()
    };
    Classification {
        mammals: take(is_mammal),
        critically_endangered: take(is_critically_endangered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fakes::species;

    fn sample() -> Vec<Species> {
        vec![
            species(1, "MAMMALIA", "CR"),
            species(2, "AVES", "CR"),
            species(3, "MAMMALIA", "LC"),
            species(4, "REPTILIA", "EN"),
            species(5, "MAMMALIA", "CR"),
            species(6, "AMPHIBIA", "CR"),
        ]
    }

    fn ids(list: &[Species]) -> Vec<u64> {
        list.iter().map(|s| s.taxon_id).collect()
    }

    #[test]
    fn test_filters_preserve_source_order() {
        let out = classify(&sample(), 10);
        assert_eq!(ids(&out.mammals), vec![1, 3, 5]);
        assert_eq!(ids(&out.critically_endangered), vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_limit_keeps_first_matches() {
        let out = classify(&sample(), 2);
        assert_eq!(ids(&out.mammals), vec![1, 3]);
        assert_eq!(ids(&out.critically_endangered), vec![1, 2]);
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let out = classify(&sample(), 0);
        assert!(out.mammals.is_empty());
        assert!(out.critically_endangered.is_empty());
    }

    #[test]
    fn test_matches_are_exact() {
        let all = vec![
            species(1, "Mammalia", "CR"),
            species(2, "MAMMALIA ", "cr"),
            species(3, "MAMMALIA", "CR(PE)"),
        ];
        let out = classify(&all, 10);
        assert_eq!(ids(&out.mammals), vec![3]);
        assert_eq!(ids(&out.critically_endangered), vec![1]);
    }

    #[test]
    fn test_outputs_satisfy_predicates_for_every_limit() {
        let all = sample();
        for limit in 0..8 {
            let out = classify(&all, limit);
            assert!(out.mammals.len() <= limit);
            assert!(out.critically_endangered.len() <= limit);
            assert!(out.mammals.iter().all(is_mammal));
            assert!(out.critically_endangered.iter().all(is_critically_endangered));

            let expected_cr = all.iter().filter(|s| is_critically_endangered(s)).count();
            assert_eq!(out.critically_endangered.len(), expected_cr.min(limit));
        }
    }
}
