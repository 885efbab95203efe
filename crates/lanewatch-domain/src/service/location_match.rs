//! Four-tier fuzzy location name matcher
//!
//! Tiers are evaluated in strict order and the first hit wins:
//! 1. exact name equality (case-insensitive)
//! 2. exact equality after removing whitespace
//! 3. core-key substring containment
//! 4. parenthetical-code equality or Jaccard token similarity, gated by
//!    an acceptance threshold
//!
//! The matcher never errors; a tier whose precondition is absent simply
//! falls through to the next.

use std::collections::HashSet;

use tracing::debug;

use crate::model::LocationRef;
use crate::service::normalize::{
    collapse_whitespace, core_key, extract_parenthetical_code, hyphens_to_spaces,
    strip_non_alphanumeric, strip_parentheticals,
};

/// Tokens too generic to carry matching signal
const STOPWORDS: &[&str] = &["at", "hub", "the", "pvt", "ltd"];

/// Find the best reference location for a free-text name.
///
/// Returns `None` when the query is empty, every tier misses, or the
/// best tier-4 score falls below `threshold`.
pub fn find_best_location_match<'a>(
    query: &str,
    candidates: &'a [LocationRef],
    threshold: f64,
) -> Option<&'a LocationRef> {
    let query = query.trim();
    if query.is_empty() || candidates.is_empty() {
        return None;
    }

    // Tier 1: exact, case-insensitive
    let query_lower = query.to_lowercase();
    if let Some(hit) = candidates
        .iter()
        .find(|c| c.name.trim().to_lowercase() == query_lower)
    {
        debug!(query, candidate = %hit.name, tier = 1, "location matched");
        return Some(hit);
    }

    // Tier 2: exact, space-insensitive
    let query_nospace = remove_whitespace(&query_lower);
    if let Some(hit) = candidates
        .iter()
        .find(|c| remove_whitespace(&c.name.to_lowercase()) == query_nospace)
    {
        debug!(query, candidate = %hit.name, tier = 2, "location matched");
        return Some(hit);
    }

    // Tier 3: core substring. First candidate in iteration order whose
    // name, space-stripped or core-key reduced, contains the query core.
    let query_core = core_key(query);
    if !query_core.is_empty() {
        if let Some(hit) = candidates.iter().find(|c| {
            remove_whitespace(&c.name.to_lowercase()).contains(&query_core)
                || core_key(&c.name).contains(&query_core)
        }) {
            debug!(query, candidate = %hit.name, tier = 3, "location matched");
            return Some(hit);
        }
    }

    // Tier 4: code equality or Jaccard token score
    let query_code = extract_parenthetical_code(query).trim().to_lowercase();
    let query_tokens = name_tokens(query);

    let mut best: Option<(&LocationRef, f64, bool)> = None;
    for candidate in candidates {
        let candidate_code = extract_parenthetical_code(&candidate.name)
            .trim()
            .to_lowercase();
        let code_match =
            !query_code.is_empty() && !candidate_code.is_empty() && query_code == candidate_code;
        let score = if code_match {
            1.0
        } else {
            jaccard(&query_tokens, &name_tokens(&candidate.name))
        };

        let replaces = match best {
            None => true,
            // On equal score a code match beats a token-only match;
            // otherwise the earlier candidate stands.
            Some((_, best_score, best_code)) => {
                score > best_score || (score == best_score && code_match && !best_code)
            }
        };
        if replaces {
            best = Some((candidate, score, code_match));
        }
    }

    match best {
        Some((hit, score, code_match)) if score >= threshold => {
            debug!(query, candidate = %hit.name, tier = 4, score, code_match, "location matched");
            Some(hit)
        }
        _ => None,
    }
}

fn remove_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Token set for Jaccard scoring: parenthetical content removed, name
/// normalized, split on whitespace, stopwords discarded.
fn name_tokens(name: &str) -> HashSet<String> {
    let s = strip_parentheticals(name);
    let s = hyphens_to_spaces(&s);
    let s = strip_non_alphanumeric(&s);
    collapse_whitespace(&s)
        .to_lowercase()
        .split_whitespace()
        .filter(|t| !STOPWORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// Intersection over union of two token sets; 0 when either is empty
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<LocationRef> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| LocationRef::new(*n, 10.0 + i as f64, 70.0 + i as f64))
            .collect()
    }

    #[test]
    fn test_tier1_exact_beats_higher_token_overlap() {
        let candidates = refs(&["Ambala City Hub Extension", "AMBALA"]);
        let hit = find_best_location_match("ambala", &candidates, 0.9).unwrap();
        assert_eq!(hit.name, "AMBALA");
    }

    #[test]
    fn test_tier2_space_insensitive() {
        let candidates = refs(&["New Delhi"]);
        let hit = find_best_location_match("NEWDELHI", &candidates, 0.9).unwrap();
        assert_eq!(hit.name, "New Delhi");
    }

    #[test]
    fn test_tier3_core_substring() {
        let candidates = refs(&["Greater Ambala Logistics Park", "Nagpur"]);
        let hit =
            find_best_location_match("Safexpress AMBALA (AML-11) Hub", &candidates, 0.9).unwrap();
        assert_eq!(hit.name, "Greater Ambala Logistics Park");
    }

    #[test]
    fn test_tier3_first_candidate_wins() {
        let candidates = refs(&["Ambala North", "Ambala South"]);
        let hit = find_best_location_match("Safexpress Ambala Hub", &candidates, 0.9).unwrap();
        assert_eq!(hit.name, "Ambala North");
    }

    #[test]
    fn test_tier4_code_match() {
        let candidates = refs(&["Chandigarh Depot (CHD-2)", "Karnal Depot (KRL-1)"]);
        let hit = find_best_location_match("Unrelated Name (krl-1)", &candidates, 0.9).unwrap();
        assert_eq!(hit.name, "Karnal Depot (KRL-1)");
    }

    #[test]
    fn test_tier4_below_threshold_returns_none() {
        let candidates = refs(&["Bangalore Whitefield Depot"]);
        // One shared token out of three in the union
        assert!(find_best_location_match("Bangalore Airport", &candidates, 0.9).is_none());
    }

    #[test]
    fn test_tier4_jaccard_accepts_identical_token_sets() {
        let candidates = refs(&["Depot Karnal at"]);
        // Stopword "at" is discarded on both sides; token sets identical
        let hit = find_best_location_match("The Karnal Depot", &candidates, 0.9).unwrap();
        assert_eq!(hit.name, "Depot Karnal at");
    }

    #[test]
    fn test_empty_query_and_empty_candidates() {
        assert!(find_best_location_match("", &refs(&["X"]), 0.9).is_none());
        assert!(find_best_location_match("X", &[], 0.9).is_none());
    }

    #[test]
    fn test_jaccard_values() {
        let a: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let b: HashSet<String> = ["b", "c"].iter().map(|s| s.to_string()).collect();
        assert!((jaccard(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(jaccard(&a, &HashSet::new()), 0.0);
    }
}
