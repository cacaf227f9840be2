use crate::catalog::ThemeId;

// ---------------------------------------------------------------------------
// Availability filter
// ---------------------------------------------------------------------------

/// Keep the catalog entries the host can load, in catalog order.
pub fn filter_loadable<F>(catalog: &[ThemeId], mut is_loadable: F) -> Vec<ThemeId>
where
    F: FnMut(&ThemeId) -> bool,
{
    catalog.iter().filter(|id| is_loadable(id)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Query matching for the picker list
// ---------------------------------------------------------------------------

/// Case-insensitive fuzzy match.
///
/// Every whitespace-separated word of `query` must appear in `candidate` as a
/// subsequence (`"tn"` matches `"tokyo-night"`). An empty query matches.
pub fn matches_query(candidate: &str, query: &str) -> bool {
    let haystack = candidate.to_lowercase();
    query
        .split_whitespace()
        .all(|word| is_subsequence(&word.to_lowercase(), &haystack))
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|n| rest.any(|h| h == n))
}

/// Indices of the candidates matching `query`, in input order.
pub fn filter_by_query<S: AsRef<str>>(candidates: &[S], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..candidates.len()).collect();
    }
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| matches_query(c.as_ref(), query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ThemeId> {
        names.iter().map(|n| ThemeId::from(*n)).collect()
    }

    // --- filter_loadable ---

    #[test]
    fn loadable_keeps_catalog_order() {
        let catalog = ids(&["zenburn", "nord", "dracula", "ayu-dark"]);
        let result = filter_loadable(&catalog, |id| id != "nord");
        assert_eq!(result, ids(&["zenburn", "dracula", "ayu-dark"]));
    }

    #[test]
    fn loadable_nothing_installed_is_empty() {
        let catalog = ids(&["nord", "dracula"]);
        assert!(filter_loadable(&catalog, |_| false).is_empty());
    }

    #[test]
    fn loadable_keeps_duplicates() {
        let catalog = ids(&["nord", "dracula", "nord"]);
        let result = filter_loadable(&catalog, |_| true);
        assert_eq!(result, catalog);
    }

    #[test]
    fn loadable_asks_oracle_once_per_entry() {
        let catalog = ids(&["a", "b", "c"]);
        let mut asked = Vec::new();
        let _ = filter_loadable(&catalog, |id| {
            asked.push(id.to_string());
            true
        });
        assert_eq!(asked, vec!["a", "b", "c"]);
    }

    // --- query matching ---

    #[test]
    fn empty_query_matches_everything() {
        let candidates = ["nord", "dracula"];
        assert_eq!(filter_by_query(&candidates, ""), vec![0, 1]);
        assert_eq!(filter_by_query(&candidates, "   "), vec![0, 1]);
    }

    #[test]
    fn substring_matches() {
        let candidates = ["gruvbox-dark", "nord", "one-dark"];
        assert_eq!(filter_by_query(&candidates, "dark"), vec![0, 2]);
    }

    #[test]
    fn subsequence_matches() {
        assert!(matches_query("tokyo-night", "tn"));
        assert!(matches_query("catppuccin-mocha", "cmoc"));
        assert!(!matches_query("nord", "dn"));
    }

    #[test]
    fn case_insensitive() {
        assert!(matches_query("Solarized-Dark", "sold"));
        assert!(matches_query("nord", "NORD"));
    }

    #[test]
    fn every_word_must_match() {
        let candidates = ["rose-pine", "rose-pine-moon", "moonfly"];
        assert_eq!(filter_by_query(&candidates, "rose moon"), vec![1]);
    }

    #[test]
    fn no_match_is_empty() {
        let candidates = ["nord", "dracula"];
        assert!(filter_by_query(&candidates, "xyz").is_empty());
    }
}
