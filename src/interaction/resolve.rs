//! Fuzzy resolution of free-text timezone arguments against the catalog.

/// Resolve a query to a single canonical timezone name.
///
/// Candidates are the catalog entries whose lowercased form contains the
/// lowercased query as a substring.  Resolution succeeds only when exactly one
/// candidate exists; zero or multiple matches fail closed rather than guess.
pub fn resolve_exact<'a>(query: &str, timezones: &'a [String]) -> Option<&'a str> {
    let needle = query.to_lowercase();

    let mut candidates = timezones.iter().filter(|t| t.to_lowercase().contains(&needle));

    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Some(only.as_str()),
        _ => None,
    }
}

/// Resolve a query to a counter-store prefix for popularity queries.
///
/// If any catalog entry starts with the query (case-insensitive), the query is
/// used verbatim, preserving the user's literal spelling even when it denotes
/// a whole family of canonical names.  Otherwise the first catalog entry
/// containing the query wins (catalog iteration order breaks ties).  A query
/// matching nothing at all, such as an abbreviation, is also used verbatim.
/// Unlike [`resolve_exact`], this never fails: popularity counts are
/// best-effort and must not block on ambiguity.
pub fn resolve_popularity_key(query: &str, timezones: &[String]) -> String {
    let needle = query.to_lowercase();

    if timezones.iter().any(|t| t.to_lowercase().starts_with(&needle)) {
        return query.to_string();
    }

    timezones
        .iter()
        .find(|t| t.to_lowercase().contains(&needle))
        .cloned()
        .unwrap_or_else(|| query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn exact_resolves_unique_substring_match() {
        let timezones = catalog(&["America/California"]);

        assert_eq!(resolve_exact("California", &timezones), Some("America/California"));
    }

    #[test]
    fn exact_is_case_insensitive_and_preserves_canonical_form() {
        let timezones = catalog(&["America/Bogota"]);

        assert_eq!(resolve_exact("bogota", &timezones), Some("America/Bogota"));
    }

    #[test]
    fn exact_fails_closed_on_ambiguity() {
        let timezones = catalog(&["America/Bogota", "America/Boise"]);

        assert_eq!(resolve_exact("America", &timezones), None);
    }

    #[test]
    fn exact_fails_on_no_match() {
        let timezones = catalog(&["America/Bogota"]);

        assert_eq!(resolve_exact("Europe", &timezones), None);
    }

    #[test]
    fn exact_is_idempotent() {
        let timezones = catalog(&["America/Bogota", "America/Boise"]);

        let first = resolve_exact("Bogota", &timezones);
        let second = resolve_exact("Bogota", &timezones);

        assert_eq!(first, second);
        assert_eq!(first, Some("America/Bogota"));
    }

    #[test]
    fn popularity_prefers_prefix_and_keeps_query_verbatim() {
        let timezones = catalog(&["America/Bogota", "America/Boise"]);

        assert_eq!(resolve_popularity_key("America", &timezones), "America");
        // The user's literal casing survives, even though it denotes a family.
        assert_eq!(resolve_popularity_key("america", &timezones), "america");
    }

    #[test]
    fn popularity_falls_back_to_first_substring_match() {
        let timezones = catalog(&["America/Bogota", "Europe/Borovsk", "America/Boise"]);

        assert_eq!(resolve_popularity_key("Bo", &timezones), "America/Bogota");
    }

    #[test]
    fn popularity_uses_query_verbatim_when_nothing_matches() {
        let timezones = catalog(&["America/Bogota", "America/Boise"]);

        assert_eq!(resolve_popularity_key("GTM", &timezones), "GTM");
    }
}
