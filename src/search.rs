//! Dashboard search over a category snapshot.

use crate::types::Category;

/// Categories whose name contains `term`, ignoring case.
///
/// A blank term matches everything. The result is a derived view and is
/// never written back to a store.
pub fn filter_by_name(categories: &[Category], term: &str) -> Vec<Category> {
    if term.trim().is_empty() {
        return categories.to_vec();
    }
    let needle = term.to_lowercase();
    categories
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::default_categories;

    fn names(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn blank_term_returns_everything_in_order() {
        let all = default_categories();
        assert_eq!(filter_by_name(&all, ""), all);
        assert_eq!(filter_by_name(&all, "   "), all);
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let all = default_categories();
        assert_eq!(names(&filter_by_name(&all, "WEAR")), ["Formal Wear", "Activewear"]);
        assert_eq!(names(&filter_by_name(&all, "coll")), ["Winter Collection"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter_by_name(&default_categories(), "shoes").is_empty());
    }

    #[test]
    fn source_is_untouched() {
        let all = default_categories();
        let _ = filter_by_name(&all, "wear");
        assert_eq!(all.len(), 6);
    }
}
