// 🔑 Identity Key Builder - Name-based athlete identity
//
// Race files carry no stable athlete ID: bib numbers reset between events
// and seasons. The only thing that persists is the name, so identity is
// the cleaned, case-folded full name and nothing else.
//
// "first|last" (lowercase) is the sole join key across files and years.
// No fuzzy matching, no nickname handling: two records are the same
// athlete iff their cleaned names match exactly. Two distinct athletes
// sharing a full name would collapse into one entry; the source data
// offers no field (school, birth year) to tell them apart.

/// Build the identity key from cleaned first and last names
///
/// Pure function: callers pass names that already went through
/// `parser::clean_name`.
///
/// # Example
/// ```
/// use nordic_standings::identity::athlete_key;
///
/// assert_eq!(athlete_key("John", "Doe"), "john|doe");
/// ```
pub fn athlete_key(first: &str, last: &str) -> String {
    format!("{}|{}", first.to_lowercase(), last.to_lowercase())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_case_insensitive() {
        assert_eq!(athlete_key("John", "Doe"), athlete_key("JOHN", "doe"));
        assert_eq!(athlete_key("John", "Doe"), "john|doe");
    }

    #[test]
    fn test_distinct_names_get_distinct_keys() {
        assert_ne!(athlete_key("John", "Doe"), athlete_key("Jane", "Doe"));
        assert_ne!(athlete_key("John", "Doe"), athlete_key("John", "Roe"));
    }

    #[test]
    fn test_separator_keeps_name_parts_apart() {
        // "Ann As" vs "An Nas" must not collide
        assert_ne!(athlete_key("Ann", "As"), athlete_key("An", "nAs"));
    }
}
