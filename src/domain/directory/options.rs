//! Fixed menu option lists and the digit-substring selection rules.
//!
//! A reply selects option `i` when the decimal string of `i` appears anywhere
//! in the body. Multi-digit indices are therefore ambiguous with concatenated
//! single digits ("12" is both {1, 2} and {12}); the scans below keep that
//! behavior as-is.

/// Supported language codes, in menu order.
pub const LANGUAGE_OPTIONS: &[&str] = &[
    "en", "es", "zh", "pl", "ur", "tl", "vi", "ar", "ko", "ru", "bs", "fr",
];

/// Need categories, in menu order. Values double as catalog message ids.
pub const WHAT_OPTIONS: &[&str] = &[
    "All",
    "Money",
    "Food",
    "Housing",
    "Health",
    "Mental Health",
    "Utilities",
    "Legal Help",
];

/// Target populations, in menu order. The last entry is the "None" sentinel.
pub const WHO_OPTIONS: &[&str] = &[
    "All",
    "Families",
    "Immigrants",
    "LGBTQI",
    "Business Owners",
    "Students",
    "None",
];

/// Index 0 of the what/who menus: no constraint on that axis.
pub const ALL_INDEX: usize = 0;

/// Filter value meaning "resources for none of the tracked populations".
pub const NONE_OPTION: &str = "None";

/// Language assigned to new sessions and used as the catalog fallback.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Who values that resources are tagged with, excluding the menu sentinels.
pub fn tracked_who_options() -> &'static [&'static str] {
    &WHO_OPTIONS[1..WHO_OPTIONS.len() - 1]
}

/// Index of the reserved "None" entry in the who menu.
pub fn who_none_index() -> usize {
    WHO_OPTIONS.len() - 1
}

/// Finds the highest option index whose digits appear in `body`.
///
/// Scanning from the top keeps "10" from being read as option 1.
pub fn highest_option_in(body: &str, option_count: usize) -> Option<usize> {
    (0..option_count)
        .rev()
        .find(|idx| body.contains(&idx.to_string()))
}

/// Collects every option index whose digits appear in `body`, ascending.
pub fn options_in(body: &str, option_count: usize) -> Vec<usize> {
    (0..option_count)
        .filter(|idx| body.contains(&idx.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_list_has_two_digit_indices() {
        assert_eq!(LANGUAGE_OPTIONS.len(), 12);
        assert_eq!(LANGUAGE_OPTIONS[10], "bs");
    }

    #[test]
    fn highest_option_prefers_two_digit_index() {
        assert_eq!(highest_option_in("10", 12), Some(10));
        assert_eq!(highest_option_in("11", 12), Some(11));
    }

    #[test]
    fn highest_option_matches_zero() {
        assert_eq!(highest_option_in("0", 12), Some(0));
    }

    #[test]
    fn highest_option_none_for_text() {
        assert_eq!(highest_option_in("covid", 12), None);
    }

    #[test]
    fn options_in_collects_concatenated_digits() {
        assert_eq!(options_in("123", 8), vec![1, 2, 3]);
        assert_eq!(options_in("1 2", 8), vec![1, 2]);
    }

    #[test]
    fn options_in_ignores_out_of_range_digits() {
        assert!(options_in("9", 8).is_empty());
    }

    #[test]
    fn tracked_who_options_exclude_sentinels() {
        let tracked = tracked_who_options();
        assert!(!tracked.contains(&"All"));
        assert!(!tracked.contains(&NONE_OPTION));
        assert!(tracked.contains(&"Families"));
        assert_eq!(WHO_OPTIONS[who_none_index()], NONE_OPTION);
    }
}
