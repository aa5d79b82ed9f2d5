//! English pluralization for snake_case identifiers
//!
//! Used to derive the plural alias of a link ("location_fulfillment_set" →
//! "location_fulfillment_sets"). Only the last segment of a snake_case name
//! is pluralized.

/// Utility for deriving plural forms of identifiers
pub struct Pluralizer;

impl Pluralizer {
    /// Pluralize a snake_case identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use link_modules::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("fulfillment_set"), "fulfillment_sets");
    /// assert_eq!(Pluralizer::pluralize("inventory_item"), "inventory_items");
    /// assert_eq!(Pluralizer::pluralize("sales_channel_address"), "sales_channel_addresses");
    /// assert_eq!(Pluralizer::pluralize("category"), "categories");
    /// ```
    pub fn pluralize(name: &str) -> String {
        match name.rsplit_once('_') {
            Some((head, last)) if !last.is_empty() => {
                format!("{}_{}", head, Self::pluralize_word(last))
            }
            _ => Self::pluralize_word(name),
        }
    }

    fn pluralize_word(word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        let stem_before = |suffix_len: usize| &word[..word.len() - suffix_len];

        if word.len() > 1 && word.ends_with('y') && !Self::ends_with_vowel_then(word, 'y') {
            return format!("{}ies", stem_before(1));
        }

        if ["s", "sh", "ch", "x", "z"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            return format!("{}es", word);
        }

        if word.len() > 2 && word.ends_with("fe") {
            return format!("{}ves", stem_before(2));
        }

        if word.len() > 1 && word.ends_with('f') {
            return format!("{}ves", stem_before(1));
        }

        if word.len() > 1 && word.ends_with('o') && !Self::ends_with_vowel_then(word, 'o') {
            return match word {
                "photo" | "piano" | "halo" | "logo" | "promo" => format!("{}s", word),
                _ => format!("{}es", word),
            };
        }

        format!("{}s", word)
    }

    /// True if `word` ends in a vowel followed by `last`
    fn ends_with_vowel_then(word: &str, last: char) -> bool {
        let mut chars = word.chars().rev();
        chars.next() == Some(last)
            && matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
    }
}
