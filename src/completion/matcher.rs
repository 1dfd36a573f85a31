//! Wildcard prefix matching and case-insensitive spelling sets

use std::collections::HashSet;

use glob::Pattern;

use crate::catalog::fold_case;

/// Matches candidate spellings against the partial word
///
/// The partial word is a wildcard pattern with an implicit trailing `*`
/// (unless it already ends with one). Pattern and candidate are both
/// passed through [`fold_case`] first. An empty partial word matches
/// everything.
#[derive(Debug, Clone)]
pub struct Matcher {
    rule: MatchRule,
}

#[derive(Debug, Clone)]
enum MatchRule {
    Everything,
    Wildcard(Pattern),
    /// Case-folded literal prefix, for partial words that are not valid
    /// wildcard patterns (unbalanced brackets and the like)
    Prefix(String),
}

impl Matcher {
    pub fn new(partial: &str) -> Self {
        if partial.is_empty() {
            return Self {
                rule: MatchRule::Everything,
            };
        }

        let folded = fold_case(partial);
        let glob = if folded.ends_with('*') {
            folded.clone()
        } else {
            format!("{folded}*")
        };

        let rule = match Pattern::new(&glob) {
            Ok(pattern) => MatchRule::Wildcard(pattern),
            Err(_) => MatchRule::Prefix(folded.trim_end_matches('*').to_string()),
        };
        Self { rule }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match &self.rule {
            MatchRule::Everything => true,
            MatchRule::Wildcard(pattern) => pattern.matches(&fold_case(candidate)),
            MatchRule::Prefix(prefix) => fold_case(candidate).starts_with(prefix.as_str()),
        }
    }

    /// Keep the matching items, in their original order
    pub fn filter<'a, I>(&self, items: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Set of option spellings compared case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellingSet {
    spellings: HashSet<String>,
}

impl SpellingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a spelling; false if an equivalent one was already present
    pub fn insert(&mut self, spelling: &str) -> bool {
        self.spellings.insert(fold_case(spelling))
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.spellings.contains(&fold_case(spelling))
    }

    /// True if any of `spellings` is in the set
    pub fn contains_any<'a, I>(&self, spellings: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        spellings.into_iter().any(|s| self.contains(s))
    }

    pub fn len(&self) -> usize {
        self.spellings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spellings.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for SpellingSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = SpellingSet::new();
        for spelling in iter {
            set.insert(spelling);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogOption;

    #[test]
    fn test_empty_matches_everything() {
        let matcher = Matcher::new("");
        assert_eq!(
            matcher.filter(["beta", "alpha", "Gamma"]),
            vec!["beta", "alpha", "Gamma"]
        );
    }

    #[test]
    fn test_prefix_case_insensitive() {
        for partial in ["--out", "--OUT", "--output*", "--Output"] {
            assert!(
                Matcher::new(partial).matches("--output"),
                "{partial} should match --output"
            );
        }
        assert!(!Matcher::new("output").matches("--output"));
        assert!(!Matcher::new("--outputs").matches("--output"));
    }

    #[test]
    fn test_explicit_wildcards() {
        assert!(Matcher::new("--*put").matches("--output"));
        assert!(Matcher::new("d?-thing").matches("do-thing"));
        assert!(Matcher::new("--*put").matches("--output-format"));
        assert!(!Matcher::new("--*put").matches("--name"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let matcher = Matcher::new("t");
        assert_eq!(matcher.filter(["table", "json", "tsv"]), vec!["table", "tsv"]);
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let matcher = Matcher::new("[Ab");
        assert!(matcher.matches("[abc"));
        assert!(!matcher.matches("abc"));
    }

    #[test]
    fn test_path_like_values() {
        assert!(Matcher::new("/subscriptions/").matches("/subscriptions/abc/resourceGroups"));
        assert!(Matcher::new(".").matches(".hidden"));
    }

    #[test]
    fn test_spelling_set() {
        let mut set: SpellingSet = ["--Output", "-o"].into_iter().collect();
        assert!(set.contains("--output"));
        assert!(set.contains("-O"));
        assert!(!set.insert("--OUTPUT"));
        assert!(set.insert("--name"));
        assert_eq!(set.len(), 3);
        assert!(set.contains_any(["--x", "--name"]));
        assert!(!SpellingSet::new().contains_any(["--x"]));
    }

    #[test]
    fn test_folding_agrees_with_option_lookup() {
        let option = CatalogOption::new(
            "--größe",
            "Size.",
            vec!["--ÉTAT".to_string()],
            vec![],
            None,
            None,
        )
        .unwrap();

        for typed in ["--GRÖSSE", "--GRÖßE", "--état"] {
            let set: SpellingSet = [typed].into_iter().collect();
            assert_eq!(
                option.is_spelled(typed),
                set.contains_any(option.spellings()),
                "{typed}"
            );
        }
        assert!(option.is_spelled("--état"));
        assert!(Matcher::new("--ÉT").matches("--état"));
        assert!(Matcher::new("--Grö").matches("--größe"));
    }
}
