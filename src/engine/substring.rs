use std::fmt::{Display, Error, Formatter};

use regex::{Regex, escape};

use crate::engine::util::{contains_upper, regex_match};
use crate::{CaseMatching, CommandItem, MatchEngine, MatchRange, MatchResult};

//------------------------------------------------------------------------------
// Substring engine: the default filter

/// Case-insensitive (by default) substring match against `label`, `value`,
/// `description` and every `keywords` entry, short-circuiting OR across the
/// four fields. An empty or whitespace-only query matches everything and
/// leaves the pool order untouched.
#[derive(Debug)]
pub struct SubstringEngine {
    query: String,
    query_regex: Option<Regex>,
}

impl SubstringEngine {
    /// Builds an engine for one query
    pub fn new(query: &str, case: CaseMatching) -> Self {
        let query = query.trim();
        let case_sensitive = match case {
            CaseMatching::Respect => true,
            CaseMatching::Ignore => false,
            CaseMatching::Smart => contains_upper(query),
        };

        let mut query_builder = String::new();
        if !case_sensitive {
            query_builder.push_str("(?i)");
        }
        query_builder.push_str(&escape(query));

        let query_regex = if query.is_empty() {
            None
        } else {
            Regex::new(&query_builder).ok()
        };

        SubstringEngine {
            query: query.to_string(),
            query_regex,
        }
    }

    pub(crate) fn matched_label_range(&self, item: &CommandItem) -> Option<MatchRange> {
        let regex = self.query_regex.as_ref()?;
        regex_match(&item.label, regex).map(|(start, end)| MatchRange::ByteRange(start, end))
    }

    pub(crate) fn matches_secondary_field(&self, item: &CommandItem) -> bool {
        let Some(regex) = self.query_regex.as_ref() else {
            return false;
        };
        item.value.as_deref().is_some_and(|v| regex.is_match(v))
            || item.description.as_deref().is_some_and(|d| regex.is_match(d))
            || item.keywords.iter().any(|k| regex.is_match(k))
    }
}

impl MatchEngine for SubstringEngine {
    fn match_item(&self, item: &CommandItem) -> Option<MatchResult> {
        if self.query_regex.is_none() {
            // Empty query: the whole pool passes through unranked.
            return Some(MatchResult {
                rank: 0,
                matched_range: None,
            });
        }

        if let Some(range) = self.matched_label_range(item) {
            return Some(MatchResult {
                rank: 0,
                matched_range: Some(range),
            });
        }

        if self.matches_secondary_field(item) {
            return Some(MatchResult {
                rank: 0,
                matched_range: None,
            });
        }

        None
    }
}

impl Display for SubstringEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(
            f,
            "(Substring|{})",
            self.query_regex.as_ref().map(|x| x.as_str()).unwrap_or("")
        )
    }
}

/// Factory for the default [`SubstringEngine`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringEngineFactory;

impl crate::MatchEngineFactory for SubstringEngineFactory {
    fn create_engine_with_case(&self, query: &str, case: CaseMatching) -> Box<dyn MatchEngine> {
        Box::new(SubstringEngine::new(query, case))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CommandItem {
        CommandItem::new("copy", "Copy Selection")
            .value("edit.copy")
            .description("Copy the current selection to the clipboard")
            .keywords(["duplicate", "yank"])
    }

    #[test]
    fn empty_or_whitespace_query_matches_everything() {
        for query in ["", "   ", "\t"] {
            let engine = SubstringEngine::new(query, CaseMatching::Ignore);
            let res = engine.match_item(&item()).unwrap();
            assert_eq!(res.rank, 0);
            assert!(res.matched_range.is_none());
        }
    }

    #[test]
    fn matches_label_case_insensitively_with_range() {
        let engine = SubstringEngine::new("SELEC", CaseMatching::Ignore);
        let res = engine.match_item(&item()).unwrap();
        assert_eq!(res.matched_range, Some(MatchRange::ByteRange(5, 10)));
    }

    #[test]
    fn matches_value_description_and_keywords() {
        for query in ["edit.", "clipboard", "yank"] {
            let engine = SubstringEngine::new(query, CaseMatching::Ignore);
            let res = engine.match_item(&item()).unwrap();
            assert!(res.matched_range.is_none(), "query {query:?} matched the label");
        }
    }

    #[test]
    fn non_matching_query_yields_none() {
        let engine = SubstringEngine::new("zzz", CaseMatching::Ignore);
        assert!(engine.match_item(&item()).is_none());
    }

    #[test]
    fn respect_case_requires_exact_casing() {
        let engine = SubstringEngine::new("copy s", CaseMatching::Respect);
        assert!(engine.match_item(&item()).is_none());
        let engine = SubstringEngine::new("Copy S", CaseMatching::Respect);
        assert!(engine.match_item(&item()).is_some());
    }

    #[test]
    fn smart_case_is_insensitive_for_lowercase_queries() {
        let engine = SubstringEngine::new("copy s", CaseMatching::Smart);
        assert!(engine.match_item(&item()).is_some());
        let engine = SubstringEngine::new("COPY X", CaseMatching::Smart);
        assert!(engine.match_item(&item()).is_none());
    }

    #[test]
    fn regex_metacharacters_in_query_are_literal() {
        let special = CommandItem::new("re", "a.b*c");
        let engine = SubstringEngine::new(".b*", CaseMatching::Ignore);
        assert!(engine.match_item(&special).is_some());
        let engine = SubstringEngine::new("axb", CaseMatching::Ignore);
        assert!(engine.match_item(&special).is_none());
    }
}
